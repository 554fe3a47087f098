/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{fmt, ops::Index};
use serde::{Serialize,Deserialize};
use ngafid_common::MinMaxAvg;

use crate::{codec, errors::{Result, SeriesError}, registry::Registry};

/// a named, append-only column of f64 samples for one flight.
/// NaN means "no reading" - those samples count towards `len()` but not `valid_count()`,
/// and they are ignored by the incrementally maintained min/avg/max
#[derive(Debug,Clone)]
pub struct NumericSeries {
    name: String,
    data_type: String,
    values: Vec<f64>,
    stats: MinMaxAvg,
    persist: bool,
}

impl NumericSeries {
    pub fn new (name: impl Into<String>, data_type: impl Into<String>)->Self {
        NumericSeries { name: name.into(), data_type: data_type.into(), values: Vec::new(), stats: MinMaxAvg::new(), persist: true }
    }

    pub fn with_capacity (name: impl Into<String>, data_type: impl Into<String>, capacity: usize)->Self {
        let mut s = NumericSeries::new( name, data_type);
        s.values.reserve_exact( capacity);
        s
    }

    pub fn from_values (name: impl Into<String>, data_type: impl Into<String>, values: impl IntoIterator<Item=f64>)->Self {
        let mut s = NumericSeries::new( name, data_type);
        for v in values { s.push(v) }
        s
    }

    /// builder style setter for the persist flag
    pub fn transient (mut self)->Self { self.persist = false; self }
    pub fn set_persist (&mut self, persist: bool) { self.persist = persist }

    pub fn name (&self)->&str { self.name.as_str() }
    pub fn data_type (&self)->&str { self.data_type.as_str() }
    pub fn persist (&self)->bool { self.persist }

    pub fn len (&self)->usize { self.values.len() }
    pub fn is_empty (&self)->bool { self.values.is_empty() }
    pub fn valid_count (&self)->usize { self.stats.n }

    /// NaN if there are no valid samples
    pub fn min (&self)->f64 { self.stats.min }
    pub fn avg (&self)->f64 { self.stats.avg }
    pub fn max (&self)->f64 { self.stats.max }

    /// amortized O(1) (the backing Vec grows geometrically)
    pub fn push (&mut self, v: f64) {
        self.values.push(v);
        self.stats.add(v);
    }

    /// O(1) access. Out of range indices are programming errors and panic
    #[inline]
    pub fn get (&self, i: usize)->f64 { self.values[i] }

    pub fn try_get (&self, i: usize)->Result<f64> {
        self.values.get(i).copied().ok_or_else( || SeriesError::IndexOutOfRange{ name: self.name.clone(), index: i, len: self.values.len() })
    }

    pub fn values (&self)->&[f64] { self.values.as_slice() }
    pub fn iter (&self)->impl Iterator<Item=f64> + '_ { self.values.iter().copied() }

    /// the samples in `[from,to)`. Note that `from == to` is treated as the single element slice `[from,from+1)`
    pub fn slice (&self, from: usize, to: usize)->&[f64] {
        let to = if from == to { to + 1 } else { to };
        &self.values[from..to]
    }

    /// an independent series with the same name and type that contains the samples `[from,to)`,
    /// with the same `from == to` convention as [`slice`](Self::slice)
    pub fn sub_series (&self, from: usize, to: usize)->NumericSeries {
        let mut s = NumericSeries::from_values( self.name.clone(), self.data_type.clone(), self.slice(from,to).iter().copied());
        s.persist = self.persist;
        s
    }

    /// a transient series named "<name>_lag<n>" where sample i holds our sample i-n (NaN for i < n)
    pub fn lag (&self, n: usize)->NumericSeries {
        let len = self.values.len();
        let mut s = NumericSeries::with_capacity( lag_name( &self.name, n), self.data_type.clone(), len).transient();
        for i in 0..len {
            s.push( if i >= n { self.values[i-n] } else { f64::NAN });
        }
        s
    }

    /// a transient series named "<name>_lead<n>" where sample i holds our sample i+n (NaN for i >= len-n)
    pub fn lead (&self, n: usize)->NumericSeries {
        let len = self.values.len();
        let mut s = NumericSeries::with_capacity( lead_name( &self.name, n), self.data_type.clone(), len).transient();
        for i in 0..len {
            s.push( if i + n < len { self.values[i+n] } else { f64::NAN });
        }
        s
    }

    //--- storage

    pub fn encode (&self)->Result<Vec<u8>> { codec::encode_f64s( &self.values) }

    /// the inverse of `encode()`. Statistics are recomputed from the decoded values
    pub fn decode (name: impl Into<String>, data_type: impl Into<String>, data: &[u8], len_hint: usize)->Result<Self> {
        let values = codec::decode_f64s( data, len_hint)?;
        Ok( NumericSeries::from_values( name, data_type, values))
    }

    pub fn to_record (&self, registry: &Registry)->Result<NumericSeriesRecord> {
        Ok( NumericSeriesRecord {
            name_id: registry.numeric_names.id_of( &self.name),
            type_id: registry.data_types.id_of( &self.data_type),
            length: self.len(),
            valid_count: self.valid_count(),
            min: finite_or_none( self.min()),
            avg: finite_or_none( self.avg()),
            max: finite_or_none( self.max()),
            data: self.encode()?
        })
    }

    pub fn from_record (rec: &NumericSeriesRecord, registry: &Registry)->Result<Self> {
        let name = registry.numeric_names.name_of( rec.name_id).ok_or( SeriesError::UnknownId{ namespace: "series name", id: rec.name_id })?;
        let data_type = registry.data_types.name_of( rec.type_id).ok_or( SeriesError::UnknownId{ namespace: "data type", id: rec.type_id })?;
        let s = NumericSeries::decode( name, data_type, &rec.data, rec.length)?;

        if s.len() != rec.length || s.valid_count() != rec.valid_count {
            return Err( SeriesError::Corrupt( format!("series '{}' has {}/{} samples, record says {}/{}", 
                s.name, s.len(), s.valid_count(), rec.length, rec.valid_count)))
        }
        Ok(s)
    }
}

impl Index<usize> for NumericSeries {
    type Output = f64;
    fn index (&self, i: usize)->&f64 { &self.values[i] }
}

impl fmt::Display for NumericSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "NumericSeries('{}' [{}], len: {}, valid: {}, min: {}, avg: {}, max: {})", 
            self.name, self.data_type, self.len(), self.valid_count(), self.min(), self.avg(), self.max())
    }
}

pub fn lag_name (name: &str, n: usize)->String { format!("{name}_lag{n}") }
pub fn lead_name (name: &str, n: usize)->String { format!("{name}_lead{n}") }

#[inline]
fn finite_or_none (v: f64)->Option<f64> { if v.is_nan() { None } else { Some(v) } }

/// the persisted form of a numeric series. NaN statistics (no valid samples) are stored as None
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct NumericSeriesRecord {
    pub name_id: u32,
    pub type_id: u32,
    pub length: usize,
    pub valid_count: usize,
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
    pub data: Vec<u8>,
}
