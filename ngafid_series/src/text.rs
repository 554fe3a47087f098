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

use std::fmt;
use serde::{Serialize,Deserialize};

use crate::{codec, errors::{Result, SeriesError}, registry::Registry};

/// a named, append-only column of string samples. Empty strings mean "no reading"
#[derive(Debug,Clone)]
pub struct TextSeries {
    name: String,
    data_type: String,
    values: Vec<String>,
    valid_count: usize,
    persist: bool,
}

impl TextSeries {
    pub fn new (name: impl Into<String>, data_type: impl Into<String>)->Self {
        TextSeries { name: name.into(), data_type: data_type.into(), values: Vec::new(), valid_count: 0, persist: true }
    }

    pub fn from_values<S: Into<String>> (name: impl Into<String>, data_type: impl Into<String>, values: impl IntoIterator<Item=S>)->Self {
        let mut s = TextSeries::new( name, data_type);
        for v in values { s.push(v) }
        s
    }

    pub fn transient (mut self)->Self { self.persist = false; self }

    pub fn name (&self)->&str { self.name.as_str() }
    pub fn data_type (&self)->&str { self.data_type.as_str() }
    pub fn persist (&self)->bool { self.persist }

    pub fn len (&self)->usize { self.values.len() }
    pub fn is_empty (&self)->bool { self.values.is_empty() }
    pub fn valid_count (&self)->usize { self.valid_count }

    pub fn push (&mut self, v: impl Into<String>) {
        let v = v.into();
        if !v.is_empty() { self.valid_count += 1 }
        self.values.push(v);
    }

    #[inline]
    pub fn get (&self, i: usize)->&str { self.values[i].as_str() }

    pub fn values (&self)->&[String] { self.values.as_slice() }

    /// see [`NumericSeries::slice`](crate::NumericSeries::slice) for the `from == to` convention
    pub fn slice (&self, from: usize, to: usize)->&[String] {
        let to = if from == to { to + 1 } else { to };
        &self.values[from..to]
    }

    pub fn sub_series (&self, from: usize, to: usize)->TextSeries {
        let mut s = TextSeries::from_values( self.name.clone(), self.data_type.clone(), self.slice(from,to).iter().cloned());
        s.persist = self.persist;
        s
    }

    pub fn encode (&self)->Result<Vec<u8>> { codec::encode_strings( &self.values) }

    pub fn decode (name: impl Into<String>, data_type: impl Into<String>, data: &[u8], len_hint: usize)->Result<Self> {
        let values = codec::decode_strings( data, len_hint)?;
        Ok( TextSeries::from_values( name, data_type, values))
    }

    pub fn to_record (&self, registry: &Registry)->Result<TextSeriesRecord> {
        Ok( TextSeriesRecord {
            name_id: registry.text_names.id_of( &self.name),
            type_id: registry.data_types.id_of( &self.data_type),
            length: self.len(),
            valid_count: self.valid_count,
            data: self.encode()?
        })
    }

    pub fn from_record (rec: &TextSeriesRecord, registry: &Registry)->Result<Self> {
        let name = registry.text_names.name_of( rec.name_id).ok_or( SeriesError::UnknownId{ namespace: "text series name", id: rec.name_id })?;
        let data_type = registry.data_types.name_of( rec.type_id).ok_or( SeriesError::UnknownId{ namespace: "data type", id: rec.type_id })?;
        let s = TextSeries::decode( name, data_type, &rec.data, rec.length)?;

        if s.len() != rec.length || s.valid_count != rec.valid_count {
            return Err( SeriesError::Corrupt( format!("text series '{}' has {}/{} samples, record says {}/{}",
                s.name, s.len(), s.valid_count, rec.length, rec.valid_count)))
        }
        Ok(s)
    }
}

impl fmt::Display for TextSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "TextSeries('{}' [{}], len: {}, valid: {})", self.name, self.data_type, self.len(), self.valid_count)
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TextSeriesRecord {
    pub name_id: u32,
    pub type_id: u32,
    pub length: usize,
    pub valid_count: usize,
    pub data: Vec<u8>,
}
