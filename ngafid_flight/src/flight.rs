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

use std::{collections::{HashMap, HashSet}, fmt};
use chrono::NaiveDateTime;
use serde::{Serialize,Deserialize};
use tracing::{debug, warn};
use ngafid_series::{NumericSeries, TextSeries};

use crate::{
    errors::{Result, FlightWarning, fatal_ingestion},
    events::FlightEvent, itinerary::Leg, turn_to_final::TurnToFinal,
    parameters::{LCL_DATE, LCL_TIME},
};

/// the outcome of processing a flight
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,strum::Display)]
pub enum FlightStatus {
    /// not processed yet
    Pending,
    Success,
    /// processed and stored, but some calculations or lookups were skipped
    Warning,
    /// not usable, must not be stored
    Failed,
}

/// sample shift of a cached lag/lead series
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Shift {
    Lag(usize),
    Lead(usize),
}

/// a borrowed series of either type, as returned by [`Flight::series`]
#[derive(Debug,Clone,Copy)]
pub enum SeriesRef<'a> {
    Numeric(&'a NumericSeries),
    Text(&'a TextSeries),
}

/// one recorded flight: the named series of the recording plus everything computed from them.
/// All series have to have `number_rows` samples
#[derive(Debug)]
pub struct Flight {
    airframe: String,
    number_rows: usize,
    numeric: HashMap<String,NumericSeries>,
    text: HashMap<String,TextSeries>,
    shifted: HashMap<(String,Shift),NumericSeries>,

    pub(crate) itinerary: Vec<Leg>,
    pub(crate) events: Vec<FlightEvent>,
    pub(crate) approaches: Vec<TurnToFinal>,
    pub(crate) warnings: Vec<FlightWarning>,
    pub(crate) status: FlightStatus,
}

/// the set of series names at some point of processing, used to discard partial results
pub struct Checkpoint {
    numeric: HashSet<String>,
    text: HashSet<String>,
}

impl Flight {
    pub fn new (airframe: impl Into<String>, number_rows: usize)->Self {
        Flight {
            airframe: airframe.into(),
            number_rows,
            numeric: HashMap::new(),
            text: HashMap::new(),
            shifted: HashMap::new(),
            itinerary: Vec::new(),
            events: Vec::new(),
            approaches: Vec::new(),
            warnings: Vec::new(),
            status: FlightStatus::Pending,
        }
    }

    pub fn airframe (&self)->&str { self.airframe.as_str() }
    pub fn number_rows (&self)->usize { self.number_rows }

    /// add a series, replacing a previous one with the same name.
    /// Series of the wrong length are a fatal ingestion defect
    pub fn add_numeric (&mut self, series: NumericSeries)->Result<()> {
        if series.len() != self.number_rows {
            return Err( fatal_ingestion!("series '{}' has {} samples, flight has {} rows", series.name(), series.len(), self.number_rows))
        }
        self.shifted.retain( |(name,_),_| name != series.name());
        self.numeric.insert( series.name().to_string(), series);
        Ok(())
    }

    pub fn add_text (&mut self, series: TextSeries)->Result<()> {
        if series.len() != self.number_rows {
            return Err( fatal_ingestion!("text series '{}' has {} samples, flight has {} rows", series.name(), series.len(), self.number_rows))
        }
        self.text.insert( series.name().to_string(), series);
        Ok(())
    }

    pub fn numeric (&self, name: &str)->Option<&NumericSeries> { self.numeric.get(name) }
    pub fn text (&self, name: &str)->Option<&TextSeries> { self.text.get(name) }
    pub fn has_numeric (&self, name: &str)->bool { self.numeric.contains_key(name) }

    pub fn series (&self, name: &str)->Option<SeriesRef<'_>> {
        if let Some(s) = self.numeric.get(name) { Some( SeriesRef::Numeric(s)) }
        else { self.text.get(name).map( SeriesRef::Text) }
    }

    pub fn numeric_series (&self)->impl Iterator<Item=&NumericSeries> { self.numeric.values() }
    pub fn text_series (&self)->impl Iterator<Item=&TextSeries> { self.text.values() }

    /// the lag/lead shifted version of a numeric series, computed once and then served from cache
    pub fn shifted (&mut self, name: &str, shift: Shift)->Option<&NumericSeries> {
        let key = (name.to_string(), shift);
        if !self.shifted.contains_key( &key) {
            let base = self.numeric.get(name)?;
            let s = match shift {
                Shift::Lag(n) => base.lag(n),
                Shift::Lead(n) => base.lead(n),
            };
            debug!("cached {}", s.name());
            self.shifted.insert( key.clone(), s);
        }
        self.shifted.get( &key)
    }

    /// lookup of an already cached shifted series
    pub fn cached_shifted (&self, name: &str, shift: Shift)->Option<&NumericSeries> {
        self.shifted.get( &(name.to_string(), shift))
    }

    pub fn lag (&mut self, name: &str, n: usize)->Option<&NumericSeries> { self.shifted( name, Shift::Lag(n)) }
    pub fn lead (&mut self, name: &str, n: usize)->Option<&NumericSeries> { self.shifted( name, Shift::Lead(n)) }

    pub fn itinerary (&self)->&[Leg] { self.itinerary.as_slice() }
    pub fn events (&self)->&[FlightEvent] { self.events.as_slice() }
    pub fn approaches (&self)->&[TurnToFinal] { self.approaches.as_slice() }
    pub fn warnings (&self)->&[FlightWarning] { self.warnings.as_slice() }
    pub fn status (&self)->FlightStatus { self.status }

    pub fn add_warning (&mut self, warning: FlightWarning) {
        warn!("{warning}");
        self.warnings.push( warning);
    }

    /// check that every series has `number_rows` samples
    pub fn validate (&self)->Result<()> {
        for s in self.numeric.values() {
            if s.len() != self.number_rows {
                return Err( fatal_ingestion!("series '{}' has {} samples, flight has {} rows", s.name(), s.len(), self.number_rows))
            }
        }
        for s in self.text.values() {
            if s.len() != self.number_rows {
                return Err( fatal_ingestion!("text series '{}' has {} samples, flight has {} rows", s.name(), s.len(), self.number_rows))
            }
        }
        Ok(())
    }

    /// local date/time of a sample, if the flight has parseable "Lcl Date" and "Lcl Time" columns
    pub fn timestamp (&self, i: usize)->Option<NaiveDateTime> {
        let date = self.text.get(LCL_DATE)?;
        let time = self.text.get(LCL_TIME)?;
        if i >= date.len() { return None }

        let dt = format!("{} {}", date.get(i), time.get(i));
        NaiveDateTime::parse_from_str( &dt, "%Y-%m-%d %H:%M:%S").ok()
    }

    pub(crate) fn add_event (&mut self, mut event: FlightEvent) {
        event.start_time = self.timestamp( event.start_index);
        event.end_time = self.timestamp( event.end_index);
        self.events.push( event);
    }

    pub fn checkpoint (&self)->Checkpoint {
        Checkpoint { numeric: self.numeric.keys().cloned().collect(), text: self.text.keys().cloned().collect() }
    }

    /// drop everything that was computed after `cp` was taken
    pub fn rollback (&mut self, cp: Checkpoint) {
        self.numeric.retain( |name,_| cp.numeric.contains(name));
        self.text.retain( |name,_| cp.text.contains(name));
        self.shifted.clear();
        self.itinerary.clear();
        self.events.clear();
        self.approaches.clear();
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Flight({}, rows: {}, series: {}/{}, legs: {}, status: {})", 
            self.airframe, self.number_rows, self.numeric.len(), self.text.len(), self.itinerary.len(), self.status)
    }
}
