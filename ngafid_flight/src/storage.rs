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

//! persisting processed flights. Only series that are flagged as persistent are stored, in their
//! compressed record form with registry ids instead of names

use std::sync::{Arc, atomic::{AtomicU64, Ordering}};
use dashmap::DashMap;
use serde::{Serialize,Deserialize};
use tracing::{debug, info};
use ngafid_series::{NumericSeries, NumericSeriesRecord, TextSeries, TextSeriesRecord, registry::Registry};

use crate::{
    errors::{Result, FlightError, FlightWarning},
    events::FlightEvent, flight::{Flight, FlightStatus}, itinerary::Leg, turn_to_final::TurnToFinal,
};

/// the storable representation of a processed flight
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct FlightRecord {
    pub airframe: String,
    pub number_rows: usize,
    pub status: FlightStatus,
    pub warnings: Vec<FlightWarning>,
    pub numeric: Vec<NumericSeriesRecord>,
    pub text: Vec<TextSeriesRecord>,
    pub itinerary: Vec<Leg>,
    pub events: Vec<FlightEvent>,
    pub approaches: Vec<TurnToFinal>,
}

impl FlightRecord {
    /// encode the persistent series of a processed flight. Failed or unprocessed flights are rejected
    pub fn from_flight (flight: &Flight, registry: &Registry)->Result<Self> {
        match flight.status() {
            FlightStatus::Success | FlightStatus::Warning => {}
            status => return Err( FlightError::StorageError( format!("cannot store flight with status {status}")))
        }

        let mut numeric: Vec<NumericSeriesRecord> = Vec::new();
        for s in flight.numeric_series().filter(|s| s.persist()) {
            numeric.push( s.to_record( registry)?);
        }
        numeric.sort_by_key(|r| r.name_id);

        let mut text: Vec<TextSeriesRecord> = Vec::new();
        for s in flight.text_series().filter(|s| s.persist()) {
            text.push( s.to_record( registry)?);
        }
        text.sort_by_key(|r| r.name_id);

        Ok( FlightRecord {
            airframe: flight.airframe().to_string(),
            number_rows: flight.number_rows(),
            status: flight.status(),
            warnings: flight.warnings().to_vec(),
            numeric,
            text,
            itinerary: flight.itinerary().to_vec(),
            events: flight.events().to_vec(),
            approaches: flight.approaches().to_vec(),
        })
    }
}

pub trait FlightStorage: Send + Sync {
    /// store a flight record and return its id
    fn store_flight (&self, record: FlightRecord)->Result<u64>;

    fn load_numeric (&self, flight_id: u64, name: &str, registry: &Registry)->Result<Option<NumericSeries>>;

    fn load_text (&self, flight_id: u64, name: &str, registry: &Registry)->Result<Option<TextSeries>>;

    fn len (&self)->usize;
}

/// in-process flight store that can be shared between processing tasks
#[derive(Debug)]
pub struct MemoryStorage {
    flights: DashMap<u64,Arc<FlightRecord>>,
    next_id: AtomicU64,
}

impl MemoryStorage {
    pub fn new ()->Self {
        MemoryStorage { flights: DashMap::new(), next_id: AtomicU64::new(1) }
    }

    pub fn get (&self, flight_id: u64)->Option<Arc<FlightRecord>> {
        self.flights.get( &flight_id).map(|r| r.value().clone())
    }
}

impl Default for MemoryStorage {
    fn default()->Self { Self::new() }
}

impl FlightStorage for MemoryStorage {
    fn store_flight (&self, record: FlightRecord)->Result<u64> {
        if record.status == FlightStatus::Failed || record.status == FlightStatus::Pending {
            return Err( FlightError::StorageError( format!("cannot store flight with status {}", record.status)))
        }

        let id = self.next_id.fetch_add( 1, Ordering::Relaxed);
        info!("storing flight {id} ({} numeric, {} text series)", record.numeric.len(), record.text.len());
        self.flights.insert( id, Arc::new(record));
        Ok(id)
    }

    fn load_numeric (&self, flight_id: u64, name: &str, registry: &Registry)->Result<Option<NumericSeries>> {
        let Some(record) = self.get( flight_id) else { return Ok(None) };
        let Some(name_id) = registry.numeric_names.lookup( name) else { return Ok(None) };

        match record.numeric.iter().find(|r| r.name_id == name_id) {
            Some(r) => Ok( Some( NumericSeries::from_record( r, registry)?)),
            None => Ok(None)
        }
    }

    fn load_text (&self, flight_id: u64, name: &str, registry: &Registry)->Result<Option<TextSeries>> {
        let Some(record) = self.get( flight_id) else { return Ok(None) };
        let Some(name_id) = registry.text_names.lookup( name) else { return Ok(None) };

        match record.text.iter().find(|r| r.name_id == name_id) {
            Some(r) => Ok( Some( TextSeries::from_record( r, registry)?)),
            None => Ok(None)
        }
    }

    fn len (&self)->usize { self.flights.len() }
}
