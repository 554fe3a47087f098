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

//! the per-flight processing pipeline: derived series, airport proximity, itinerary, pattern and
//! turn-to-final analysis, flight phases. A flight either completes the pipeline or is rolled back
//! to its ingested series and marked as failed

use std::sync::Arc;
use tracing::{debug, info, warn, error};
use ngafid_series::registry::Registry;

use crate::{
    airports::{AirportDb, Runway},
    config::ProcessingConfig,
    derived::{DerivedGraph, standard_graph},
    errors::{Result, FlightError, FlightWarning},
    events::FlightEvent,
    flight::{Flight, FlightStatus},
    itinerary::{Leg, build_itinerary},
    parameters::*,
    pattern::{PatternClassifier, runway_heading},
    phases::{classify_phases, phase_series},
    proximity::add_proximity_series,
    storage::{FlightRecord, FlightStorage},
    turn_to_final::{ApproachWindow, TurnToFinal, find_approach_window},
};

pub struct FlightProcessor {
    config: Arc<ProcessingConfig>,
    airports: Option<Arc<AirportDb>>,
    graph: DerivedGraph,
}

impl FlightProcessor {
    /// without airport database the proximity based steps (itinerary, pattern, turn-to-final) are skipped
    pub fn new (config: Arc<ProcessingConfig>, airports: Option<Arc<AirportDb>>)->Result<Self> {
        let graph = standard_graph( &config.derived)?;
        Ok( FlightProcessor { config, airports, graph })
    }

    pub fn config (&self)->&ProcessingConfig { &self.config }
    pub fn graph (&self)->&DerivedGraph { &self.graph }

    pub fn process (&self, flight: &mut Flight)->Result<FlightStatus> {
        if let Err(e) = flight.validate() {
            error!("rejecting flight: {e}");
            flight.status = FlightStatus::Failed;
            return Err(e)
        }

        let checkpoint = flight.checkpoint();
        match self.run( flight) {
            Ok(()) => {
                flight.status = if flight.warnings.is_empty() { FlightStatus::Success } else { FlightStatus::Warning };
                info!("processed {flight}");
                Ok( flight.status)
            }
            Err(e) => {
                error!("processing failed, rolling back: {e}");
                flight.rollback( checkpoint);
                flight.status = FlightStatus::Failed;
                Err(e)
            }
        }
    }

    /// process and store a flight. Failed flights are not stored
    pub fn process_and_store (&self, flight: &mut Flight, registry: &Registry, storage: &dyn FlightStorage)->Result<u64> {
        self.process( flight)?;
        let record = FlightRecord::from_flight( flight, registry)?;
        storage.store_flight( record)
    }

    fn run (&self, flight: &mut Flight)->Result<()> {
        for outcome in self.graph.evaluate( flight)? {
            if let Some(w) = outcome.warning() { flight.add_warning( w) }
        }

        if let Some(db) = &self.airports {
            self.add_airport_analysis( flight, db)?;
        } else {
            debug!("no airport database, skipping itinerary");
        }

        self.add_phases( flight)
    }

    fn add_airport_analysis (&self, flight: &mut Flight, db: &AirportDb)->Result<()> {
        match add_proximity_series( flight, db, &self.config.proximity) {
            Ok(warnings) => for w in warnings { flight.add_warning( w) }
            Err(e) => {
                flight.add_warning( FlightWarning::from_error(e)?);
                return Ok(()) // nothing downstream can be computed
            }
        }

        match build_itinerary( flight, &self.config.itinerary) {
            Ok(legs) => flight.itinerary = legs,
            Err(e) => {
                flight.add_warning( FlightWarning::from_error(e)?);
                return Ok(())
            }
        }

        self.analyze_approaches( flight, db)
    }

    fn analyze_approaches (&self, flight: &mut Flight, db: &AirportDb)->Result<()> {
        let required = [LATITUDE, LONGITUDE, ALT_AGL, ROLL];
        let missing: Vec<String> = required.iter().filter(|n| !flight.has_numeric(n)).map(|n| n.to_string()).collect();
        if !missing.is_empty() {
            flight.add_warning( FlightWarning::MissingDependency{ calculation: "approach analysis".to_string(), missing });
            return Ok(())
        }

        let mut events: Vec<FlightEvent> = Vec::new();
        let mut approaches: Vec<TurnToFinal> = Vec::new();
        {
            let fl: &Flight = flight;
            let series = |name| values_of( fl, name);
            let (Some(lat), Some(lon), Some(agl), Some(roll)) = (series(LATITUDE), series(LONGITUDE), series(ALT_AGL), series(ROLL)) else {
                return Ok(())
            };
            let altitude = series(ALT_MSL).unwrap_or( agl);
            let airspeed = series(IAS);
            let approach_speed = self.config.turn_to_final.approach_speed_kt( fl.airframe());

            for leg in fl.itinerary() {
                let Some(runway) = leg_runway( db, leg) else {
                    debug!("no runway geometry for leg {leg}");
                    continue
                };

                if let Some(heading) = runway_heading( runway) {
                    let (from, to) = (leg.start_index, (leg.end_index + 1).min( lat.len()));
                    let result = PatternClassifier::new( &self.config.pattern, heading).classify( &lat[from..to], &lon[from..to]);
                    if !result.anomalies.is_empty() {
                        debug!("leg {leg} has {} pattern anomalies", result.anomalies.len());
                    }
                    events.extend( result.events.into_iter().map(|e| e.offset( from)));
                }

                let (Some(centerline), Some(min_index)) = (runway.centerline, leg.min_altitude_index) else { continue };
                let Some((from,to)) = find_approach_window( agl, min_index, &self.config.turn_to_final) else { continue };

                let window = ApproachWindow {
                    agl: &agl[from..to],
                    altitude: &altitude[from..to],
                    roll: &roll[from..to],
                    lat: &lat[from..to],
                    lon: &lon[from..to],
                    airspeed: airspeed.map(|s| &s[from..to]),
                };
                let ttf = TurnToFinal::analyze( &leg.airport, &runway.name, &centerline, from, &window,
                                                agl[min_index], approach_speed, &self.config.turn_to_final);
                events.extend( ttf.events());
                approaches.push( ttf);
            }
        }

        info!("{} approaches, {} events", approaches.len(), events.len());
        flight.approaches = approaches;
        for e in events { flight.add_event( e) }
        Ok(())
    }

    fn add_phases (&self, flight: &mut Flight)->Result<()> {
        let missing: Vec<String> = [ALT_AGL, GND_SPD].into_iter().filter(|n| !flight.has_numeric(n)).map(|n| n.to_string()).collect();
        if !missing.is_empty() {
            flight.add_warning( FlightWarning::MissingDependency{ calculation: FLIGHT_PHASE.to_string(), missing });
            return Ok(())
        }

        let phases = match (values_of( flight, ALT_AGL), values_of( flight, GND_SPD)) {
            (Some(agl), Some(gs)) => classify_phases( agl, gs, values_of( flight, E1_RPM), &self.config.phases),
            _ => return Ok(())
        };
        flight.add_text( phase_series( &phases))
    }
}

fn values_of<'a> (flight: &'a Flight, name: &str)->Option<&'a [f64]> {
    flight.numeric(name).map(|s| s.values())
}

fn leg_runway<'a> (db: &'a AirportDb, leg: &Leg)->Option<&'a Runway> {
    let name = leg.runway.as_deref()?;
    db.get( &leg.airport)?.runway( name).filter(|r| r.has_coordinates())
}
