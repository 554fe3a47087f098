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

use tracing::debug;
use ngafid_common::geo::LatLon;
use ngafid_series::{NumericSeries, TextSeries};

use crate::{
    airports::AirportDb, config::ProximityConfig, flight::Flight, parameters::*,
    errors::{Result, FlightError, FlightWarning},
};

/// nearest airport/runway of one sample. Distances are NaN if there was no match
#[derive(Debug,Clone,PartialEq)]
pub struct Proximity {
    pub airport: String,
    pub airport_distance: f64,
    pub runway: String,
    pub runway_distance: f64,
}

impl Proximity {
    pub fn none()->Self {
        Proximity { airport: String::new(), airport_distance: f64::NAN, runway: String::new(), runway_distance: f64::NAN }
    }
}

/// look up the nearest airport and runway for one position. Airports are only considered below
/// the configured AGL gate, runways only for a matched airport
pub fn proximity_of (db: &AirportDb, cfg: &ProximityConfig, p: &LatLon, agl: f64)->Result<Proximity> {
    let mut prox = Proximity::none();
    if !p.is_defined() || agl.is_nan() || agl > cfg.max_agl_ft {
        return Ok(prox)
    }

    if let Some((airport, d)) = db.nearest_airport_within( p, cfg.max_airport_distance_ft)? {
        prox.airport = airport.iata_code.clone();
        prox.airport_distance = d;

        if let Some((runway, d)) = airport.nearest_runway_within( p, cfg.max_runway_distance_ft) {
            prox.runway = runway.name.clone();
            prox.runway_distance = d;
        }
    }
    Ok(prox)
}

/// add the per-sample "NearestAirport", "AirportDistance", "NearestRunway" and "RunwayDistance" series.
/// Samples with out of range coordinates are recorded as "no match" and reported as warnings (one per flight)
pub fn add_proximity_series (flight: &mut Flight, db: &AirportDb, cfg: &ProximityConfig)->Result<Vec<FlightWarning>> {
    let (lat, lon, agl) = match (flight.numeric(LATITUDE), flight.numeric(LONGITUDE), flight.numeric(ALT_AGL)) {
        (Some(lat), Some(lon), Some(agl)) => (lat, lon, agl),
        (lat, lon, agl) => {
            let missing = [(LATITUDE, lat.is_none()), (LONGITUDE, lon.is_none()), (ALT_AGL, agl.is_none())]
                .into_iter().filter(|(_,m)| *m).map(|(n,_)| n.to_string()).collect();
            return Err( FlightError::MissingDependency{ calculation: "proximity".to_string(), missing })
        }
    };

    let n = flight.number_rows();
    let mut airports = TextSeries::new( NEAREST_AIRPORT, UNIT_IATA);
    let mut runways = TextSeries::new( NEAREST_RUNWAY, UNIT_RUNWAY);
    let mut airport_dist = NumericSeries::with_capacity( AIRPORT_DISTANCE, UNIT_FT, n);
    let mut runway_dist = NumericSeries::with_capacity( RUNWAY_DISTANCE, UNIT_FT, n);
    let mut warnings: Vec<FlightWarning> = Vec::new();

    for i in 0..n {
        let p = LatLon::new( lat[i], lon[i]);
        let prox = match proximity_of( db, cfg, &p, agl[i]) {
            Ok(prox) => prox,
            Err(FlightError::MalformedGeometry(reason)) => {
                if warnings.is_empty() {
                    warnings.push( FlightWarning::MalformedGeometry{ index: Some(i), reason });
                }
                Proximity::none()
            }
            Err(e) => return Err(e)
        };

        airports.push( prox.airport);
        runways.push( prox.runway);
        airport_dist.push( prox.airport_distance);
        runway_dist.push( prox.runway_distance);
    }
    debug!("{} samples near airports, {} near runways", airports.valid_count(), runways.valid_count());

    flight.add_text( airports)?;
    flight.add_text( runways)?;
    flight.add_numeric( airport_dist)?;
    flight.add_numeric( runway_dist)?;

    Ok(warnings)
}
