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
use tracing::{debug, info};

use crate::{
    config::ItineraryConfig, flight::Flight, parameters::*,
    errors::{Result, FlightError},
};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,strum::Display)]
pub enum LegType {
    #[strum(serialize="takeoff")] Takeoff,
    #[strum(serialize="landing")] Landing,
    #[strum(serialize="touch_and_go")] TouchAndGo,
    #[strum(serialize="go_around")] GoAround,
}

/// what one sample contributes to a leg
#[derive(Debug,Clone,Copy)]
pub struct LegSample<'a> {
    pub index: usize,
    pub runway: &'a str,
    pub agl: f64,
    pub airport_distance: f64,
    pub runway_distance: f64,
    pub ground_speed: f64,
    /// NaN if the flight has no engine RPM, in which case takeoffs are detected by ground speed alone
    pub rpm: f64,
}

/// one itinerary entry: a consecutive stretch of samples close to the same airport
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Leg {
    pub airport: String,
    /// the most observed runway, set by `select_best_runway`
    pub runway: Option<String>,
    runway_counts: Vec<(String,usize)>,

    pub start_index: usize,
    pub end_index: usize,
    pub min_altitude_index: Option<usize>,
    pub min_altitude: f64,
    /// infinite as long as nothing was observed
    pub min_airport_distance: f64,
    pub min_runway_distance: f64,

    pub start_of_approach: Option<usize>,
    pub end_of_approach: Option<usize>,
    pub start_of_takeoff: Option<usize>,
    pub end_of_takeoff: Option<usize>,
    takeoff_counter: usize,

    pub leg_type: LegType,
}

impl Leg {
    pub fn new (airport: impl Into<String>, start_index: usize)->Self {
        Leg {
            airport: airport.into(),
            runway: None,
            runway_counts: Vec::new(),
            start_index,
            end_index: start_index,
            min_altitude_index: None,
            min_altitude: f64::INFINITY,
            min_airport_distance: f64::INFINITY,
            min_runway_distance: f64::INFINITY,
            start_of_approach: None,
            end_of_approach: None,
            start_of_takeoff: None,
            end_of_takeoff: None,
            takeoff_counter: 0,
            leg_type: LegType::GoAround,
        }
    }

    /// observation counts per runway name, in the order runways were first seen
    pub fn runway_counts (&self)->&[(String,usize)] { self.runway_counts.as_slice() }

    pub fn count_runway (&mut self, runway: &str) {
        if runway.is_empty() { return }

        if let Some(e) = self.runway_counts.iter_mut().find(|(r,_)| r == runway) {
            e.1 += 1;
        } else {
            self.runway_counts.push( (runway.to_string(), 1));
        }
    }

    pub fn update (&mut self, s: &LegSample, cfg: &ItineraryConfig) {
        self.end_index = s.index;
        self.track_takeoff( s, cfg);

        if !s.agl.is_nan() {
            if s.agl < self.min_altitude {
                self.min_altitude = s.agl;
                self.min_altitude_index = Some(s.index);
            }

            if s.agl <= cfg.approach_end_agl_ft {
                if self.start_of_approach.is_some() { self.end_of_approach = Some(s.index) }
            } else if s.agl > cfg.approach_start_agl_ft {
                if self.start_of_approach.is_none() { self.start_of_approach = Some(s.index) }
            }
        }

        if s.airport_distance < self.min_airport_distance { self.min_airport_distance = s.airport_distance }
        if s.runway_distance < self.min_runway_distance { self.min_runway_distance = s.runway_distance }

        self.count_runway( s.runway);
    }

    /// a takeoff run has to satisfy the speed (and RPM) criteria for `takeoff_run_samples` consecutive samples
    fn track_takeoff (&mut self, s: &LegSample, cfg: &ItineraryConfig) {
        let rpm_ok = s.rpm.is_nan() || s.rpm >= cfg.takeoff_min_rpm;
        let gs_ok = s.ground_speed > cfg.takeoff_min_gs_kt && s.ground_speed < cfg.takeoff_max_gs_kt;

        if rpm_ok && gs_ok {
            if self.start_of_takeoff.is_none() {
                self.start_of_takeoff = Some(s.index);
            } else if self.takeoff_counter >= cfg.takeoff_run_samples {
                self.end_of_takeoff = Some(s.index);
            }
            self.takeoff_counter += 1;
        } else {
            self.takeoff_counter = 0;
            if self.end_of_takeoff.is_none() { self.start_of_takeoff = None }
        }
    }

    /// pick the runway with the highest observation count, ties go to the runway seen first
    pub fn select_best_runway (&mut self) {
        let mut best: Option<&(String,usize)> = None;
        for e in &self.runway_counts {
            if best.map_or( true, |b| e.1 > b.1) { best = Some(e) }
        }
        self.runway = best.map(|(r,_)| r.clone());
    }

    pub fn was_approach (&self, cfg: &ItineraryConfig)->bool {
        self.min_runway_distance.is_finite() || self.min_altitude <= cfg.approach_max_agl_ft
    }

    pub fn determine_type (&mut self, cfg: &ItineraryConfig) {
        let approach_time = match (self.start_of_approach, self.end_of_approach) {
            (Some(start), Some(end)) => end as i64 - start as i64,
            _ => -1
        };

        self.leg_type = if self.start_of_takeoff.is_some() && (self.end_of_approach.is_none() || approach_time < cfg.min_approach_samples as i64) {
            LegType::Takeoff
        } else if self.end_of_takeoff.is_none() && self.end_of_approach.is_some() {
            LegType::Landing
        } else if self.runway_time().is_some_and(|t| t >= cfg.min_runway_samples as i64) {
            LegType::TouchAndGo
        } else {
            self.end_of_approach = Some(self.end_index);
            LegType::GoAround
        }
    }

    /// samples between touchdown and the start of the next takeoff run
    fn runway_time (&self)->Option<i64> {
        match (self.start_of_takeoff, self.end_of_approach) {
            (Some(takeoff), Some(touchdown)) => Some( takeoff as i64 - touchdown as i64),
            _ => None
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}({}) {} [{}..{}] -- altitude: {}, airport distance: {}, runway distance: {}",
            self.airport, self.runway.as_deref().unwrap_or("-"), self.leg_type, self.start_index, self.end_index,
            self.min_altitude, self.min_airport_distance, self.min_runway_distance)
    }
}

/// folds per-sample airport observations into legs. A new leg starts whenever the nearest airport
/// changes, a sample without airport closes the current leg. Closed legs that were not approaches are dropped
pub struct ItineraryBuilder<'a> {
    cfg: &'a ItineraryConfig,
    current: Option<Leg>,
    legs: Vec<Leg>,
}

impl<'a> ItineraryBuilder<'a> {
    pub fn new (cfg: &'a ItineraryConfig)->Self {
        ItineraryBuilder { cfg, current: None, legs: Vec::new() }
    }

    pub fn fold (&mut self, airport: &str, sample: &LegSample) {
        if airport.is_empty() {
            self.close();
            return
        }

        if self.current.as_ref().is_some_and(|leg| leg.airport != airport) {
            self.close();
        }

        let leg = self.current.get_or_insert_with( || Leg::new( airport, sample.index));
        leg.update( sample, self.cfg);
    }

    fn close (&mut self) {
        if let Some(mut leg) = self.current.take() {
            leg.select_best_runway();
            if leg.was_approach( self.cfg) {
                leg.determine_type( self.cfg);
                debug!("leg {leg}");
                self.legs.push( leg);
            } else {
                debug!("dropping non-approach leg {leg}");
            }
        }
    }

    pub fn finish (mut self)->Vec<Leg> {
        self.close();
        self.legs
    }
}

/// build the itinerary from the proximity series of a flight
pub fn build_itinerary (flight: &Flight, cfg: &ItineraryConfig)->Result<Vec<Leg>> {
    let (airports, runways, airport_dist, runway_dist, agl, gs) = match (
        flight.text(NEAREST_AIRPORT), flight.text(NEAREST_RUNWAY), flight.numeric(AIRPORT_DISTANCE),
        flight.numeric(RUNWAY_DISTANCE), flight.numeric(ALT_AGL), flight.numeric(GND_SPD)
    ) {
        (Some(a), Some(r), Some(ad), Some(rd), Some(agl), Some(gs)) => (a, r, ad, rd, agl, gs),
        _ => {
            let missing = [NEAREST_AIRPORT, NEAREST_RUNWAY, AIRPORT_DISTANCE, RUNWAY_DISTANCE, ALT_AGL, GND_SPD].into_iter()
                .filter(|n| flight.series(n).is_none()).map(|n| n.to_string()).collect();
            return Err( FlightError::MissingDependency{ calculation: "itinerary".to_string(), missing })
        }
    };
    let rpm = flight.numeric(E1_RPM);

    let mut builder = ItineraryBuilder::new( cfg);
    for i in 0..flight.number_rows() {
        let sample = LegSample {
            index: i,
            runway: runways.get(i),
            agl: agl[i],
            airport_distance: airport_dist[i],
            runway_distance: runway_dist[i],
            ground_speed: gs[i],
            rpm: rpm.map_or( f64::NAN, |s| s[i]),
        };
        builder.fold( airports.get(i), &sample);
    }

    let legs = builder.finish();
    info!("itinerary has {} legs", legs.len());
    Ok(legs)
}
