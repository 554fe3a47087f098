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

//! traffic pattern classification (NIFA). The ground track of a leg is compared against the runway
//! heading sample by sample; the bearing difference band drives a small state machine whose state
//! segments become pattern events

use serde::{Serialize,Deserialize};
use tracing::{debug, warn};
use ngafid_common::{angle::bearing_difference, geo::LatLon};

use crate::{
    airports::Runway, config::PatternConfig,
    events::{EventKind, FlightEvent},
};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,strum::Display)]
pub enum PhaseState {
    Upwind,
    TurnToCrosswind,
    /// perpendicular to the runway, both crosswind and base leg
    Crosswind,
    TurnToDownwind,
    Downwind,
    /// the third turn
    TurnToBase,
    TurnToFinal,
}

/// bearing difference bands, in increasing difference to the runway heading
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,strum::Display)]
pub enum BearingBand {
    Aligned,
    Oblique,
    Perpendicular,
    ReverseOblique,
    Opposed,
}

impl PatternConfig {
    pub fn band (&self, diff: f64)->BearingBand {
        if diff < self.aligned_max_deg { BearingBand::Aligned }
        else if diff < self.first_turn_max_deg { BearingBand::Oblique }
        else if diff <= self.perpendicular_max_deg { BearingBand::Perpendicular }
        else if diff <= self.second_turn_max_deg { BearingBand::ReverseOblique }
        else { BearingBand::Opposed }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Transition {
    Stay,
    To(PhaseState),
    /// the turn happened between two samples, record it and continue in the target state
    Via(PhaseState,PhaseState),
    /// no valid pattern continuation. The state is kept and the sample is recorded as anomaly
    Unexpected,
}

use PhaseState::*;
use Transition::*;

/// rows are states, columns are bands (Aligned, Oblique, Perpendicular, ReverseOblique, Opposed)
const TRANSITIONS: [[Transition;5];7] = [
    /* Upwind          */ [ Stay,                        To(TurnToCrosswind), Via(TurnToCrosswind,Crosswind), Unexpected,          To(Downwind) ],
    /* TurnToCrosswind */ [ To(Upwind),                  Stay,                To(Crosswind),                  To(TurnToDownwind),  To(Downwind) ],
    /* Crosswind       */ [ Via(TurnToFinal,Upwind),     To(TurnToFinal),     Stay,                           To(TurnToDownwind),  Via(TurnToDownwind,Downwind) ],
    /* TurnToDownwind  */ [ Unexpected,                  Unexpected,          To(Crosswind),                  Stay,                To(Downwind) ],
    /* Downwind        */ [ Unexpected,                  Unexpected,          Via(TurnToBase,Crosswind),      To(TurnToBase),      Stay ],
    /* TurnToBase      */ [ Unexpected,                  To(TurnToFinal),     To(Crosswind),                  Stay,                Stay ],
    /* TurnToFinal     */ [ To(Upwind),                  Stay,                To(Crosswind),                  Unexpected,          Unexpected ],
];

pub fn transition (state: PhaseState, band: BearingBand)->Transition {
    TRANSITIONS[state as usize][band as usize]
}

/// the heading a runway is used in. Runway names carry the magnetic heading in tens of degrees ("27", "09L"),
/// we use it to pick between the centerline bearing and its reciprocal
pub fn runway_heading (runway: &Runway)->Option<f64> {
    let bearing = runway.bearing()?;
    let digits: String = runway.name.chars().take_while(|c| c.is_ascii_digit()).collect();

    match digits.parse::<u32>() {
        Ok(n) if (1..=36).contains(&n) => {
            let named = (n * 10) as f64;
            let reciprocal = (bearing + 180.0) % 360.0;
            if bearing_difference( bearing, named) <= bearing_difference( reciprocal, named) { Some(bearing) } else { Some(reciprocal) }
        }
        _ => Some(bearing)
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct PatternResult {
    /// completed state segments, indices relative to the classified window
    pub events: Vec<FlightEvent>,
    /// indices of samples without valid transition
    pub anomalies: Vec<usize>,
    /// the state the window ended in and the index it was entered at
    pub last_state: (PhaseState,usize),
}

impl PatternResult {
    pub fn states (&self)->Vec<PhaseState> {
        self.events.iter().filter_map(|e| if let EventKind::Pattern(s) = e.kind { Some(s) } else { None }).collect()
    }
}

pub struct PatternClassifier<'a> {
    cfg: &'a PatternConfig,
    runway_bearing: f64,
}

impl<'a> PatternClassifier<'a> {
    pub fn new (cfg: &'a PatternConfig, runway_bearing: f64)->Self {
        PatternClassifier { cfg, runway_bearing }
    }

    /// run the state machine over one leg. Classification starts in `Upwind` and simply stops at the end
    /// of the window, the last (still open) segment does not produce an event
    pub fn classify (&self, lat: &[f64], lon: &[f64])->PatternResult {
        let n = lat.len().min( lon.len());
        let mut events: Vec<FlightEvent> = Vec::new();
        let mut anomalies: Vec<usize> = Vec::new();
        let mut state = Upwind;
        let mut seg_start = 0;

        for i in 1..n {
            let p0 = LatLon::new( lat[i-1], lon[i-1]);
            let p1 = LatLon::new( lat[i], lon[i]);
            if !p0.is_defined() || !p1.is_defined() || p0 == p1 {
                continue // no ground track for this sample
            }

            let diff = bearing_difference( p0.bearing_to( &p1), self.runway_bearing);
            match transition( state, self.cfg.band(diff)) {
                Stay => {}
                To(next) => {
                    events.push( FlightEvent::new( EventKind::Pattern(state), seg_start, i-1));
                    state = next;
                    seg_start = i;
                }
                Via(turn,next) => {
                    events.push( FlightEvent::new( EventKind::Pattern(state), seg_start, i-1));
                    events.push( FlightEvent::new( EventKind::Pattern(turn), i-1, i));
                    state = next;
                    seg_start = i;
                }
                Unexpected => {
                    debug!("no pattern transition from {state} at sample {i} (bearing difference {diff:.1})");
                    anomalies.push(i);
                }
            }
        }

        if !anomalies.is_empty() {
            warn!("{} samples without valid pattern transition", anomalies.len());
        }
        PatternResult { events, anomalies, last_state: (state, seg_start) }
    }
}
