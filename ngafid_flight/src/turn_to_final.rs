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

//! approach analysis from the turn-to-final gate down to touchdown

use serde::{Serialize,Deserialize};
use tracing::debug;
use ngafid_common::{abs, asin, deg, sqrt, pow2, geo::{LatLon, Segment}, geo_constants::FEET_PER_NM};

use crate::{
    config::TurnToFinalConfig,
    events::{EventKind, FlightEvent, index_runs},
};

/// the series of one approach, all sliced to the same window
#[derive(Debug,Clone,Copy)]
pub struct ApproachWindow<'a> {
    pub agl: &'a [f64],
    /// MSL altitude if the flight has it, AGL otherwise
    pub altitude: &'a [f64],
    pub roll: &'a [f64],
    pub lat: &'a [f64],
    pub lon: &'a [f64],
    pub airspeed: Option<&'a [f64]>,
}

impl<'a> ApproachWindow<'a> {
    pub fn len (&self)->usize { self.agl.len() }
    pub fn position (&self, i: usize)->LatLon { LatLon::new( self.lat[i], self.lon[i]) }
}

/// approach analysis results. Sample indices are relative to the window start
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct TurnToFinal {
    pub airport: String,
    pub runway: String,
    /// flight index of the first window sample
    pub start_index: usize,
    /// flight index past the last window sample
    pub end_index: usize,
    pub runway_altitude: f64,
    pub loc_exceedences: Vec<usize>,
    pub center_line_exceedences: Vec<usize>,
    pub self_defined_glide_angle: f64,
    pub self_defined_glide_path_deviations: Vec<f64>,
    pub optimal_descent_warnings: Vec<usize>,
    pub optimal_descent_exceedences: Vec<usize>,
    pub speed_warnings: Vec<usize>,
    pub speed_exceedences: Vec<usize>,
    pub max_roll: f64,
    /// distance of each sample to the touchdown point
    pub distance_from_runway: Vec<f64>,
}

impl TurnToFinal {
    pub fn analyze (airport: &str, runway: &str, centerline: &Segment, start_index: usize, w: &ApproachWindow,
                    runway_altitude: f64, approach_speed_kt: f64, cfg: &TurnToFinalConfig)->Self {
        let (optimal_descent_warnings, optimal_descent_exceedences) = descent_conformance( w, cfg);
        let (speed_warnings, speed_exceedences) = match w.airspeed {
            Some(speed) => conformance( speed, |_| approach_speed_kt, cfg.speed_warning_kt, cfg.speed_error_kt),
            None => (Vec::new(), Vec::new())
        };

        TurnToFinal {
            airport: airport.to_string(),
            runway: runway.to_string(),
            start_index,
            end_index: start_index + w.len(),
            runway_altitude,
            loc_exceedences: loc_exceedences( w.agl, w.roll, runway_altitude, cfg),
            center_line_exceedences: centerline_exceedences( w.lat, w.lon, centerline, cfg),
            self_defined_glide_angle: self_defined_glide_angle( w),
            self_defined_glide_path_deviations: self_defined_glide_path_deviations( w),
            optimal_descent_warnings,
            optimal_descent_exceedences,
            speed_warnings,
            speed_exceedences,
            max_roll: w.roll.iter().map(|r| r.abs()).filter(|r| !r.is_nan()).fold( f64::NAN, f64::max),
            distance_from_runway: distances_to_touchdown( w),
        }
    }

    /// exceedance index runs as flight events
    pub fn events (&self)->Vec<FlightEvent> {
        let mut events = Vec::new();
        for (kind, indices) in [
            (EventKind::RollExceedance, &self.loc_exceedences),
            (EventKind::CenterlineExceedance, &self.center_line_exceedences),
            (EventKind::DescentExceedance, &self.optimal_descent_exceedences),
            (EventKind::SpeedExceedance, &self.speed_exceedences),
        ] {
            for (start,end) in index_runs( indices) {
                events.push( FlightEvent::new( kind, start, end).offset( self.start_index));
            }
        }
        events
    }
}

/// the `[from,to)` window of an approach that reached its lowest point at `min_index`: `to` is the last
/// sample above touchdown height, `from` the last sample above the gate before it. Approaches that do not
/// descend enough or never get close to the ground are rejected
pub fn find_approach_window (agl: &[f64], min_index: usize, cfg: &TurnToFinalConfig)->Option<(usize,usize)> {
    if min_index >= agl.len() { return None }

    let walk_back = |start: usize, threshold: f64| {
        let mut i = start as isize;
        while i >= 0 && !(agl[i as usize] > threshold) { i -= 1 }
        i.max(0) as usize
    };

    let to = walk_back( min_index, cfg.touchdown_agl_ft);
    let from = walk_back( min_index, cfg.window_start_agl_ft);
    if from >= to { return None }

    let window = &agl[from..to];
    if window.iter().any(|a| a.is_nan()) { return None }

    let min = window.iter().copied().fold( f64::INFINITY, f64::min);
    let max = window.iter().copied().fold( f64::NEG_INFINITY, f64::max);
    if max - min < cfg.min_altitude_span_ft || min > cfg.max_min_altitude_ft {
        debug!("rejecting approach window [{from},{to}) with altitude range {min}..{max}");
        return None
    }
    Some((from,to))
}

/// samples below the gate height above the runway with excessive bank angle
pub fn loc_exceedences (agl: &[f64], roll: &[f64], runway_altitude: f64, cfg: &TurnToFinalConfig)->Vec<usize> {
    agl.iter().zip(roll).enumerate()
        .filter(|(_,(a,r))| (*a - runway_altitude) < cfg.gate_agl_ft && r.abs() > cfg.max_roll_deg)
        .map(|(i,_)| i)
        .collect()
}

/// samples that are further than the tolerance away from the extended runway centerline
pub fn centerline_exceedences (lat: &[f64], lon: &[f64], centerline: &Segment, cfg: &TurnToFinalConfig)->Vec<usize> {
    let extended = centerline.extended( cfg.centerline_extension);
    lat.iter().zip(lon).enumerate()
        .filter(|(_,(lat,lon))| extended.distance_ft( &LatLon::new( **lat, **lon)) > cfg.centerline_tolerance_ft)
        .map(|(i,_)| i)
        .collect()
}

fn distances_to_touchdown (w: &ApproachWindow)->Vec<f64> {
    if w.len() == 0 { return Vec::new() }
    let touchdown = w.position( w.len() - 1);
    (0..w.len()).map(|i| w.position(i).distance_ft( &touchdown)).collect()
}

/// angle of the right triangle between the gate point A, the touchdown point C and B below A at touchdown
/// altitude: `asin(BC / AC)` in degrees
pub fn self_defined_glide_angle (w: &ApproachWindow)->f64 {
    if w.len() < 2 { return f64::NAN }
    let last = w.len() - 1;

    let horizontal = w.position(0).distance_ft( &w.position(last));
    let vertical = w.altitude[0] - w.altitude[last];
    let hypotenuse = sqrt( pow2(vertical) + pow2(horizontal));
    if hypotenuse == 0.0 { return f64::NAN }

    deg( asin( horizontal / hypotenuse))
}

/// expected minus actual altitude for a straight descent from the gate point to touchdown
pub fn self_defined_glide_path_deviations (w: &ApproachWindow)->Vec<f64> {
    if w.len() < 2 { return Vec::new() }
    let last = w.len() - 1;
    let touchdown = w.position(last);

    let bc = w.position(0).distance_ft( &touchdown);
    let descent_per_ft = (w.altitude[0] - w.altitude[last]) / bc;

    (0..w.len()).map(|i| {
        let expected = w.altitude[last] + descent_per_ft * w.position(i).distance_ft( &touchdown);
        expected - w.altitude[i]
    }).collect()
}

/// deviation from the optimal descent profile (ft per nm) anchored at the gate point
pub fn descent_conformance (w: &ApproachWindow, cfg: &TurnToFinalConfig)->(Vec<usize>,Vec<usize>) {
    if w.len() < 2 { return (Vec::new(), Vec::new()) }
    let touchdown = w.position( w.len() - 1);
    let initial = w.position(0).distance_ft( &touchdown);
    let slope = cfg.optimal_descent_ft_per_nm / FEET_PER_NM;

    let expected = |i: usize| w.altitude[0] - slope * (initial - w.position(i).distance_ft( &touchdown));
    conformance( w.altitude, expected, cfg.descent_warning_ft, cfg.descent_error_ft)
}

/// split the indices of `actual` into (warnings,exceedances) by absolute deviation from `expected`.
/// Exceedances are not reported as warnings. NaN samples are ignored
pub fn conformance (actual: &[f64], expected: impl Fn(usize)->f64, warning: f64, error: f64)->(Vec<usize>,Vec<usize>) {
    let mut warnings = Vec::new();
    let mut exceedences = Vec::new();

    for (i,v) in actual.iter().enumerate() {
        let d = abs( v - expected(i));
        if d > error { exceedences.push(i) }
        else if d > warning { warnings.push(i) }
    }
    (warnings, exceedences)
}
