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

//! coarse per-sample flight phases from altitude, ground speed and engine RPM

use serde::{Serialize,Deserialize};
use tracing::debug;
use ngafid_series::TextSeries;

use crate::{config::PhaseConfig, parameters::{FLIGHT_PHASE, UNIT_PHASE}};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,strum::Display)]
pub enum FlightPhase {
    Ground,
    Taxi,
    Takeoff,
    Climb,
    Cruise,
    Descent,
    Landing,
    TouchAndGo,
    GoAround,
    Unknown,
}

fn is_takeoff_sample (i: usize, gs: &[f64], rpm: Option<&[f64]>, cfg: &PhaseConfig)->bool {
    let rpm_ok = rpm.map_or( true, |rpm| rpm[i].is_nan() || rpm[i] >= cfg.takeoff_min_rpm);
    rpm_ok && gs[i] > cfg.takeoff_min_gs_kt && gs[i] < cfg.takeoff_max_gs_kt
}

/// first index of `cfg.takeoff_samples` consecutive samples that satisfy the takeoff run criteria
fn find_takeoff (gs: &[f64], rpm: Option<&[f64]>, cfg: &PhaseConfig)->Option<usize> {
    let mut run = 0;
    for i in 0..gs.len() {
        if is_takeoff_sample( i, gs, rpm, cfg) {
            run += 1;
            if run == cfg.takeoff_samples { return Some(i + 1 - run) }
        } else {
            run = 0;
        }
    }
    None
}

fn altitude_phase (agl: f64, gs: f64, cfg: &PhaseConfig)->FlightPhase {
    if agl.is_nan() { FlightPhase::Unknown }
    else if agl >= cfg.climb_agl_ft { FlightPhase::Cruise }
    else if agl >= cfg.landing_agl_ft { FlightPhase::Descent }
    else if agl > cfg.ground_agl_ft { FlightPhase::Landing }
    else if gs <= 0.0 { FlightPhase::Ground }
    else { FlightPhase::Landing }
}

pub fn classify_phases (agl: &[f64], gs: &[f64], rpm: Option<&[f64]>, cfg: &PhaseConfig)->Vec<FlightPhase> {
    let n = agl.len().min( gs.len());
    let mut phases = vec![FlightPhase::Unknown; n];
    let mut i = 0;

    if let Some(t) = find_takeoff( &gs[..n], rpm, cfg) {
        for p in &mut phases[..t] { *p = FlightPhase::Taxi }
        i = (t + cfg.takeoff_samples).min(n);
        for p in &mut phases[t..i] { *p = FlightPhase::Takeoff }

        while i < n && !(agl[i] >= cfg.climb_agl_ft) {
            phases[i] = FlightPhase::Climb;
            i += 1;
        }
    }

    for k in i..n {
        phases[k] = altitude_phase( agl[k], gs[k], cfg);
    }

    mark_touch_and_goes( agl, &mut phases, cfg);
    mark_go_arounds( agl, &mut phases, cfg);
    phases
}

/// a stretch of at least `tng_min_ground_samples` on the ground between two climbs above `tng_climb_agl_ft`.
/// The second half of the ground stretch up to the climb is labeled as touch-and-go
fn mark_touch_and_goes (agl: &[f64], phases: &mut [FlightPhase], cfg: &PhaseConfig) {
    let n = phases.len();
    let mut was_airborne = false;
    let mut i = 0;

    while i < n {
        if agl[i] > cfg.tng_climb_agl_ft { was_airborne = true }

        if was_airborne && agl[i] < cfg.tng_ground_agl_ft {
            let start = i;
            while i < n && agl[i] < cfg.tng_ground_agl_ft { i += 1 }
            let end = i; // exclusive

            if end - start >= cfg.tng_min_ground_samples {
                if let Some(climb) = (end..n).find(|k| agl[*k] > cfg.tng_climb_agl_ft) {
                    let mid = start + (end - start) / 2;
                    debug!("touch and go at {mid}");
                    for p in &mut phases[mid..climb] { *p = FlightPhase::TouchAndGo }
                    i = climb;
                    continue;
                }
            }
        }
        i += 1;
    }
}

/// a low altitude valley without touchdown that is followed by a sustained climb
fn mark_go_arounds (agl: &[f64], phases: &mut [FlightPhase], cfg: &PhaseConfig) {
    let n = phases.len();
    let w = cfg.ga_window_samples;
    let mut i = 1;

    while i + 1 < n {
        let a = agl[i];
        let is_valley = a > cfg.ground_agl_ft && a < cfg.ga_valley_max_agl_ft && a <= agl[i-1] && a <= agl[i+1];

        if is_valley {
            let ahead = &agl[i+1..(i + 1 + w).min(n)];
            let max_climb = ahead.iter().copied().fold( f64::NEG_INFINITY, f64::max) - a;
            let sustained = ahead.iter().filter(|x| **x > a + 10.0).count();
            let around = &agl[i.saturating_sub(w)..(i + w + 1).min(n)];
            let landed = around.iter().any(|x| *x <= cfg.ground_agl_ft);

            if max_climb >= cfg.ga_min_climb_ft && sustained >= cfg.ga_sustain_samples && !landed {
                debug!("go around at {i}");
                let end = (i + w).min(n);
                for p in &mut phases[i..end] {
                    if *p != FlightPhase::TouchAndGo { *p = FlightPhase::GoAround }
                }
                i = end;
                continue;
            }
        }
        i += 1;
    }
}

pub fn phase_series (phases: &[FlightPhase])->TextSeries {
    TextSeries::from_values( FLIGHT_PHASE, UNIT_PHASE, phases.iter().map(|p| p.to_string()))
}
