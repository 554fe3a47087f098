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

use ngafid_flight::{
    config::PhaseConfig,
    phases::{FlightPhase, classify_phases, phase_series},
};
use FlightPhase::*;

// run with "cargo test test_phases -- --nocapture"

#[test]
fn test_departure_and_arrival () {
    let cfg = PhaseConfig::default();
    let mut agl: Vec<f64> = Vec::new();
    let mut gs: Vec<f64> = Vec::new();
    let mut rpm: Vec<f64> = Vec::new();
    let mut add = |a: f64, g: f64, r: f64| { agl.push(a); gs.push(g); rpm.push(r); };

    for _ in 0..10 { add( 0.0, 10.0, 1000.0) }                    // taxi  0..10
    for k in 0..15 { add( 2.0 * k as f64, 50.0, 2400.0) }         // takeoff run 10..25
    for k in 0..10 { add( 50.0 + 60.0 * k as f64, 75.0, 2400.0) } // climb 25..35, reaches 590
    for _ in 0..10 { add( 3000.0, 110.0, 2300.0) }                // cruise 35..45
    for k in 0..5 { add( 500.0 - 110.0 * k as f64, 70.0, 1800.0) } // descent/landing 45..50
    for _ in 0..5 { add( 0.0, 0.0, 800.0) }                       // stopped 50..55

    let phases = classify_phases( &agl, &gs, Some(&rpm), &cfg);
    println!("{phases:?}");

    assert!( phases[0..10].iter().all(|p| *p == Taxi));
    assert!( phases[10..25].iter().all(|p| *p == Takeoff));
    assert!( phases[25..35].iter().all(|p| *p == Climb));
    assert!( phases[35..45].iter().all(|p| *p == Cruise));
    assert_eq!( phases[45], Descent);  // 500
    assert_eq!( phases[48], Descent);  // 170
    assert_eq!( phases[49], Landing);  // 60
    assert!( phases[50..55].iter().all(|p| *p == Ground));
}

#[test]
fn test_without_takeoff () {
    let cfg = PhaseConfig::default();
    let agl = [f64::NAN, 800.0, 300.0, 50.0, 3.0, 3.0];
    let gs = [0.0, 100.0, 80.0, 60.0, 20.0, 0.0];

    let phases = classify_phases( &agl, &gs, None, &cfg);
    assert_eq!( phases, vec![Unknown, Cruise, Descent, Landing, Landing, Ground]);
}

#[test]
fn test_touch_and_go () {
    let cfg = PhaseConfig::default();
    let mut agl = vec![300.0; 5];
    agl.extend( [0.0; 12]);
    agl.extend( [300.0; 5]);
    let gs = vec![0.0; agl.len()];

    let phases = classify_phases( &agl, &gs, None, &cfg);
    println!("{phases:?}");
    assert_eq!( phases[10], Ground);
    assert!( phases[11..17].iter().all(|p| *p == TouchAndGo));
    assert_eq!( phases[17], Descent);
}

#[test]
fn test_go_around () {
    let cfg = PhaseConfig::default();
    let mut agl: Vec<f64> = (0..14).map(|k| 300.0 - 20.0 * k as f64).collect(); // down to 40 at 13
    agl.extend( (14..45).map(|k| 40.0 + 10.0 * (k - 13) as f64));
    let gs = vec![0.0; agl.len()];

    let phases = classify_phases( &agl, &gs, None, &cfg);
    println!("{phases:?}");
    assert_eq!( phases[12], Landing);
    assert!( phases[13..43].iter().all(|p| *p == GoAround));
    assert_ne!( phases[43], GoAround);
}

#[test]
fn test_phase_series () {
    let series = phase_series( &[Taxi, Takeoff, TouchAndGo]);
    assert_eq!( series.name(), "Flight Phase");
    assert_eq!( series.values(), &["Taxi".to_string(), "Takeoff".to_string(), "TouchAndGo".to_string()]);
}
