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

use ngafid_common::geo::{LatLon, Segment};
use ngafid_flight::{
    config::TurnToFinalConfig,
    events::EventKind,
    turn_to_final::*,
};

fn approx_eq (a: f64, b: f64, eps: f64)->bool { (a - b).abs() <= eps }

const THRESHOLD: LatLon = LatLon { lat: 47.95, lon: -97.18 };

fn centerline ()->Segment { Segment::new( THRESHOLD, THRESHOLD.destination( 0.0, 5000.0)) }

/// positions on the extended centerline, `dist_ft` south of the threshold, shifted east by `offset_ft`
fn positions (dists_ft: &[f64], offset_ft: f64)->(Vec<f64>,Vec<f64>) {
    dists_ft.iter().map(|d| {
        let p = THRESHOLD.destination( 180.0, *d);
        let p = if offset_ft > 0.0 { p.destination( 90.0, offset_ft) } else { p };
        (p.lat, p.lon)
    }).unzip()
}

// run with "cargo test test_loc_exceedences -- --nocapture"

#[test]
fn test_loc_exceedences () {
    let cfg = TurnToFinalConfig::default();
    let agl = [1000.0, 500.0, 150.0, 50.0, 10.0];
    let roll = [0.0, 0.0, 35.0, 0.0, 0.0];
    assert_eq!( loc_exceedences( &agl, &roll, 0.0, &cfg), vec![2]);

    // steep bank above the gate does not count
    let roll = [45.0, 0.0, -31.0, 0.0, 0.0];
    assert_eq!( loc_exceedences( &agl, &roll, 0.0, &cfg), vec![2]);

    // the gate is relative to the runway altitude
    let roll = [0.0, 35.0, 0.0, 0.0, 0.0];
    assert_eq!( loc_exceedences( &agl, &roll, 200.0, &cfg), vec![1]);
}

#[test]
fn test_centerline_exceedences () {
    let cfg = TurnToFinalConfig::default();
    let cl = centerline();
    let dists = [3000.0, 2000.0, 1000.0, 500.0, 0.0];

    let (lat,lon) = positions( &dists, 0.0);
    assert!( centerline_exceedences( &lat, &lon, &cl, &cfg).is_empty());

    let (lat,lon) = positions( &dists, 600.0);
    assert_eq!( centerline_exceedences( &lat, &lon, &cl, &cfg), vec![0,1,2,3,4]);

    let (lat,lon) = positions( &dists, 400.0);
    assert!( centerline_exceedences( &lat, &lon, &cl, &cfg).is_empty());
}

#[test]
fn test_find_approach_window () {
    let cfg = TurnToFinalConfig::default();
    let agl = [500.0, 450.0, 400.0, 350.0, 300.0, 250.0, 200.0, 150.0, 100.0, 50.0, 20.0, 10.0, 5.0, 0.0, 0.0];
    assert_eq!( find_approach_window( &agl, 13, &cfg), Some((1,10)));

    // never gets below 100 ft before touchdown height
    let agl = [500.0, 450.0, 400.0, 300.0, 200.0, 150.0, 120.0, 110.0, 10.0, 0.0];
    assert_eq!( find_approach_window( &agl, 9, &cfg), None);

    // not enough altitude change
    let agl = [80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 0.0];
    assert_eq!( find_approach_window( &agl, 6, &cfg), None);

    let agl = [500.0, 450.0, f64::NAN, 300.0, 200.0, 100.0, 50.0, 20.0, 0.0];
    assert_eq!( find_approach_window( &agl, 8, &cfg), None);

    assert_eq!( find_approach_window( &[], 0, &cfg), None);
}

#[test]
fn test_glide_angle () {
    let (lat,lon) = positions( &[1000.0, 500.0, 0.0], 0.0);
    let altitude = [1000.0, 500.0, 0.0];
    let roll = [0.0; 3];
    let w = ApproachWindow { agl: &altitude, altitude: &altitude, roll: &roll, lat: &lat, lon: &lon, airspeed: None };

    let angle = self_defined_glide_angle( &w);
    println!("glide angle: {angle}");
    assert!( approx_eq( angle, 45.0, 0.01));

    let deviations = self_defined_glide_path_deviations( &w);
    assert_eq!( deviations.len(), 3);
    assert!( deviations.iter().all(|d| d.abs() < 0.01));
}

#[test]
fn test_conformance () {
    let (warnings, exceedences) = conformance( &[65.0, 71.0, 80.0, 60.0, f64::NAN], |_| 65.0, 5.0, 10.0);
    assert_eq!( warnings, vec![1]);
    assert_eq!( exceedences, vec![2]);
}

#[test]
fn test_descent_conformance () {
    let cfg = TurnToFinalConfig::default();
    let dists: Vec<f64> = (0..7).map(|i| 6076.0 - 1000.0 * i as f64).collect();
    let (lat,lon) = positions( &dists, 0.0);

    // exactly 300 ft per nm towards the last sample
    let last = *dists.last().unwrap();
    let mut altitude: Vec<f64> = dists.iter().map(|d| 300.0 + (d - last) * 300.0 / 6076.0).collect();
    altitude[2] += 7.0;
    altitude[4] -= 20.0;
    let roll = vec![0.0; altitude.len()];

    let w = ApproachWindow { agl: &altitude, altitude: &altitude, roll: &roll, lat: &lat, lon: &lon, airspeed: None };
    let (warnings, exceedences) = descent_conformance( &w, &cfg);
    println!("warnings: {warnings:?}, exceedences: {exceedences:?}");
    assert_eq!( warnings, vec![2]);
    assert_eq!( exceedences, vec![4]);
}

#[test]
fn test_analyze () {
    let cfg = TurnToFinalConfig::default();
    let dists: Vec<f64> = (0..10).map(|i| 4500.0 - 500.0 * i as f64).collect();
    let (lat,lon) = positions( &dists, 0.0);
    let agl: Vec<f64> = (0..10).map(|i| 400.0 - 40.0 * i as f64).collect();
    let roll = [0.0, 10.0, 35.0, 36.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let speed = [65.0, 66.0, 72.0, 90.0, 65.0, 65.0, 65.0, 65.0, 65.0, 65.0];

    let w = ApproachWindow { agl: &agl, altitude: &agl, roll: &roll, lat: &lat, lon: &lon, airspeed: Some(&speed) };
    let ttf = TurnToFinal::analyze( "GFK", "36", &centerline(), 100, &w, 0.0, 65.0, &cfg);
    println!("{}", serde_json::to_string( &ttf).unwrap());

    assert_eq!( (ttf.start_index, ttf.end_index), (100, 110));
    assert_eq!( ttf.loc_exceedences, vec![2,3]);
    assert!( ttf.center_line_exceedences.is_empty());
    assert_eq!( ttf.speed_warnings, vec![2]);
    assert_eq!( ttf.speed_exceedences, vec![3]);
    assert_eq!( ttf.max_roll, 36.0);
    assert!( approx_eq( ttf.distance_from_runway[0], 4500.0, 0.5));
    assert_eq!( *ttf.distance_from_runway.last().unwrap(), 0.0);

    let events = ttf.events();
    for e in &events { println!("{e}") }
    let roll_events: Vec<(usize,usize)> = events.iter().filter(|e| e.kind == EventKind::RollExceedance).map(|e| (e.start_index, e.end_index)).collect();
    assert_eq!( roll_events, vec![(102,103)]);

    let json = serde_json::to_value( &ttf).unwrap();
    assert!( json.get("selfDefinedGlideAngle").is_some());
    assert!( json.get("centerLineExceedences").is_some());
}
