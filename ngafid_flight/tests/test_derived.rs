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

use std::sync::Arc;
use ngafid_series::NumericSeries;
use ngafid_flight::{
    Flight, FlightError, FlightProcessor, FlightStatus, FlightWarning, ProcessingConfig,
    config::DerivedConfig,
    derived::{CalcOutcome, Dependency, DerivedGraph, DerivedSeriesSpec, standard_graph, calculations::*},
    parameters::*,
};

fn approx_eq (a: f64, b: f64, eps: f64)->bool { (a - b).abs() <= eps }

fn add (flight: &mut Flight, name: &str, values: &[f64]) {
    flight.add_numeric( NumericSeries::from_values( name, "", values.iter().copied())).unwrap();
}

/// five samples of a steady 600 ft/min climb at 60 kts in a 10 degree bank
fn climbing_flight (airframe: &str)->Flight {
    let mut flight = Flight::new( airframe, 5);
    add( &mut flight, ALT_B, &[1000.0, 1010.0, 1020.0, 1030.0, 1040.0]);
    add( &mut flight, IAS, &[60.0; 5]);
    add( &mut flight, BARO_A, &[29.92; 5]);
    add( &mut flight, OAT, &[15.0; 5]);
    add( &mut flight, PITCH, &[5.0; 5]);
    add( &mut flight, ROLL, &[10.0; 5]);
    add( &mut flight, HDG, &[90.0, 92.0, 94.0, 96.0, 98.0]);
    flight
}

fn outcome<'a> (outcomes: &'a [CalcOutcome], name: &str)->&'a CalcOutcome {
    outcomes.iter().find(|o| o.name() == name).unwrap()
}

// run with "cargo test test_derived_chain -- --nocapture"

#[test]
fn test_derived_chain () {
    let cfg = DerivedConfig::default();
    let graph = standard_graph( &cfg).unwrap();
    let names: Vec<&str> = graph.names().collect();
    println!("evaluation order: {names:?}");

    let mut flight = climbing_flight( CESSNA_172S);
    let outcomes = graph.evaluate( &mut flight).unwrap();
    for o in &outcomes { println!("{o:?}") }
    assert!( outcomes.iter().all(|o| o.is_computed()));

    let vspd = flight.numeric( VSPD_CALCULATED).unwrap();
    assert!( vspd[0].is_nan() && vspd[4].is_nan());
    for i in 1..4 { assert!( approx_eq( vspd[i], 600.0, 1e-9)) }
    assert!( vspd.persist());

    let cas = flight.numeric( CAS).unwrap();
    assert!( approx_eq( cas[2], 62.667, 1e-9));
    assert!( !cas.persist());

    let dr = flight.numeric( DENSITY_RATIO).unwrap();
    assert!( approx_eq( dr[2], 1.0, 1e-12));

    let tas = flight.numeric( TAS_FTMIN).unwrap()[2];
    assert!( approx_eq( tas, 62.667 * 6076.0 / 60.0, 1e-6));

    let aoa = flight.numeric( AOA_SIMPLE).unwrap()[2];
    assert!( approx_eq( aoa, 5.0 - (600.0 / tas).asin().to_degrees(), 1e-9));

    let stall = flight.numeric( STALL_INDEX).unwrap();
    assert!( approx_eq( stall[2], (aoa / 15.0).abs(), 1e-12));
    assert!( stall[0].is_nan()); // no vertical speed for the first sample
    assert!( stall.persist());

    let yaw = flight.numeric( YAW_RATE).unwrap();
    assert!( yaw[0].is_nan());
    assert!( approx_eq( yaw[2], 2.0, 1e-12));

    let coord = flight.numeric( COORDINATION_INDEX).unwrap()[2];
    let expected = ((10f64.to_radians().sin() * 32.2) - (tas / 60.0) * 2f64.to_radians()).abs() * 100.0 / 4.0;
    assert!( approx_eq( coord, expected.min(100.0), 1e-9));

    let loci = flight.numeric( LOCI_INDEX).unwrap();
    assert!( approx_eq( loci[2], stall[2] * coord / 100.0, 1e-12));
    assert!( loci.persist());
}

#[test]
fn test_index_caps () {
    assert_eq!( stall_index( 30.0, 15.0), 1.0);
    assert_eq!( stall_index( -7.5, 15.0), 0.5);
    assert!( stall_index( f64::NAN, 15.0).is_nan());

    assert_eq!( coordination_index( 90.0, 0.0, 0.0, 4.0), 100.0);
    assert!( coordination_index( 10.0, f64::NAN, 6000.0, 4.0).is_nan());

    assert_eq!( calibrated_airspeed( 80.0), 80.0);
    assert!( approx_eq( density_ratio( 29.92, 15.0, 29.92), 1.0, 1e-12));
}

#[test]
fn test_regression_slope () {
    assert!( approx_eq( regression_slope( &[0.0, 1.0, 2.0], &[100.0, 110.0, 120.0]), 10.0, 1e-12));
    assert!( approx_eq( vertical_speed( 1000.0, 1005.0, 1010.0, 7), 300.0, 1e-9));

    // missing neighbor sample
    assert!( vertical_speed( f64::NAN, 1005.0, 1010.0, 7).is_nan());
    // no x extent
    assert!( regression_slope( &[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_nan());
}

#[test]
fn test_missing_oat () {
    let mut flight = Flight::new( CESSNA_172S, 5);
    add( &mut flight, ALT_B, &[1000.0, 1010.0, 1020.0, 1030.0, 1040.0]);
    add( &mut flight, IAS, &[60.0; 5]);
    add( &mut flight, BARO_A, &[29.92; 5]);
    add( &mut flight, PITCH, &[5.0; 5]);
    add( &mut flight, ROLL, &[10.0; 5]);
    add( &mut flight, HDG, &[90.0; 5]);

    let processor = FlightProcessor::new( Arc::new( ProcessingConfig::default()), None).unwrap();
    let status = processor.process( &mut flight).unwrap();
    println!("{flight}");
    for w in flight.warnings() { println!("  {w}") }

    assert_eq!( status, FlightStatus::Warning);
    assert!( flight.warnings().contains( &FlightWarning::MissingDependency{
        calculation: DENSITY_RATIO.to_string(), missing: vec![OAT.to_string()]
    }));

    // everything downstream of the density ratio is skipped, vertical speed is not
    assert!( flight.has_numeric( VSPD_CALCULATED));
    assert!( flight.numeric( VSPD_CALCULATED).unwrap().persist());
    for name in [DENSITY_RATIO, TAS_FTMIN, AOA_SIMPLE, STALL_INDEX, COORDINATION_INDEX, LOCI_INDEX] {
        assert!( !flight.has_numeric( name), "{name} should not have been computed");
    }
}

#[test]
fn test_airframe_gating () {
    let graph = standard_graph( &DerivedConfig::default()).unwrap();
    let mut flight = climbing_flight( "Piper PA-28-181");
    let outcomes = graph.evaluate( &mut flight).unwrap();

    assert_eq!( outcome( &outcomes, CAS), &CalcOutcome::NotApplicable{ name: CAS.to_string() });
    assert_eq!( outcome( &outcomes, LOCI_INDEX), &CalcOutcome::NotApplicable{ name: LOCI_INDEX.to_string() });
    assert!( !flight.has_numeric( YAW_RATE));
    assert!( !flight.has_numeric( LOCI_INDEX));

    // true airspeed falls back to IAS
    let tas = flight.numeric( TAS_FTMIN).unwrap()[2];
    assert!( approx_eq( tas, 60.0 * 6076.0 / 60.0, 1e-6));
    assert!( flight.has_numeric( STALL_INDEX));
}

#[test]
fn test_present_series_not_recomputed () {
    let graph = standard_graph( &DerivedConfig::default()).unwrap();
    let mut flight = climbing_flight( CESSNA_172S);
    add( &mut flight, VSPD_CALCULATED, &[1.0; 5]);

    let outcomes = graph.evaluate( &mut flight).unwrap();
    assert_eq!( outcome( &outcomes, VSPD_CALCULATED), &CalcOutcome::Present{ name: VSPD_CALCULATED.to_string() });
    assert_eq!( flight.numeric( VSPD_CALCULATED).unwrap()[2], 1.0);
}

#[test]
fn test_graph_errors () {
    let spec = |name: &str, dep: &str| DerivedSeriesSpec::new( name, "", vec![ Dependency::series(dep)], |v,i| v[0][i]);

    match DerivedGraph::new( vec![ spec("A","B"), spec("B","A") ]) {
        Err(FlightError::GraphError(msg)) => println!("cycle: {msg}"),
        other => panic!("expected cycle error, got {other:?}")
    }
    assert!( matches!( DerivedGraph::new( vec![ spec("A","X"), spec("A","Y") ]), Err(FlightError::GraphError(_))));
    assert!( matches!( DerivedGraph::new( vec![ spec("A","A") ]), Err(FlightError::GraphError(_))));

    // declaration order does not matter
    let graph = DerivedGraph::new( vec![ spec("C","B"), spec("B","A") ]).unwrap();
    assert_eq!( graph.names().collect::<Vec<_>>(), vec!["B","C"]);
}

#[test]
fn test_lag_lead_cache () {
    let mut flight = climbing_flight( CESSNA_172S);
    let lag = flight.lag( ALT_B, 1).unwrap().values().to_vec();
    assert!( lag[0].is_nan());
    assert_eq!( &lag[1..], &[1000.0, 1010.0, 1020.0, 1030.0]);
    assert_eq!( flight.lag( ALT_B, 1).unwrap().name(), "AltB_lag1");

    let lead = flight.lead( ALT_B, 2).unwrap().values().to_vec();
    assert_eq!( &lead[..3], &[1020.0, 1030.0, 1040.0]);
    assert!( lead[3].is_nan() && lead[4].is_nan());

    assert!( flight.lag( "nope", 1).is_none());
}
