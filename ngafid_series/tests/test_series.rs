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

use proptest::prelude::*;
use ngafid_series::{NumericSeries, TextSeries, Registry, SeriesError, codec};

fn same_values (a: &[f64], b: &[f64])->bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x,y)| (x.is_nan() && y.is_nan()) || x.to_bits() == y.to_bits())
}

fn naive_stats (xs: &[f64])->(usize,f64,f64,f64) {
    let valid: Vec<f64> = xs.iter().copied().filter(|x| !x.is_nan()).collect();
    if valid.is_empty() {
        (0, f64::NAN, f64::NAN, f64::NAN)
    } else {
        let min = valid.iter().copied().fold( f64::INFINITY, f64::min);
        let max = valid.iter().copied().fold( f64::NEG_INFINITY, f64::max);
        (valid.len(), min, valid.iter().sum::<f64>() / valid.len() as f64, max)
    }
}

fn sample_values()->impl Strategy<Value=Vec<f64>> {
    prop::collection::vec( prop_oneof![ 4 => -1.0e5..1.0e5f64, 1 => Just(f64::NAN)], 0..500)
}

// run with "cargo test test_append -- --nocapture"

#[test]
fn test_append () {
    let mut s = NumericSeries::new( "AltB", "ft Baro");
    assert_eq!( s.len(), 0);
    assert_eq!( s.valid_count(), 0);
    assert!( s.min().is_nan() && s.avg().is_nan() && s.max().is_nan());

    for v in [100.0, f64::NAN, 300.0, 200.0] { s.push(v) }
    println!("{s}");

    assert_eq!( s.len(), 4);
    assert_eq!( s.valid_count(), 3);
    assert_eq!( s.min(), 100.0);
    assert_eq!( s.max(), 300.0);
    assert!( (s.avg() - 200.0).abs() < 1e-9);
    assert!( s.get(1).is_nan());
    assert_eq!( s[3], 200.0);
    assert!( s.try_get(4).is_err());
}

#[test]
#[should_panic]
fn test_out_of_range () {
    let s = NumericSeries::from_values( "IAS", "knots", [1.0, 2.0]);
    s.get(2);
}

#[test]
fn test_slice () {
    let s = NumericSeries::from_values( "IAS", "knots", (0..10).map(|i| i as f64));

    assert_eq!( s.slice(2,5), &[2.0, 3.0, 4.0]);
    assert_eq!( s.slice(4,4), &[4.0]); // from == to yields a single element

    let sub = s.sub_series(5,8);
    println!("{sub}");
    assert_eq!( sub.name(), "IAS");
    assert_eq!( sub.values(), &[5.0, 6.0, 7.0]);
    assert_eq!( sub.min(), 5.0);
    assert_eq!( sub.max(), 7.0);

    let t = TextSeries::from_values( "Lcl Time", "hh:mm:ss", ["a", "", "c", "d"]);
    assert_eq!( t.valid_count(), 3);
    assert_eq!( t.slice(1,1), &["".to_string()]);
    assert_eq!( t.sub_series(1,3).valid_count(), 1);
}

#[test]
fn test_lag_lead () {
    let s = NumericSeries::from_values( "HDG", "degrees", [10.0, 20.0, 30.0, 40.0]);

    let lag = s.lag(1);
    assert_eq!( lag.name(), "HDG_lag1");
    assert!( !lag.persist());
    assert!( lag.get(0).is_nan());
    assert_eq!( &lag.values()[1..], &[10.0, 20.0, 30.0]);

    let lead = s.lead(2);
    assert_eq!( lead.name(), "HDG_lead2");
    assert_eq!( &lead.values()[..2], &[30.0, 40.0]);
    assert!( lead.get(2).is_nan() && lead.get(3).is_nan());

    // shifting by more than the length only leaves NaNs
    assert_eq!( s.lag(10).valid_count(), 0);
    assert_eq!( s.lead(10).valid_count(), 0);
}

#[test]
fn test_all_invalid_round_trip () {
    let s = NumericSeries::from_values( "OAT", "degrees C", vec![f64::NAN; 1000]);
    let data = s.encode().unwrap();
    let d = NumericSeries::decode( "OAT", "degrees C", &data, s.len()).unwrap();
    assert_eq!( d.len(), 1000);
    assert_eq!( d.valid_count(), 0);
    assert!( d.min().is_nan());

    let t = TextSeries::from_values( "Lcl Date", "yyyy-mm-dd", vec![""; 100]);
    let data = t.encode().unwrap();
    let d = TextSeries::decode( "Lcl Date", "yyyy-mm-dd", &data, t.len()).unwrap();
    assert_eq!( d.len(), 100);
    assert_eq!( d.valid_count(), 0);
}

#[test]
fn test_records () {
    let registry = Registry::new();

    let s = NumericSeries::from_values( "Stall Index", "index", [0.1, f64::NAN, 0.5]);
    let rec = s.to_record( &registry).unwrap();
    println!("{rec:?}");
    assert_eq!( rec.length, 3);
    assert_eq!( rec.valid_count, 2);
    assert_eq!( rec.min, Some(0.1));
    assert_eq!( rec.max, Some(0.5));

    let restored = NumericSeries::from_record( &rec, &registry).unwrap();
    assert_eq!( restored.name(), "Stall Index");
    assert_eq!( restored.data_type(), "index");
    assert!( same_values( restored.values(), s.values()));

    let empty = NumericSeries::from_values( "LOC-I Index", "index", vec![f64::NAN; 3]).to_record( &registry).unwrap();
    assert_eq!( (empty.min, empty.avg, empty.max), (None, None, None));

    let t = TextSeries::from_values( "NearestAirport", "IATA Code", ["", "KAGC", "KAGC"]);
    let rec = t.to_record( &registry).unwrap();
    let restored = TextSeries::from_record( &rec, &registry).unwrap();
    assert_eq!( restored.values(), t.values());
    assert_eq!( restored.valid_count(), 2);

    // corrupted record contents are detected
    let mut bad = rec.clone();
    bad.valid_count = 3;
    assert!( TextSeries::from_record( &bad, &registry).is_err());
}

#[test]
fn test_undersized_buffer () {
    // incompressible data with a tiny initial buffer forces several retries
    let raw: Vec<u8> = (0..20_000u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8).collect();
    let compressed = codec::deflate_with_capacity( &raw, 1).unwrap();
    let restored = codec::inflate( &compressed, 0).unwrap();
    println!("{} -> {} bytes", raw.len(), compressed.len());
    assert_eq!( raw, restored);

    assert!( codec::inflate( &compressed[..compressed.len()/2], raw.len()).is_err());
}

#[test]
fn test_corrupt_lengths () {
    // a string count that the payload cannot possibly hold
    let data = codec::deflate( &u32::MAX.to_le_bytes()).unwrap();
    let res = codec::decode_strings( &data, 0);
    println!("{res:?}");
    assert!( matches!( res, Err(SeriesError::Corrupt(_))));

    // a string length past the end of the payload
    let mut raw = 1u32.to_le_bytes().to_vec();
    raw.extend_from_slice( &u32::MAX.to_le_bytes());
    let data = codec::deflate( &raw).unwrap();
    assert!( matches!( codec::decode_strings( &data, 1), Err(SeriesError::Corrupt(_))));

    // absurd row counts from a stored record only affect the size hint
    let data = codec::encode_f64s( &[1.0, 2.0]).unwrap();
    assert_eq!( codec::decode_f64s( &data, usize::MAX).unwrap(), vec![1.0, 2.0]);
    let data = codec::encode_strings( &["a", "bc"]).unwrap();
    assert_eq!( codec::decode_strings( &data, usize::MAX).unwrap(), vec!["a".to_string(), "bc".to_string()]);
}

proptest! {
    #[test]
    fn stats_match_full_pass (xs in sample_values()) {
        let s = NumericSeries::from_values( "x", "y", xs.iter().copied());
        let (n, min, avg, max) = naive_stats( &xs);

        prop_assert_eq!( s.len(), xs.len());
        prop_assert_eq!( s.valid_count(), n);
        if n == 0 {
            prop_assert!( s.min().is_nan() && s.avg().is_nan() && s.max().is_nan());
        } else {
            prop_assert_eq!( s.min(), min);
            prop_assert_eq!( s.max(), max);
            prop_assert!( (s.avg() - avg).abs() <= 1e-6);
        }
    }

    #[test]
    fn numeric_round_trip (xs in sample_values()) {
        let s = NumericSeries::from_values( "x", "y", xs.iter().copied());
        let data = s.encode().unwrap();
        let d = NumericSeries::decode( "x", "y", &data, s.len()).unwrap();

        prop_assert!( same_values( d.values(), s.values()));
        prop_assert_eq!( d.valid_count(), s.valid_count());
    }

    #[test]
    fn text_round_trip (xs in prop::collection::vec( prop_oneof![ Just(String::new()), "[a-zA-Z0-9 :/-]{1,12}", "\\PC{0,6}"], 0..200)) {
        let t = TextSeries::from_values( "x", "y", xs.iter().cloned());
        let data = t.encode().unwrap();
        let d = TextSeries::decode( "x", "y", &data, t.len()).unwrap();

        prop_assert_eq!( d.values(), t.values());
        prop_assert_eq!( d.valid_count(), t.valid_count());
    }

    #[test]
    fn lag_then_lead (xs in prop::collection::vec( -1.0e3..1.0e3f64, 0..100), n in 0usize..20) {
        let s = NumericSeries::from_values( "x", "y", xs.iter().copied());
        let r = s.lag(n).lead(n);
        let len = xs.len();

        prop_assert_eq!( r.len(), len);
        for i in 0..len {
            if i >= n && i + n < len {
                prop_assert_eq!( r.get(i), xs[i]);
            } else if i + n >= len {
                prop_assert!( r.get(i).is_nan());
            }
        }
    }
}
