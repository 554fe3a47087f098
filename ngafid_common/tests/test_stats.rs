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
use ngafid_common::MinMaxAvg;

#[test]
fn test_basic () {
    let mut mma = MinMaxAvg::new();
    assert!( mma.min.is_nan() && mma.max.is_nan() && mma.avg.is_nan());

    for x in [3.0, f64::NAN, 1.0, 5.0, f64::NAN] { mma.add(x); }
    println!("{mma:?}");

    assert_eq!( mma.n, 3);
    assert_eq!( mma.min, 1.0);
    assert_eq!( mma.max, 5.0);
    assert!( (mma.avg - 3.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn incremental_matches_full_pass (xs in prop::collection::vec( prop_oneof![ 4 => -1.0e6..1.0e6f64, 1 => Just(f64::NAN)], 0..300)) {
        let mut mma = MinMaxAvg::new();
        for x in &xs { mma.add(*x); }

        let valid: Vec<f64> = xs.iter().copied().filter(|x| !x.is_nan()).collect();
        prop_assert_eq!( mma.n, valid.len());

        if valid.is_empty() {
            prop_assert!( mma.min.is_nan() && mma.max.is_nan() && mma.avg.is_nan());
        } else {
            let min = valid.iter().copied().fold( f64::INFINITY, f64::min);
            let max = valid.iter().copied().fold( f64::NEG_INFINITY, f64::max);
            let avg = valid.iter().sum::<f64>() / valid.len() as f64;

            prop_assert_eq!( mma.min, min);
            prop_assert_eq!( mma.max, max);
            let max_abs = valid.iter().fold( 0.0f64, |acc,x| acc.max( x.abs()));
            prop_assert!( (mma.avg - avg).abs() <= 1e-9 * (1.0 + max_abs));
            let eps = 1e-9 * (1.0 + max_abs);
            prop_assert!( mma.min <= mma.avg + eps && mma.avg <= mma.max + eps);
        }
    }
}
