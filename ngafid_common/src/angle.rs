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

/// normalize degrees into [-180,180]
#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/// normalize degrees into [0,360)
#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// absolute difference of two directions in degrees, folded into [0,180]
#[inline]
pub fn bearing_difference (a: f64, b: f64) -> f64 {
    let d = normalize_360(a - b);
    if d > 180.0 { 360.0 - d } else { d }
}

/// heading change between two consecutive heading samples, in [0,180].
/// This is the yaw rate formula for 1Hz data: `180 - |180 - (|h1 - h0| mod 360)|`
#[inline]
pub fn heading_change (h1: f64, h0: f64) -> f64 {
    180.0 - (180.0 - ((h1 - h0).abs() % 360.0)).abs()
}
