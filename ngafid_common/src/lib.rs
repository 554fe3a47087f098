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
#![allow(unused,uncommon_codepoints)]

use std::f64::consts::{PI as STD_PI};

pub mod angle;
pub mod geo_constants;
pub mod geo;

// syntactic sugar - this is just more readable in formulas
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn asin(x:f64) -> f64 {x.asin() }
#[inline(always)] pub fn atan2(y:f64,x:f64) -> f64 { y.atan2(x) }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }
#[inline(always)] pub fn abs(x:f64) -> f64 { x.abs() }
#[inline(always)] pub fn deg(x:f64)->f64 { x.to_degrees() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

/// NaN propagating version of `f64::min`, which would otherwise return the non-NaN operand
#[inline] pub fn min_nan (a: f64, b: f64)->f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

/// NaN propagating version of `f64::max`
#[inline] pub fn max_nan (a: f64, b: f64)->f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

pub const PI: f64 = STD_PI;

/// a simple incremental min/max/avg accumulator that ignores NaN observations.
/// `avg` is updated with the running-count weighted mean so that we never keep a sum around.
/// All values are NaN as long as there was no valid observation
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::NAN, max: f64::NAN, avg: f64::NAN } }

    /// add a new observation, returning false if it was not valid (NaN)
    pub fn add (&mut self, x: f64)->bool {
        if x.is_nan() { return false }

        if self.n > 0 {
            let n = self.n as f64;
            self.avg = self.avg * (n / (n + 1.0)) + x / (n + 1.0);
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
        self.n += 1;
        true
    }

    pub fn is_empty (&self)->bool { self.n == 0 }
}

impl Default for MinMaxAvg {
    fn default()->Self { MinMaxAvg::new() }
}
