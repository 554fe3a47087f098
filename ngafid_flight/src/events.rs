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

use std::fmt;
use chrono::NaiveDateTime;
use serde::{Serialize,Deserialize};

use crate::pattern::PhaseState;

/// events do not carry a computed severity yet
pub const PLACEHOLDER_SEVERITY: f64 = 1.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum EventKind {
    /// one segment of the traffic pattern
    Pattern(PhaseState),
    /// roll limit exceeded below the turn-to-final gate
    RollExceedance,
    CenterlineExceedance,
    DescentExceedance,
    SpeedExceedance,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Pattern(state) => write!( f, "pattern {state}"),
            EventKind::RollExceedance => write!( f, "roll exceedance"),
            EventKind::CenterlineExceedance => write!( f, "centerline exceedance"),
            EventKind::DescentExceedance => write!( f, "descent exceedance"),
            EventKind::SpeedExceedance => write!( f, "speed exceedance"),
        }
    }
}

/// an index range of a flight that is tagged with an event kind. Indices are inclusive
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct FlightEvent {
    pub kind: EventKind,
    pub start_index: usize,
    pub end_index: usize,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub severity: f64,
}

impl FlightEvent {
    pub fn new (kind: EventKind, start_index: usize, end_index: usize)->Self {
        FlightEvent { kind, start_index, end_index, start_time: None, end_time: None, severity: PLACEHOLDER_SEVERITY }
    }

    /// shift indices that are relative to a window starting at `offset` into flight indices
    pub fn offset (mut self, offset: usize)->Self {
        self.start_index += offset;
        self.end_index += offset;
        self
    }
}

impl fmt::Display for FlightEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} [{}..{}]", self.kind, self.start_index, self.end_index)
    }
}

/// group sorted indices into inclusive runs of consecutive values
pub fn index_runs (indices: &[usize])->Vec<(usize,usize)> {
    let mut runs: Vec<(usize,usize)> = Vec::new();
    for &i in indices {
        match runs.last_mut() {
            Some((_,end)) if *end + 1 == i => *end = i,
            _ => runs.push( (i,i))
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_runs () {
        assert_eq!( index_runs( &[]), vec![]);
        assert_eq!( index_runs( &[3]), vec![(3,3)]);
        assert_eq!( index_runs( &[1,2,3,7,8,10]), vec![(1,3),(7,8),(10,10)]);
    }
}
