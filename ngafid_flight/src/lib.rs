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

//! flight telemetry processing: derived stall and loss-of-control series, airport proximity,
//! itineraries, traffic pattern and turn-to-final analysis over recorded flights

pub mod errors;
pub use errors::{FlightError, FlightWarning, Result};

pub mod parameters;
pub mod config;
pub use config::{ProcessingConfig, load_config};

pub mod flight;
pub use flight::{Flight, FlightStatus, Shift, SeriesRef};

pub mod derived;
pub mod airports;
pub mod proximity;
pub mod itinerary;
pub mod events;
pub mod pattern;
pub mod turn_to_final;
pub mod phases;
pub mod ingest;

pub mod storage;
pub use storage::{FlightRecord, FlightStorage, MemoryStorage};

mod process;
pub use process::FlightProcessor;
