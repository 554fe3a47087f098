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

//! per-flight sample storage: typed, named, append-only columns with incrementally maintained
//! statistics, their compressed persisted form and the registry that maps names to ids

pub mod errors;
pub mod codec;
pub mod registry;

mod numeric;
pub use numeric::{NumericSeries, NumericSeriesRecord, lag_name, lead_name};

mod text;
pub use text::{TextSeries, TextSeriesRecord};

pub use registry::{NameTable, Registry};
pub use errors::{SeriesError, Result};
