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
/// geodetic and unit constants that have to be consistent throughout NGAFID crates.
/// Distances in flight analysis are computed in feet on a sphere with mean earth radius

/// mean earth radius in kilometers (IUGG, the radius `geo::Haversine` uses)
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0088;

pub const FEET_PER_KM: f64 = 3280.84;
pub const FEET_PER_METER: f64 = FEET_PER_KM / 1000.0;
pub const FEET_PER_MILE: f64 = 5280.0;

/// nautical mile as used in airspeed conversions
pub const FEET_PER_NM: f64 = 6076.0;

/// knots to feet per minute
pub const KNOTS_TO_FT_PER_MIN: f64 = FEET_PER_NM / 60.0;

/// standard gravity in ft/s²
pub const GRAVITY_FT_S2: f64 = 32.2;
