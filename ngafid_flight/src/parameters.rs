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
//! well known series names and data types

//--- raw columns
pub const ALT_B: &str = "AltB";
pub const BARO_A: &str = "BaroA";
pub const OAT: &str = "OAT";
pub const IAS: &str = "IAS";
pub const PITCH: &str = "Pitch";
pub const ROLL: &str = "Roll";
pub const HDG: &str = "HDG";
pub const ALT_AGL: &str = "AltAGL";
pub const ALT_MSL: &str = "AltMSL";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const GND_SPD: &str = "GndSpd";
pub const E1_RPM: &str = "E1 RPM";
pub const LCL_DATE: &str = "Lcl Date";
pub const LCL_TIME: &str = "Lcl Time";

//--- derived
pub const VSPD_CALCULATED: &str = "VSpd Calculated";
pub const CAS: &str = "CAS";
pub const DENSITY_RATIO: &str = "DensityRatio";
pub const TAS_FTMIN: &str = "True Airspeed(ft/min)";
pub const AOA_SIMPLE: &str = "AOASimple";
pub const STALL_INDEX: &str = "Stall Index";
pub const YAW_RATE: &str = "Yaw Rate";
pub const COORDINATION_INDEX: &str = "Coordination Index";
pub const LOCI_INDEX: &str = "LOC-I Index";

//--- proximity
pub const NEAREST_AIRPORT: &str = "NearestAirport";
pub const AIRPORT_DISTANCE: &str = "AirportDistance";
pub const NEAREST_RUNWAY: &str = "NearestRunway";
pub const RUNWAY_DISTANCE: &str = "RunwayDistance";

//--- phases
pub const FLIGHT_PHASE: &str = "Flight Phase";

//--- data types
pub const UNIT_FT_MIN: &str = "ft/min";
pub const UNIT_FT: &str = "ft";
pub const UNIT_KNOTS: &str = "knots";
pub const UNIT_DEGREES: &str = "degrees";
pub const UNIT_RATIO: &str = "ratio";
pub const UNIT_INDEX: &str = "index";
pub const UNIT_IATA: &str = "IATA Code";
pub const UNIT_RUNWAY: &str = "Runway";
pub const UNIT_PHASE: &str = "phase";

/// the airframe family for which we compute coordination and loss of control indices
pub const CESSNA_172S: &str = "Cessna 172S";
