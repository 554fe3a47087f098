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

use std::{collections::HashMap, fs, path::Path};
use serde::{Serialize,Deserialize};
use tracing::info;

use crate::{errors::Result, parameters::CESSNA_172S};

/// all thresholds used by flight processing. Every field has a default so that RON config files
/// only need to list what they override, e.g.
/// ```ron
/// ProcessingConfig(
///     proximity: ( max_airport_distance_ft: 8000.0 ),
///     turn_to_final: ( max_roll_deg: 25.0 ),
/// )
/// ```
#[derive(Debug,Clone,Serialize,Deserialize,Default)]
#[serde(default)]
pub struct ProcessingConfig {
    pub proximity: ProximityConfig,
    pub itinerary: ItineraryConfig,
    pub derived: DerivedConfig,
    pub pattern: PatternConfig,
    pub turn_to_final: TurnToFinalConfig,
    pub phases: PhaseConfig,
}

pub fn load_config (path: impl AsRef<Path>)->Result<ProcessingConfig> {
    let path = path.as_ref();
    let config: ProcessingConfig = ron::from_str( fs::read_to_string(path)?.as_str())?;
    info!("loaded processing config from {path:?}");
    Ok(config)
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    pub max_airport_distance_ft: f64,
    pub max_runway_distance_ft: f64,
    /// airports are only looked up below this AGL altitude
    pub max_agl_ft: f64,
}

impl Default for ProximityConfig {
    fn default()->Self {
        ProximityConfig { max_airport_distance_ft: 10000.0, max_runway_distance_ft: 100.0, max_agl_ft: 2000.0 }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct ItineraryConfig {
    /// legs that never got closer to the ground are not approaches (unless a runway was matched)
    pub approach_max_agl_ft: f64,
    pub takeoff_min_rpm: f64,
    pub takeoff_min_gs_kt: f64,
    pub takeoff_max_gs_kt: f64,
    /// number of consecutive samples that have to satisfy the takeoff criteria
    pub takeoff_run_samples: usize,
    pub approach_start_agl_ft: f64,
    pub approach_end_agl_ft: f64,
    pub min_approach_samples: usize,
    pub min_runway_samples: usize,
}

impl Default for ItineraryConfig {
    fn default()->Self {
        ItineraryConfig {
            approach_max_agl_ft: 400.0,
            takeoff_min_rpm: 2100.0,
            takeoff_min_gs_kt: 14.5,
            takeoff_max_gs_kt: 80.0,
            takeoff_run_samples: 15,
            approach_start_agl_ft: 6.0,
            approach_end_agl_ft: 5.0,
            min_approach_samples: 10,
            min_runway_samples: 5,
        }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct DerivedConfig {
    /// airframes that get coordination and loss of control indices
    pub loci_airframes: Vec<String>,
    /// airframes for which we approximate calibrated from indicated airspeed
    pub cas_airframes: Vec<String>,
    pub standard_pressure_inhg: f64,
    pub aoa_critical_deg: f64,
    pub prospin_limit: f64,
}

impl Default for DerivedConfig {
    fn default()->Self {
        DerivedConfig {
            loci_airframes: vec![ CESSNA_172S.to_string() ],
            cas_airframes: vec![ CESSNA_172S.to_string() ],
            standard_pressure_inhg: 29.92,
            aoa_critical_deg: 15.0,
            prospin_limit: 4.0,
        }
    }
}

/// bearing difference band edges (degrees) of the traffic pattern classifier
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub aligned_max_deg: f64,
    pub first_turn_max_deg: f64,
    pub perpendicular_max_deg: f64,
    pub second_turn_max_deg: f64,
}

impl Default for PatternConfig {
    fn default()->Self {
        PatternConfig { aligned_max_deg: 20.0, first_turn_max_deg: 70.0, perpendicular_max_deg: 110.0, second_turn_max_deg: 160.0 }
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct TurnToFinalConfig {
    /// height above the runway below which roll and glide path are evaluated
    pub gate_agl_ft: f64,
    pub max_roll_deg: f64,
    /// allowed lateral deviation from the extended centerline
    pub centerline_tolerance_ft: f64,
    /// how many runway lengths the centerline is extended past each threshold
    pub centerline_extension: f64,
    pub optimal_descent_ft_per_nm: f64,
    pub descent_warning_ft: f64,
    pub descent_error_ft: f64,
    pub approach_speeds_kt: HashMap<String,f64>,
    pub default_approach_speed_kt: f64,
    pub speed_warning_kt: f64,
    pub speed_error_kt: f64,
    // approach window detection
    pub touchdown_agl_ft: f64,
    pub window_start_agl_ft: f64,
    pub min_altitude_span_ft: f64,
    pub max_min_altitude_ft: f64,
}

impl Default for TurnToFinalConfig {
    fn default()->Self {
        TurnToFinalConfig {
            gate_agl_ft: 400.0,
            max_roll_deg: 30.0,
            centerline_tolerance_ft: 528.0,
            centerline_extension: 2.0,
            optimal_descent_ft_per_nm: 300.0,
            descent_warning_ft: 5.0,
            descent_error_ft: 10.0,
            approach_speeds_kt: HashMap::from([ (CESSNA_172S.to_string(), 65.0) ]),
            default_approach_speed_kt: 65.0,
            speed_warning_kt: 5.0,
            speed_error_kt: 10.0,
            touchdown_agl_ft: 15.0,
            window_start_agl_ft: 400.0,
            min_altitude_span_ft: 60.0,
            max_min_altitude_ft: 100.0,
        }
    }
}

impl TurnToFinalConfig {
    pub fn approach_speed_kt (&self, airframe: &str)->f64 {
        self.approach_speeds_kt.get(airframe).copied().unwrap_or( self.default_approach_speed_kt)
    }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    pub ground_agl_ft: f64,
    pub landing_agl_ft: f64,
    pub climb_agl_ft: f64,
    pub takeoff_min_rpm: f64,
    pub takeoff_min_gs_kt: f64,
    pub takeoff_max_gs_kt: f64,
    pub takeoff_samples: usize,
    // touch-and-go detection
    pub tng_ground_agl_ft: f64,
    pub tng_climb_agl_ft: f64,
    pub tng_min_ground_samples: usize,
    // go-around detection
    pub ga_valley_max_agl_ft: f64,
    pub ga_min_climb_ft: f64,
    pub ga_window_samples: usize,
    pub ga_sustain_samples: usize,
}

impl Default for PhaseConfig {
    fn default()->Self {
        PhaseConfig {
            ground_agl_ft: 5.0,
            landing_agl_ft: 100.0,
            climb_agl_ft: 600.0,
            takeoff_min_rpm: 2100.0,
            takeoff_min_gs_kt: 14.5,
            takeoff_max_gs_kt: 80.0,
            takeoff_samples: 15,
            tng_ground_agl_ft: 5.0,
            tng_climb_agl_ft: 200.0,
            tng_min_ground_samples: 10,
            ga_valley_max_agl_ft: 100.0,
            ga_min_climb_ft: 50.0,
            ga_window_samples: 30,
            ga_sustain_samples: 10,
        }
    }
}
