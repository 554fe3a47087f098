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

use linreg::linear_regression;
use ngafid_common::{abs, asin, sin, rad, deg, min_nan, angle::heading_change, geo_constants::{GRAVITY_FT_S2, KNOTS_TO_FT_PER_MIN}};

use crate::{config::DerivedConfig, errors::Result, parameters::*};
use super::{DerivedGraph, DerivedSeriesSpec, Dependency};

/// the stall and loss-of-control calculations:
/// ```text
/// AltB -> VSpd Calculated ----------------------------+
/// IAS -> CAS* -> True Airspeed <- DensityRatio <- BaroA, OAT
///                     |   \                           |
///                     |    +--> AOASimple <- Pitch <--+
///                     |              |
/// HDG -> Yaw Rate* -> Coordination* Stall Index
///                          \         /
///                           LOC-I Index*
/// ```
/// (* only for configured airframes)
pub fn standard_graph (cfg: &DerivedConfig)->Result<DerivedGraph> {
    let std_pressure = cfg.standard_pressure_inhg;
    let aoa_crit = cfg.aoa_critical_deg;
    let prospin = cfg.prospin_limit;

    let specs = vec![
        DerivedSeriesSpec::new( VSPD_CALCULATED, UNIT_FT_MIN,
            vec![ Dependency::lag(ALT_B,1), Dependency::series(ALT_B), Dependency::lead(ALT_B,1) ],
            |v,i| vertical_speed( v[0][i], v[1][i], v[2][i], i)),

        DerivedSeriesSpec::new( CAS, UNIT_KNOTS,
            vec![ Dependency::series(IAS) ],
            |v,i| calibrated_airspeed( v[0][i])
        ).transient().only_for( &cfg.cas_airframes),

        DerivedSeriesSpec::new( DENSITY_RATIO, UNIT_RATIO,
            vec![ Dependency::series(BARO_A), Dependency::series(OAT) ],
            move |v,i| density_ratio( v[0][i], v[1][i], std_pressure)
        ).transient(),

        DerivedSeriesSpec::new( TAS_FTMIN, UNIT_FT_MIN,
            vec![ Dependency::first_of( &[CAS, IAS]), Dependency::series(DENSITY_RATIO) ],
            |v,i| true_airspeed_ft_min( v[0][i], v[1][i])
        ).transient(),

        DerivedSeriesSpec::new( AOA_SIMPLE, UNIT_DEGREES,
            vec![ Dependency::series(PITCH), Dependency::series(VSPD_CALCULATED), Dependency::series(DENSITY_RATIO), Dependency::series(TAS_FTMIN) ],
            |v,i| angle_of_attack_simple( v[0][i], v[1][i], v[2][i], v[3][i])),

        DerivedSeriesSpec::new( STALL_INDEX, UNIT_INDEX,
            vec![ Dependency::series(AOA_SIMPLE) ],
            move |v,i| stall_index( v[0][i], aoa_crit)),

        DerivedSeriesSpec::new( YAW_RATE, UNIT_DEGREES,
            vec![ Dependency::series(HDG), Dependency::lag(HDG,1) ],
            |v,i| heading_change( v[0][i], v[1][i])
        ).transient().only_for( &cfg.loci_airframes),

        DerivedSeriesSpec::new( COORDINATION_INDEX, UNIT_INDEX,
            vec![ Dependency::series(ROLL), Dependency::series(YAW_RATE), Dependency::series(TAS_FTMIN) ],
            move |v,i| coordination_index( v[0][i], v[1][i], v[2][i], prospin)
        ).transient().only_for( &cfg.loci_airframes),

        DerivedSeriesSpec::new( LOCI_INDEX, UNIT_INDEX,
            vec![ Dependency::series(STALL_INDEX), Dependency::series(COORDINATION_INDEX) ],
            |v,i| loss_of_control_index( v[0][i], v[1][i])
        ).only_for( &cfg.loci_airframes),
    ];

    DerivedGraph::new( specs)
}

/// least squares slope of y over x. NaN if the regression is undefined (no or vertical samples)
pub fn regression_slope (xs: &[f64], ys: &[f64])->f64 {
    match linear_regression::<f64,f64,f64>( xs, ys) {
        Ok((slope,_)) => slope,
        Err(_) => f64::NAN
    }
}

/// ft/min from a 3-point regression of barometric altitude around sample i (1Hz data).
/// NaN if any of the three samples is missing, which is always the case for the first and last sample
pub fn vertical_speed (prev: f64, cur: f64, next: f64, i: usize)->f64 {
    let x = i as f64;
    regression_slope( &[x - 1.0, x, x + 1.0], &[prev, cur, next]) * 60.0
}

/// empirical IAS to CAS correction for the low speed range
pub fn calibrated_airspeed (ias: f64)->f64 {
    if ias < 70.0 { 0.7 * ias + 20.667 } else { ias }
}

pub fn density_ratio (baro_a: f64, oat: f64, std_pressure: f64)->f64 {
    (baro_a / std_pressure) / ((273.0 + oat) / 288.0)
}

pub fn true_airspeed_ft_min (airspeed: f64, density_ratio: f64)->f64 {
    airspeed * density_ratio.powf(-0.5) * KNOTS_TO_FT_PER_MIN
}

pub fn angle_of_attack_simple (pitch: f64, vspd: f64, density_ratio: f64, tas_ft_min: f64)->f64 {
    let vspd_geo = vspd * density_ratio.powf(-0.5);
    pitch - deg( asin( vspd_geo / tas_ft_min))
}

/// stall probability in [0,1]
pub fn stall_index (aoa: f64, aoa_critical: f64)->f64 {
    min_nan( abs( aoa / aoa_critical) * 100.0, 100.0) / 100.0
}

/// mismatch between the lateral acceleration the bank angle produces and the one the turn rate requires,
/// as percentage of the pro-spin limit, capped at 100
pub fn coordination_index (roll: f64, yaw_rate: f64, tas_ft_min: f64, prospin_limit: f64)->f64 {
    let yaw_component = (tas_ft_min / 60.0) * rad(yaw_rate);
    let cross_track_accel = sin( rad(roll)) * GRAVITY_FT_S2;
    min_nan( abs( cross_track_accel - yaw_component) * 100.0 / prospin_limit, 100.0)
}

pub fn loss_of_control_index (stall_index: f64, coordination_index: f64)->f64 {
    stall_index * coordination_index / 100.0
}
