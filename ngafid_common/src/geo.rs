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
use serde::{Serialize,Deserialize};
use geo::{Bearing, Closest, ClosestPoint, Destination, Distance, Haversine};
use geo_types::{Line, Point};

use crate::{angle::{normalize_180, normalize_360}, geo_constants::FEET_PER_METER};

/// a geographic position in decimal degrees.
/// Flight analysis works with spherical approximations, hence no datum
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new (lat: f64, lon: f64)->Self { LatLon { lat, lon } }

    pub fn from_point (p: Point)->Self { LatLon { lat: p.y(), lon: p.x() } }

    /// the geo point for this position (x = longitude, y = latitude)
    pub fn point (&self)->Point { Point::new( self.lon, self.lat) }

    /// true if neither coordinate is NaN. This says nothing about range validity
    pub fn is_defined (&self)->bool { !(self.lat.is_nan() || self.lon.is_nan()) }

    /// true if this is a finite position within [-90,90] x [-180,180]
    pub fn is_valid (&self)->bool {
        self.lat.is_finite() && self.lon.is_finite() && self.lat.abs() <= 90.0 && self.lon.abs() <= 180.0
    }

    /// great circle distance in feet
    pub fn distance_ft (&self, other: &LatLon)->f64 {
        Haversine.distance( self.point(), other.point()) * FEET_PER_METER
    }

    /// great circle initial bearing in degrees, normalized to [0,360)
    pub fn bearing_to (&self, other: &LatLon)->f64 {
        normalize_360( Haversine.bearing( self.point(), other.point()))
    }

    /// the position reached when travelling `dist_ft` along the great circle with initial `bearing_deg`
    pub fn destination (&self, bearing_deg: f64, dist_ft: f64)->LatLon {
        let p = Haversine.destination( self.point(), bearing_deg, dist_ft / FEET_PER_METER);
        LatLon::new( p.y(), normalize_180( p.x()))
    }
}

impl From<LatLon> for Point {
    fn from (p: LatLon)->Point { p.point() }
}

impl From<Point> for LatLon {
    fn from (p: Point)->LatLon { LatLon::from_point(p) }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "({:.6},{:.6})", self.lat, self.lon)
    }
}

pub fn haversine_distance_ft (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    LatLon::new( lat1, lon1).distance_ft( &LatLon::new( lat2, lon2))
}

pub fn initial_bearing (lat1: f64, lon1: f64, lat2: f64, lon2: f64)->f64 {
    LatLon::new( lat1, lon1).bearing_to( &LatLon::new( lat2, lon2))
}

pub fn destination (lat: f64, lon: f64, bearing_deg: f64, dist_ft: f64)->LatLon {
    LatLon::new( lat, lon).destination( bearing_deg, dist_ft)
}

/// the closest point on segment (p1,p2) to p.
/// This is a planar projection in degree space (lon as x, lat as y), which is how flight recorder analysis
/// has always measured runway centerline offsets. Degenerate segments return p1
pub fn closest_point_on_segment (p: &LatLon, p1: &LatLon, p2: &LatLon)->LatLon {
    if p1 == p2 { return *p1 }

    match Line::new( p1.point(), p2.point()).closest_point( &p.point()) {
        Closest::Intersection(q) | Closest::SinglePoint(q) => LatLon::from_point(q),
        Closest::Indeterminate => *p1
    }
}

/// shortest distance in feet between p and the segment (p1,p2)
pub fn distance_to_segment_ft (p: &LatLon, p1: &LatLon, p2: &LatLon)->f64 {
    let q = closest_point_on_segment( p, p1, p2);
    p.distance_ft( &q)
}

/// a directed line segment between two positions, e.g. a runway centerline from threshold to threshold
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Segment {
    pub start: LatLon,
    pub end: LatLon,
}

impl Segment {
    pub fn new (start: LatLon, end: LatLon)->Self { Segment { start, end } }

    pub fn is_valid (&self)->bool { self.start.is_valid() && self.end.is_valid() }

    /// the geo line (in degree space) for this segment
    pub fn line (&self)->Line { Line::new( self.start.point(), self.end.point()) }

    pub fn length_ft (&self)->f64 { self.start.distance_ft( &self.end) }

    /// initial bearing from start to end
    pub fn bearing (&self)->f64 { self.start.bearing_to( &self.end) }

    /// the segment extended past both ends by `factor` times its own (degree space) extent
    pub fn extended (&self, factor: f64)->Segment {
        let dlat = self.start.lat - self.end.lat;
        let dlon = self.start.lon - self.end.lon;

        Segment {
            start: LatLon::new( self.start.lat + factor * dlat, self.start.lon + factor * dlon),
            end: LatLon::new( self.end.lat - factor * dlat, self.end.lon - factor * dlon),
        }
    }

    pub fn distance_ft (&self, p: &LatLon)->f64 {
        distance_to_segment_ft( p, &self.start, &self.end)
    }
}
