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

use std::{collections::HashMap, fs::File, io, path::Path};
use serde::{Serialize,Deserialize};
use tracing::{debug, info, warn};
use ngafid_common::{cos, rad, geo::{LatLon, Segment}, geo_constants::{FEET_PER_KM, MEAN_EARTH_RADIUS_KM}};

use crate::errors::{Result, malformed_geometry};

/// size of the lookup grid cells in degrees
const CELL_DEG: f64 = 0.1;
const LON_CELLS: i32 = (360.0 / CELL_DEG) as i32;

/// feet per degree of latitude on the mean earth sphere
const FT_PER_DEG_LAT: f64 = MEAN_EARTH_RADIUS_KM * FEET_PER_KM * std::f64::consts::PI / 180.0;

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Runway {
    pub site_number: String,
    pub name: String,
    /// threshold to threshold centerline, if the runway has surveyed coordinates
    pub centerline: Option<Segment>,
}

impl Runway {
    pub fn has_coordinates (&self)->bool { self.centerline.is_some() }

    pub fn bearing (&self)->Option<f64> { self.centerline.map(|c| c.bearing()) }

    pub fn distance_ft (&self, p: &LatLon)->Option<f64> { self.centerline.map(|c| c.distance_ft(p)) }
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Airport {
    pub iata_code: String,
    pub site_number: String,
    pub airport_type: String,
    pub position: LatLon,
    pub elevation_ft: Option<f64>,
    pub runways: Vec<Runway>,
}

impl Airport {
    /// true if at least one runway has coordinates we can match against
    pub fn has_runway_info (&self)->bool { self.runways.iter().any(|r| r.has_coordinates()) }

    pub fn runway (&self, name: &str)->Option<&Runway> { self.runways.iter().find(|r| r.name == name) }

    /// closest runway centerline within `max_ft` of `p`
    pub fn nearest_runway_within (&self, p: &LatLon, max_ft: f64)->Option<(&Runway,f64)> {
        let mut nearest: Option<(&Runway,f64)> = None;
        for rwy in &self.runways {
            if let Some(d) = rwy.distance_ft(p) {
                if d <= max_ft && nearest.map_or( true, |(_,dmin)| d < dmin) {
                    nearest = Some((rwy,d));
                }
            }
        }
        nearest
    }
}

#[derive(Debug,Deserialize)]
struct AirportRow {
    iata: String,
    site_number: String,
    #[serde(rename="type")]
    airport_type: String,
    latitude: f64,
    longitude: f64,
    elevation_ft: Option<f64>,
}

#[derive(Debug,Deserialize)]
struct RunwayRow {
    site_number: String,
    name: String,
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
}

impl RunwayRow {
    fn centerline (&self)->Option<Segment> {
        match (self.lat1, self.lon1, self.lat2, self.lon2) {
            (Some(lat1),Some(lon1),Some(lat2),Some(lon2)) => {
                let seg = Segment::new( LatLon::new(lat1,lon1), LatLon::new(lat2,lon2));
                if seg.is_valid() { Some(seg) } else { None }
            }
            _ => None
        }
    }
}

/// the immutable airport/runway database with a lat/lon grid index for proximity queries.
/// Shared read-only between concurrently processed flights
#[derive(Debug,Default)]
pub struct AirportDb {
    airports: Vec<Airport>,
    by_iata: HashMap<String,usize>,
    grid: HashMap<(i32,i32),Vec<usize>>,
}

#[inline]
fn cell_of (lat: f64, lon: f64)->(i32,i32) {
    ( (lat / CELL_DEG).floor() as i32, ((lon / CELL_DEG).floor() as i32).rem_euclid(LON_CELLS) )
}

impl AirportDb {
    pub fn new (airports: Vec<Airport>)->Self {
        let mut by_iata: HashMap<String,usize> = HashMap::with_capacity( airports.len());
        let mut grid: HashMap<(i32,i32),Vec<usize>> = HashMap::new();

        for (i,ap) in airports.iter().enumerate() {
            if !ap.position.is_valid() {
                warn!("ignoring airport {} with invalid position {}", ap.iata_code, ap.position);
                continue;
            }
            by_iata.insert( ap.iata_code.clone(), i);
            grid.entry( cell_of( ap.position.lat, ap.position.lon)).or_default().push(i);
        }

        AirportDb { airports, by_iata, grid }
    }

    pub fn load (airports_csv: impl AsRef<Path>, runways_csv: impl AsRef<Path>)->Result<Self> {
        let db = AirportDb::from_readers( File::open( airports_csv.as_ref())?, File::open( runways_csv.as_ref())?)?;
        info!("loaded {} airports from {:?}", db.len(), airports_csv.as_ref());
        Ok(db)
    }

    /// read airports (`iata,site_number,type,latitude,longitude,elevation_ft`) and
    /// runways (`site_number,name,lat1,lon1,lat2,lon2`) from CSV sources with header rows
    pub fn from_readers<A: io::Read, R: io::Read> (airports_src: A, runways_src: R)->Result<Self> {
        let mut airports: Vec<Airport> = Vec::new();
        let mut by_site: HashMap<String,usize> = HashMap::new();

        let mut rdr = csv::ReaderBuilder::new().trim( csv::Trim::All).from_reader( airports_src);
        for row in rdr.deserialize::<AirportRow>() {
            let row = row?;
            by_site.insert( row.site_number.clone(), airports.len());
            airports.push( Airport {
                iata_code: row.iata,
                site_number: row.site_number,
                airport_type: row.airport_type,
                position: LatLon::new( row.latitude, row.longitude),
                elevation_ft: row.elevation_ft,
                runways: Vec::new(),
            });
        }

        let mut rdr = csv::ReaderBuilder::new().trim( csv::Trim::All).from_reader( runways_src);
        for row in rdr.deserialize::<RunwayRow>() {
            let row = row?;
            if let Some(idx) = by_site.get( &row.site_number) {
                let centerline = row.centerline();
                airports[*idx].runways.push( Runway { site_number: row.site_number, name: row.name, centerline });
            } else {
                debug!("runway {} references unknown site {}", row.name, row.site_number);
            }
        }

        Ok( AirportDb::new( airports))
    }

    pub fn len (&self)->usize { self.by_iata.len() }
    pub fn is_empty (&self)->bool { self.by_iata.is_empty() }

    pub fn get (&self, iata_code: &str)->Option<&Airport> {
        self.by_iata.get(iata_code).map(|i| &self.airports[*i])
    }

    pub fn has_runway_info (&self, iata_code: &str)->bool {
        self.get(iata_code).is_some_and(|ap| ap.has_runway_info())
    }

    /// closest airport within `max_ft` of `p`. Positions outside the valid lat/lon range are reported as
    /// `MalformedGeometry` so that callers can record them as "no match"
    pub fn nearest_airport_within (&self, p: &LatLon, max_ft: f64)->Result<Option<(&Airport,f64)>> {
        if !p.is_valid() {
            return Err( malformed_geometry!("position {p} outside of coordinate range"))
        }

        let (lat_cell, lon_cell) = cell_of( p.lat, p.lon);
        let lat_rings = (max_ft / (FT_PER_DEG_LAT * CELL_DEG)).ceil() as i32;
        let ft_per_deg_lon = FT_PER_DEG_LAT * cos( rad( p.lat.abs().min(89.0)));
        let lon_rings = ((max_ft / (ft_per_deg_lon * CELL_DEG)).ceil() as i32).min( LON_CELLS / 2);

        let mut nearest: Option<(&Airport,f64)> = None;
        for dlat in -lat_rings..=lat_rings {
            for dlon in -lon_rings..=lon_rings {
                let key = (lat_cell + dlat, (lon_cell + dlon).rem_euclid(LON_CELLS));
                if let Some(candidates) = self.grid.get(&key) {
                    for i in candidates {
                        let ap = &self.airports[*i];
                        let d = p.distance_ft( &ap.position);
                        if d <= max_ft && nearest.map_or( true, |(_,dmin)| d < dmin) {
                            nearest = Some((ap,d));
                        }
                    }
                }
            }
        }
        Ok(nearest)
    }
}
