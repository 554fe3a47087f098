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

//! reading flight recorder CSV exports. Lines starting with '#' are metadata or unit rows, the first
//! other row holds the column names. Columns whose non-empty fields all parse as numbers become numeric
//! series (empty fields turn into NaN), everything else is kept as text

use std::{fs, io, path::Path};
use itertools::Itertools;
use tracing::{debug, info};
use ngafid_series::{NumericSeries, TextSeries};

use crate::{errors::{FlightError, Result, fatal_ingestion}, flight::Flight};

const AIRFRAME_KEY: &str = "airframe_name=";

/// the airframe name of a '#airframe_info, ..., airframe_name="Cessna 172S", ...' metadata line
pub fn parse_airframe (line: &str)->Option<String> {
    if !line.starts_with('#') { return None }
    line.split(',')
        .map(|f| f.trim())
        .find_map(|f| f.strip_prefix( AIRFRAME_KEY))
        .map(|v| v.trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
}

pub fn load_flight_csv (path: impl AsRef<Path>, default_airframe: &str)->Result<Flight> {
    let path = path.as_ref();
    let content = fs::read_to_string( path)?;
    info!("loading flight {:?}", path);
    read_flight_csv( content.as_str(), default_airframe)
}

pub fn read_flight_csv (content: &str, default_airframe: &str)->Result<Flight> {
    let airframe = content.lines().next().and_then( parse_airframe).unwrap_or_else( || default_airframe.to_string());

    let mut rdr = csv::ReaderBuilder::new()
        .comment( Some(b'#'))
        .trim( csv::Trim::All)
        .from_reader( content.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if let Some(dup) = headers.iter().duplicates().next() {
        return Err( fatal_ingestion!("duplicate column '{}'", dup))
    }

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record.map_err( ragged_row)?;
        for (col, field) in columns.iter_mut().zip( record.iter()) {
            col.push( field.to_string());
        }
    }

    let number_rows = columns.first().map_or( 0, |c| c.len());
    if number_rows == 0 {
        return Err( fatal_ingestion!("flight has no samples"))
    }

    let mut flight = Flight::new( airframe, number_rows);
    for (name, col) in headers.iter().zip( columns) {
        if name.is_empty() { continue }

        match parse_numeric( &col) {
            Some(values) => flight.add_numeric( NumericSeries::from_values( name.as_str(), "", values))?,
            None => flight.add_text( TextSeries::from_values( name.as_str(), "", col))?,
        }
    }
    debug!("read {flight}");
    Ok(flight)
}

/// rows with a different number of fields than the header make the whole file unusable
fn ragged_row (e: csv::Error)->FlightError {
    match e.kind() {
        csv::ErrorKind::UnequalLengths { pos, expected_len, len } => {
            let line = pos.as_ref().map_or( 0, |p| p.line());
            fatal_ingestion!("row at line {} has {} fields, expected {}", line, len, expected_len)
        }
        _ => FlightError::from(e)
    }
}

fn parse_numeric (fields: &[String])->Option<Vec<f64>> {
    if fields.iter().all(|f| f.is_empty()) { return None }

    fields.iter().map(|f| {
        if f.is_empty() { Some(f64::NAN) } else { f.parse::<f64>().ok() }
    }).collect()
}
