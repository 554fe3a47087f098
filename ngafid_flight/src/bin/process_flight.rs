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

use std::{path::PathBuf, sync::{Arc, LazyLock}};
use anyhow::{anyhow, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;
use ngafid_series::registry::Registry;
use ngafid_flight::{
    FlightProcessor, FlightStorage, MemoryStorage, ProcessingConfig, load_config,
    airports::AirportDb, ingest::load_flight_csv,
};

#[derive(Parser,Debug)]
#[command(about="process recorded flight CSV files and print a JSON report")]
struct Args {
    /// airport CSV file (iata, site_number, type, latitude, longitude, elevation_ft)
    #[arg(long, requires="runways")]
    airports: Option<PathBuf>,

    /// runway CSV file (site_number, name, lat1, lon1, lat2, lon2)
    #[arg(long, requires="airports")]
    runways: Option<PathBuf>,

    /// RON processing config, defaults are used if not set
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// airframe of flights that don't specify one
    #[arg(long, default_value="Cessna 172S")]
    airframe: String,

    /// pretty print the report
    #[arg(long, short)]
    pretty: bool,

    /// flight CSV files
    #[arg(required=true)]
    files: Vec<PathBuf>,
}

static ARGS: LazyLock<Args> = LazyLock::new( Args::parse);

#[tokio::main]
async fn main ()->Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).try_init().map_err(|e| anyhow!("{e}"))?;

    let config = match &ARGS.config {
        Some(path) => load_config( path)?,
        None => ProcessingConfig::default()
    };

    let airports = match (&ARGS.airports, &ARGS.runways) {
        (Some(a), Some(r)) => Some( Arc::new( AirportDb::load( a, r)?)),
        _ => {
            warn!("no airport database, itineraries will not be computed");
            None
        }
    };

    let processor = Arc::new( FlightProcessor::new( Arc::new(config), airports)?);
    let registry = Arc::new( Registry::new());
    let storage = Arc::new( MemoryStorage::new());

    let mut tasks = Vec::with_capacity( ARGS.files.len());
    for path in &ARGS.files {
        let path = path.clone();
        let processor = processor.clone();
        let registry = registry.clone();
        let storage = storage.clone();

        tasks.push( tokio::task::spawn_blocking( move || {
            let file = path.to_string_lossy().to_string();
            let mut flight = match load_flight_csv( &path, &ARGS.airframe) {
                Ok(flight) => flight,
                Err(e) => {
                    error!("failed to read {file}: {e}");
                    return json!({ "file": file, "status": "Failed", "error": e.to_string() })
                }
            };

            match processor.process_and_store( &mut flight, &registry, storage.as_ref()) {
                Ok(id) => json!({
                    "file": file,
                    "id": id,
                    "airframe": flight.airframe(),
                    "rows": flight.number_rows(),
                    "status": flight.status(),
                    "warnings": flight.warnings().iter().map(|w| w.to_string()).collect::<Vec<_>>(),
                    "itinerary": flight.itinerary(),
                    "approaches": flight.approaches(),
                    "events": flight.events(),
                }),
                Err(e) => json!({ "file": file, "status": flight.status(), "error": e.to_string() })
            }
        }));
    }

    let mut report = Vec::with_capacity( tasks.len());
    for task in tasks {
        report.push( task.await?);
    }
    info!("stored {} of {} flights", storage.len(), report.len());

    let report = serde_json::Value::Array( report);
    if ARGS.pretty {
        println!("{}", serde_json::to_string_pretty( &report)?);
    } else {
        println!("{}", serde_json::to_string( &report)?);
    }
    Ok(())
}
