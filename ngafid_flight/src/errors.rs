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
use serde::{Serialize,Deserialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T,FlightError>;

#[derive(Error,Debug)]
pub enum FlightError {
    #[error("calculation '{calculation}' is missing parameters {missing:?}")]
    MissingDependency { calculation: String, missing: Vec<String> },

    #[error("malformed geometry {0}")]
    MalformedGeometry(String),

    #[error("fatal ingestion defect {0}")]
    FatalIngestion(String),

    #[error("derived series graph error {0}")]
    GraphError(String),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("storage error {0}")]
    StorageError(String),

    #[error("series error {0}")]
    SeriesError( #[from] ngafid_series::SeriesError),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("RON error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),
}

macro_rules! fatal_ingestion {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::FlightError::FatalIngestion( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use fatal_ingestion;

macro_rules! malformed_geometry {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::FlightError::MalformedGeometry( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use malformed_geometry;

macro_rules! graph_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::FlightError::GraphError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use graph_error;

/// recoverable conditions that do not stop processing of a flight but flag it with a warning status
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum FlightWarning {
    MissingDependency { calculation: String, missing: Vec<String> },
    MalformedGeometry { index: Option<usize>, reason: String },
}

impl FlightWarning {
    /// turn recoverable errors into warnings, hand back everything else
    pub fn from_error (e: FlightError)->std::result::Result<FlightWarning,FlightError> {
        match e {
            FlightError::MissingDependency{calculation,missing} => Ok( FlightWarning::MissingDependency{calculation,missing}),
            FlightError::MalformedGeometry(reason) => Ok( FlightWarning::MalformedGeometry{ index: None, reason }),
            other => Err(other)
        }
    }
}

impl std::fmt::Display for FlightWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightWarning::MissingDependency{calculation,missing} => write!( f, "'{calculation}' skipped, missing {missing:?}"),
            FlightWarning::MalformedGeometry{index: Some(i),reason} => write!( f, "malformed geometry at sample {i}: {reason}"),
            FlightWarning::MalformedGeometry{index: None,reason} => write!( f, "malformed geometry: {reason}"),
        }
    }
}
