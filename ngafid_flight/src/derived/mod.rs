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

//! derived ("calculated") series: named calculations that declare the series they depend on and
//! compute one new series of the flight's length. Calculations are evaluated in dependency order,
//! a calculation whose inputs are missing is skipped together with everything downstream of it

use std::{collections::{HashMap, VecDeque}, fmt};
use serde::{Serialize,Deserialize};
use tracing::{debug, info, warn};
use ngafid_series::NumericSeries;

use crate::{errors::{Result, FlightWarning, graph_error}, flight::{Flight, Shift}};

pub mod calculations;
pub use calculations::standard_graph;

/// an input of a derived series
#[derive(Debug,Clone,PartialEq)]
pub enum Dependency {
    Series(String),
    /// the named series shifted back by n samples
    Lag(String,usize),
    /// the named series shifted forward by n samples
    Lead(String,usize),
    /// the first of the named series that is present
    FirstOf(Vec<String>),
}

impl Dependency {
    pub fn series (name: &str)->Self { Dependency::Series(name.to_string()) }
    pub fn lag (name: &str, n: usize)->Self { Dependency::Lag(name.to_string(), n) }
    pub fn lead (name: &str, n: usize)->Self { Dependency::Lead(name.to_string(), n) }
    pub fn first_of (names: &[&str])->Self { Dependency::FirstOf( names.iter().map(|s| s.to_string()).collect()) }

    /// all base series names this dependency can be satisfied with
    fn base_names (&self)->Vec<&str> {
        match self {
            Dependency::Series(name) | Dependency::Lag(name,_) | Dependency::Lead(name,_) => vec![name.as_str()],
            Dependency::FirstOf(names) => names.iter().map(|s| s.as_str()).collect()
        }
    }

    fn missing_label (&self)->String {
        match self {
            Dependency::FirstOf(names) => names.join(" | "),
            _ => self.base_names().join("")
        }
    }
}

/// a pure function of the materialized dependency values (in declaration order) and the sample index
pub type Generator = Box<dyn Fn(&[&[f64]], usize)->f64 + Send + Sync>;

#[derive(Debug,Clone,PartialEq)]
pub enum Applicability {
    Always,
    Airframes(Vec<String>),
}

impl Applicability {
    pub fn applies_to (&self, airframe: &str)->bool {
        match self {
            Applicability::Always => true,
            Applicability::Airframes(list) => list.iter().any(|a| a == airframe)
        }
    }
}

pub struct DerivedSeriesSpec {
    pub name: String,
    pub data_type: String,
    pub dependencies: Vec<Dependency>,
    pub applicability: Applicability,
    pub persist: bool,
    generator: Generator,
}

impl DerivedSeriesSpec {
    pub fn new<F> (name: &str, data_type: &str, dependencies: Vec<Dependency>, generator: F)->Self
        where F: Fn(&[&[f64]], usize)->f64 + Send + Sync + 'static
    {
        DerivedSeriesSpec {
            name: name.to_string(),
            data_type: data_type.to_string(),
            dependencies,
            applicability: Applicability::Always,
            persist: true,
            generator: Box::new(generator),
        }
    }

    pub fn transient (mut self)->Self { self.persist = false; self }

    pub fn only_for (mut self, airframes: &[String])->Self {
        self.applicability = Applicability::Airframes( airframes.to_vec());
        self
    }

    pub fn generate (&self, inputs: &[&[f64]], i: usize)->f64 { (self.generator)(inputs, i) }
}

impl fmt::Debug for DerivedSeriesSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "DerivedSeriesSpec('{}', deps: {:?}, {:?}, persist: {})", self.name, self.dependencies, self.applicability, self.persist)
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum CalcOutcome {
    Computed { name: String },
    /// the flight already had a series of this name
    Present { name: String },
    /// the calculation does not apply to this airframe
    NotApplicable { name: String },
    Skipped { name: String, missing: Vec<String> },
}

impl CalcOutcome {
    pub fn name (&self)->&str {
        match self {
            CalcOutcome::Computed{name} | CalcOutcome::Present{name} | CalcOutcome::NotApplicable{name} | CalcOutcome::Skipped{name,..} => name.as_str()
        }
    }

    pub fn is_computed (&self)->bool { matches!( self, CalcOutcome::Computed{..}) }

    /// the flight level warning this outcome maps to, if any
    pub fn warning (&self)->Option<FlightWarning> {
        if let CalcOutcome::Skipped{name,missing} = self {
            Some( FlightWarning::MissingDependency{ calculation: name.clone(), missing: missing.clone() })
        } else {
            None
        }
    }
}

/// the set of derived series specs in topological order
#[derive(Debug)]
pub struct DerivedGraph {
    specs: Vec<DerivedSeriesSpec>,
}

impl DerivedGraph {
    /// order `specs` so that every spec comes after the specs it depends on. Independent specs keep
    /// their declaration order. Duplicate names and cycles are rejected
    pub fn new (specs: Vec<DerivedSeriesSpec>)->Result<Self> {
        let mut index: HashMap<&str,usize> = HashMap::new();
        for (i,spec) in specs.iter().enumerate() {
            if index.insert( spec.name.as_str(), i).is_some() {
                return Err( graph_error!("duplicate derived series '{}'", spec.name))
            }
        }

        let n = specs.len();
        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i,spec) in specs.iter().enumerate() {
            for dep in &spec.dependencies {
                for base in dep.base_names() {
                    if let Some(&j) = index.get(base) {
                        if j == i { return Err( graph_error!("derived series '{}' depends on itself", spec.name)) }
                        in_degree[i] += 1;
                        dependents[j].push(i);
                    }
                }
            }
        }

        let mut ready: VecDeque<usize> = (0..n).filter(|i| in_degree[*i] == 0).collect();
        let mut order: Vec<usize> = Vec::with_capacity(n);
        while let Some(i) = ready.pop_front() {
            order.push(i);
            for &k in &dependents[i] {
                in_degree[k] -= 1;
                if in_degree[k] == 0 { ready.push_back(k) }
            }
        }

        if order.len() < n {
            let cyclic: Vec<&str> = (0..n).filter(|i| in_degree[*i] > 0).map(|i| specs[i].name.as_str()).collect();
            return Err( graph_error!("dependency cycle between {:?}", cyclic))
        }

        let mut slots: Vec<Option<DerivedSeriesSpec>> = specs.into_iter().map(Some).collect();
        let specs = order.into_iter().filter_map(|i| slots[i].take()).collect();
        Ok( DerivedGraph { specs })
    }

    pub fn specs (&self)->&[DerivedSeriesSpec] { self.specs.as_slice() }

    pub fn names (&self)->impl Iterator<Item=&str> { self.specs.iter().map(|s| s.name.as_str()) }

    /// evaluate all specs on `flight`, adding the computed series to it
    pub fn evaluate (&self, flight: &mut Flight)->Result<Vec<CalcOutcome>> {
        let mut outcomes: Vec<CalcOutcome> = Vec::with_capacity( self.specs.len());
        for spec in &self.specs {
            let outcome = evaluate_spec( spec, flight)?;
            match &outcome {
                CalcOutcome::Computed{name} => debug!("computed '{name}'"),
                CalcOutcome::Skipped{name,missing} => info!("skipped '{name}', missing {missing:?}"),
                _ => {}
            }
            outcomes.push( outcome);
        }
        Ok(outcomes)
    }
}

fn evaluate_spec (spec: &DerivedSeriesSpec, flight: &mut Flight)->Result<CalcOutcome> {
    let name = spec.name.clone();

    if flight.has_numeric( &spec.name) {
        return Ok( CalcOutcome::Present{name})
    }
    if !spec.applicability.applies_to( flight.airframe()) {
        return Ok( CalcOutcome::NotApplicable{name})
    }

    // resolve which base series satisfies each dependency
    let mut resolved: Vec<(String,Option<Shift>)> = Vec::with_capacity( spec.dependencies.len());
    let mut missing: Vec<String> = Vec::new();
    for dep in &spec.dependencies {
        let found = dep.base_names().into_iter().find(|b| flight.has_numeric(b));
        match (found, dep) {
            (Some(base), Dependency::Lag(_,n)) => resolved.push( (base.to_string(), Some(Shift::Lag(*n)))),
            (Some(base), Dependency::Lead(_,n)) => resolved.push( (base.to_string(), Some(Shift::Lead(*n)))),
            (Some(base), _) => resolved.push( (base.to_string(), None)),
            (None, _) => missing.push( dep.missing_label())
        }
    }
    if !missing.is_empty() {
        return Ok( CalcOutcome::Skipped{name, missing})
    }

    for (base,shift) in &resolved {
        if let Some(shift) = shift { flight.shifted( base, *shift); }
    }

    let n_rows = flight.number_rows();
    let values: Vec<f64> = {
        let mut inputs: Vec<&[f64]> = Vec::with_capacity( resolved.len());
        for (base,shift) in &resolved {
            let s = match shift {
                Some(shift) => flight.cached_shifted( base, *shift),
                None => flight.numeric( base)
            };
            match s {
                Some(s) => inputs.push( s.values()),
                None => return Ok( CalcOutcome::Skipped{ name, missing: vec![base.clone()] })
            }
        }
        (0..n_rows).map(|i| spec.generate( &inputs, i)).collect()
    };

    let mut series = NumericSeries::from_values( spec.name.as_str(), spec.data_type.as_str(), values);
    series.set_persist( spec.persist);
    flight.add_numeric( series)?;

    Ok( CalcOutcome::Computed{name})
}
