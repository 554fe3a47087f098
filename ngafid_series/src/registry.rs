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

use std::sync::atomic::{AtomicU32, Ordering};
use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;

/// a bidirectional, concurrency safe name <-> id table.
/// `id_of` is a memoizing lookup-or-insert: concurrent callers asking for the same unknown name
/// always get the same id, since allocation happens while holding the name's shard lock
#[derive(Debug)]
pub struct NameTable {
    namespace: &'static str,
    ids: DashMap<String,u32>,
    names: DashMap<u32,String>,
    next_id: AtomicU32,
}

impl NameTable {
    pub fn new (namespace: &'static str)->Self {
        NameTable { namespace, ids: DashMap::new(), names: DashMap::new(), next_id: AtomicU32::new(1) }
    }

    pub fn namespace (&self)->&'static str { self.namespace }

    pub fn id_of (&self, name: &str)->u32 {
        if let Some(id) = self.ids.get(name) {
            return *id
        }

        *self.ids.entry( name.to_string()).or_insert_with( || {
            loop { // skip ids that were seeded concurrently
                let id = self.next_id.fetch_add( 1, Ordering::Relaxed);
                if let Entry::Vacant(e) = self.names.entry(id) {
                    e.insert( name.to_string());
                    debug!("registered {} '{}' as {}", self.namespace, name, id);
                    break id
                }
            }
        })
    }

    /// lookup without insertion
    pub fn lookup (&self, name: &str)->Option<u32> {
        self.ids.get(name).map(|e| *e)
    }

    pub fn name_of (&self, id: u32)->Option<String> {
        self.names.get(&id).map(|e| e.value().clone())
    }

    /// enter a previously persisted mapping. Returns false and leaves the table unchanged if either
    /// side is already mapped differently.
    /// Locks are taken in the same order as `id_of` (name first, then id)
    pub fn seed (&self, id: u32, name: &str)->bool {
        match self.ids.entry( name.to_string()) {
            Entry::Occupied(e) => {
                if *e.get() != id { return false }
                if self.names.get(&id).is_some_and(|n| n.value() != name) { return false }
            }
            Entry::Vacant(e) => {
                match self.names.entry(id) {
                    Entry::Occupied(n) => {
                        if n.get() != name { return false }
                    }
                    Entry::Vacant(n) => { n.insert( name.to_string()); }
                }
                e.insert(id);
            }
        }

        self.next_id.fetch_max( id.saturating_add(1), Ordering::Relaxed);
        true
    }

    pub fn len (&self)->usize { self.ids.len() }
    pub fn is_empty (&self)->bool { self.ids.is_empty() }

    /// snapshot of all mappings, ordered by id
    pub fn entries (&self)->Vec<(u32,String)> {
        let mut list: Vec<(u32,String)> = self.names.iter().map(|e| (*e.key(), e.value().clone())).collect();
        list.sort_by_key(|e| e.0);
        list
    }
}

/// the process wide id registry for series names and data types.
/// Share it between concurrently processed flights as `Arc<Registry>`
#[derive(Debug)]
pub struct Registry {
    pub numeric_names: NameTable,
    pub text_names: NameTable,
    pub data_types: NameTable,
}

impl Registry {
    pub fn new ()->Self {
        Registry {
            numeric_names: NameTable::new("series name"),
            text_names: NameTable::new("text series name"),
            data_types: NameTable::new("data type"),
        }
    }
}

impl Default for Registry {
    fn default()->Self { Registry::new() }
}
