//! Provides the core data structures for pipeline events: the string-keyed
//! [`Record`] mapping and the timed [`Event`] wrapper that batches are made of.
//!
//! A `Record` is exclusively owned by the evaluation of one batch. The engine
//! may mutate field values in place but retains no reference after returning.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mapping from field name to string value.
///
/// Fields are kept in a `BTreeMap` so iteration order (and therefore the
/// serialized form and any diagnostic output) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `key`, if the field is present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the record has a field named `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets (or overwrites) the value of a field.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One timed record, as received from the host pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the record was produced.
    pub time: DateTime<Utc>,
    /// The record payload.
    pub record: Record,
}

impl Event {
    /// Creates an event stamped with the current time.
    pub fn now(record: Record) -> Self {
        Self {
            time: Utc::now(),
            record,
        }
    }
}
