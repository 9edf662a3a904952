//! Ordered, duplicate-free list of past queries

use super::query_record::QueryRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered sequence of [`QueryRecord`]s without duplicates (Entity)
///
/// Ordering rule: the first occurrence of a record wins. Adding a record that
/// is already present leaves the list untouched, so an old query keeps its
/// original position instead of moving to the end.
///
/// Serializes as a plain JSON array of strings. Deserialization re-normalizes
/// every element, drops blank ones and collapses duplicates, so a hand-edited
/// or legacy array still satisfies the invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HistoryList {
    records: Vec<QueryRecord>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from raw strings, normalizing and deduplicating.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for item in raw {
            if let Ok(record) = QueryRecord::normalize(item.as_ref()) {
                list.push(record);
            }
        }
        list
    }

    /// Append a record unless an equal one is already present.
    ///
    /// Returns `true` if the list changed.
    pub fn push(&mut self, record: QueryRecord) -> bool {
        if self.contains(&record) {
            return false;
        }
        self.records.push(record);
        debug_assert!(self.is_unique());
        true
    }

    /// Remove every record exactly equal to `text`.
    ///
    /// Returns the number of removed records (0 or 1 given the invariant).
    pub fn remove(&mut self, text: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.as_str() != text);
        before - self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn contains(&self, record: &QueryRecord) -> bool {
        self.records.iter().any(|r| r == record)
    }

    pub fn get(&self, index: usize) -> Option<&QueryRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueryRecord> {
        self.records.iter()
    }

    /// Check the no-duplicates invariant (used by tests and debug assertions).
    pub fn is_unique(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.records.len());
        self.records.iter().all(|r| seen.insert(r.as_str()))
    }
}

impl From<Vec<String>> for HistoryList {
    fn from(raw: Vec<String>) -> Self {
        Self::from_raw(raw)
    }
}

impl From<HistoryList> for Vec<String> {
    fn from(list: HistoryList) -> Self {
        list.records.into_iter().map(QueryRecord::into_string).collect()
    }
}

impl<'a> IntoIterator for &'a HistoryList {
    type Item = &'a QueryRecord;
    type IntoIter = std::slice::Iter<'a, QueryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
