//! Grouping and counting primitive shared by all per-group metrics.
//!
//! Daily stats, top pages, top edge locations and the browser histogram
//! are all "group records by some key, count them, maybe track distinct
//! visitors per group". This module implements that once, parameterized
//! by a key-extraction function.

use crate::parser::LogRecord;
use std::collections::{HashMap, HashSet};

/// Accumulated counts for one group key
///
/// **Public** - produced by [`Tally`]
#[derive(Debug, Clone)]
pub struct TallyEntry {
    /// Group key (path, date, edge location, browser name, ...)
    pub key: String,

    /// Number of records in the group
    pub count: u64,

    visitors: HashSet<String>,
}

impl TallyEntry {
    /// Number of distinct visitors seen in this group
    pub fn unique_visitors(&self) -> u64 {
        self.visitors.len() as u64
    }
}

/// Insertion-ordered group counter
///
/// **Public** - keys keep first-seen order, which makes the descending
/// sort stable for equal counts
#[derive(Debug, Default)]
pub struct Tally {
    entries: Vec<TallyEntry>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record under `key`
    pub fn record(&mut self, key: &str) {
        self.entry_mut(key).count += 1;
    }

    /// Count one record under `key` and track its visitor
    pub fn record_visitor(&mut self, key: &str, visitor: &str) {
        let entry = self.entry_mut(key);
        entry.count += 1;
        if !entry.visitors.contains(visitor) {
            entry.visitors.insert(visitor.to_string());
        }
    }

    fn entry_mut(&mut self, key: &str) -> &mut TallyEntry {
        let idx = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.entries.push(TallyEntry {
                    key: key.to_string(),
                    count: 0,
                    visitors: HashSet::new(),
                });
                let i = self.entries.len() - 1;
                self.index.insert(key.to_string(), i);
                i
            }
        };
        &mut self.entries[idx]
    }

    /// Consume the tally, sorted by descending count
    ///
    /// Ties keep first-seen order (stable sort over insertion order).
    pub fn into_sorted_desc(self) -> Vec<TallyEntry> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }

    /// Consume the tally, keeping only the `n` highest-count groups
    pub fn into_top(self, n: usize) -> Vec<TallyEntry> {
        let mut entries = self.into_sorted_desc();
        entries.truncate(n);
        entries
    }

    /// Consume the tally in first-seen order
    pub fn into_entries(self) -> Vec<TallyEntry> {
        self.entries
    }
}

/// Group records by a key function, counting occurrences
///
/// **Public** - the plain-count variant (top pages, edges, browsers)
pub fn tally_by<'a, K, F>(records: impl IntoIterator<Item = &'a LogRecord>, key_fn: F) -> Tally
where
    K: AsRef<str>,
    F: Fn(&'a LogRecord) -> K,
{
    let mut tally = Tally::new();
    for record in records {
        tally.record(key_fn(record).as_ref());
    }
    tally
}

/// Group records by a key function, counting occurrences and distinct
/// visitors per group
///
/// **Public** - the set-accumulating variant (daily stats)
pub fn tally_visitors_by<'a, K, F, V>(
    records: impl IntoIterator<Item = &'a LogRecord>,
    key_fn: F,
    visitor_fn: V,
) -> Tally
where
    K: AsRef<str>,
    F: Fn(&'a LogRecord) -> K,
    V: Fn(&'a LogRecord) -> &'a str,
{
    let mut tally = Tally::new();
    for record in records {
        tally.record_visitor(key_fn(record).as_ref(), visitor_fn(record));
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut tally = Tally::new();
        tally.record("a");
        tally.record("b");
        tally.record("a");

        let entries = tally.into_sorted_desc();
        assert_eq!(entries[0].key, "a");
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries[1].key, "b");
        assert_eq!(entries[1].count, 1);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut tally = Tally::new();
        for key in ["x", "y", "z", "x", "y", "z"] {
            tally.record(key);
        }

        let keys: Vec<_> = tally.into_sorted_desc().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, ["x", "y", "z"]);
    }

    #[test]
    fn test_top_truncates() {
        let mut tally = Tally::new();
        for i in 0..20 {
            for _ in 0..=i {
                tally.record(&format!("k{}", i));
            }
        }

        let top = tally.into_top(5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].key, "k19");
        // Strictly non-increasing counts
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_visitor_sets_dedupe() {
        let mut tally = Tally::new();
        tally.record_visitor("2024-06-15", "u1");
        tally.record_visitor("2024-06-15", "u1");
        tally.record_visitor("2024-06-15", "u2");

        let entries = tally.into_entries();
        assert_eq!(entries[0].count, 3);
        assert_eq!(entries[0].unique_visitors(), 2);
    }
}
