// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Intention history log
//!
//! Every intention carries an append-only list of human-readable change
//! records: one `Creation` entry stamped at construction, then one entry per
//! mutation, tagged with the pass that performed it. Entries are ordered by a
//! global sequence counter so chronology is comparable across intentions.

use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SEQUENCE: AtomicUsize = AtomicUsize::new(0);

fn next_sequence() -> usize {
    NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Global creation order; later entries have strictly greater values.
    pub sequence: usize,
    /// The originator: `"Creation"` or an intention pass name.
    pub tag: String,
    pub summary: String,
}

impl Display for HistoryEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.tag, self.summary)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntentionHistory {
    entries: Vec<HistoryEntry>,
}

impl IntentionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. The only mutation the log supports.
    pub fn record(&mut self, tag: impl Into<String>, summary: impl Into<String>) {
        self.entries.push(HistoryEntry {
            sequence: next_sequence(),
            tag: tag.into(),
            summary: summary.into(),
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_chronologically_ordered() {
        let mut history = IntentionHistory::new();
        history.record("Creation", "created");
        history.record("PropertyMerge", "merged accessor pair");
        history.record("OverrideDetection", "marked override");

        let entries = history.entries();
        assert_eq!(entries.len(), 3);
        for pair in entries.windows(2) {
            assert!(pair[0].sequence < pair[1].sequence);
        }
    }

    #[test]
    fn test_display_format() {
        let mut history = IntentionHistory::new();
        history.record("FileGrouping", "merged declaration from header");
        assert_eq!(
            history.entries()[0].to_string(),
            "[FileGrouping] merged declaration from header"
        );
    }
}
