//! Best-candidate deduplication across repeated profiling runs
//!
//! The same logical model can appear several times in the input tree, once
//! per profiler variant. The deduplicator keeps exactly one record per raw
//! file-derived name, preferring candidates with a higher quality signal.
//! It is a value owned by a single pipeline run, never process-wide state,
//! so the pipeline stays safely re-invocable within one process.

use crate::record::ModelRecord;
use std::collections::HashMap;

#[derive(Debug)]
struct Candidate {
    quality: u8,
    record: ModelRecord,
}

/// Retains the best record per raw file-derived name
#[derive(Debug, Default)]
pub struct Deduplicator {
    table: HashMap<String, Candidate>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a candidate. The first candidate for a key is always kept; a
    /// later candidate replaces it only when its quality signal is strictly
    /// greater. Ties keep the earliest-seen candidate.
    pub fn admit(&mut self, key: String, quality: u8, record: ModelRecord) {
        match self.table.get_mut(&key) {
            Some(stored) if quality > stored.quality => {
                *stored = Candidate { quality, record };
            }
            Some(_) => {}
            None => {
                self.table.insert(key, Candidate { quality, record });
            }
        }
    }

    /// Number of retained records
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Drain the retained records. Order is unspecified; the final
    /// serialization step owns any ordering concerns.
    pub fn finalize(self) -> Vec<ModelRecord> {
        self.table.into_values().map(|c| c.record).collect()
    }
}
