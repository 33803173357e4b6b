//! # Fraud Ledger
//!
//! Per-submodule flag counters. Counts only grow; there is no reset and no
//! per-watcher de-duplication, so each `record_flag` call is one vote.

use super::value_objects::SubmoduleId;
use std::collections::HashMap;

/// Accumulated flags per submodule.
#[derive(Debug, Default, Clone)]
pub struct FraudLedger {
    counts: HashMap<SubmoduleId, u64>,
}

impl FraudLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one flag and return the new count.
    pub fn record_flag(&mut self, submodule: SubmoduleId) -> u64 {
        let count = self.counts.entry(submodule).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Current count; never-flagged submodules read as zero.
    pub fn count(&self, submodule: &SubmoduleId) -> u64 {
        self.counts.get(submodule).copied().unwrap_or(0)
    }

    /// A submodule is fraudulent once its count strictly exceeds `threshold`.
    pub fn exceeds(&self, submodule: &SubmoduleId, threshold: u64) -> bool {
        self.count(submodule) > threshold
    }
}
