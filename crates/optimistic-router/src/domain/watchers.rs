//! # Watcher Set
//!
//! Append-only set of identities allowed to flag submodules.

use super::value_objects::Address;
use std::collections::HashSet;

/// Authorized watchers plus a count of distinct members ever added.
#[derive(Debug, Default, Clone)]
pub struct WatcherSet {
    members: HashSet<Address>,
    count: u64,
}

impl WatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a watcher. Returns `true` only the first time `address` is added;
    /// the counter moves on that call alone.
    pub fn add(&mut self, address: Address) -> bool {
        let inserted = self.members.insert(address);
        if inserted {
            self.count += 1;
        }
        inserted
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    /// Distinct watchers ever added.
    pub fn count(&self) -> u64 {
        self.count
    }
}
