//! # Submodule Registry
//!
//! Maps opaque message keys to submodule handles. Last write wins, and the
//! null handle is accepted verbatim.

use super::value_objects::{MessageKey, SubmoduleId};
use crate::error::{RouterError, RouterResult};
use std::collections::HashMap;

/// Message key → submodule handle table.
#[derive(Debug, Default, Clone)]
pub struct SubmoduleRegistry {
    entries: HashMap<MessageKey, SubmoduleId>,
}

impl SubmoduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` for `key`, returning the handle it replaced.
    pub fn set(&mut self, key: MessageKey, handle: SubmoduleId) -> Option<SubmoduleId> {
        self.entries.insert(key, handle)
    }

    /// Resolve a key. Missing keys and keys bound to the null handle are
    /// both `NotFound`.
    pub fn resolve(&self, key: &[u8]) -> RouterResult<SubmoduleId> {
        match self.entries.get(key) {
            Some(handle) if !handle.is_zero() => Ok(*handle),
            _ => Err(RouterError::NotFound {
                key: MessageKey::from(key),
            }),
        }
    }

    /// Number of keys ever registered, null handles included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
