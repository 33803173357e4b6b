//! # Router Settings
//!
//! Administrative state (owner, flag threshold) and the authority check that
//! gates every owner-only mutation.

use super::value_objects::Address;
use crate::error::{RouterError, RouterResult};

/// Owner-controlled configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    owner: Option<Address>,
    flag_threshold: u64,
}

impl RouterSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time setup. Fails with `AlreadyInitialized` on a second call.
    pub fn initialize(&mut self, owner: Address, flag_threshold: u64) -> RouterResult<()> {
        if self.owner.is_some() {
            return Err(RouterError::AlreadyInitialized);
        }
        self.owner = Some(owner);
        self.flag_threshold = flag_threshold;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    /// Authority check for owner-only mutators. Nobody passes before
    /// initialization.
    pub fn ensure_owner(&self, caller: &Address) -> RouterResult<()> {
        match self.owner {
            Some(owner) if owner == *caller => Ok(()),
            _ => Err(RouterError::Unauthorized { caller: *caller }),
        }
    }

    pub fn flag_threshold(&self) -> u64 {
        self.flag_threshold
    }

    /// Returns the previous threshold.
    pub fn set_flag_threshold(&mut self, value: u64) -> u64 {
        std::mem::replace(&mut self.flag_threshold, value)
    }
}
