//! In-memory submodule directory.

use crate::domain::SubmoduleId;
use crate::ports::outbound::{MessageVerifier, SubmoduleDirectory};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Handle → capability table kept in memory.
#[derive(Default)]
pub struct InMemorySubmoduleDirectory {
    deployed: RwLock<HashMap<SubmoduleId, Arc<dyn MessageVerifier>>>,
}

impl InMemorySubmoduleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a capability to `id`, replacing any previous binding.
    pub fn deploy(&self, id: SubmoduleId, verifier: Arc<dyn MessageVerifier>) {
        debug!("[router] deploying submodule {}", id);
        self.deployed.write().insert(id, verifier);
    }

    /// Builder form of [`deploy`](Self::deploy).
    pub fn with(self, id: SubmoduleId, verifier: Arc<dyn MessageVerifier>) -> Self {
        self.deploy(id, verifier);
        self
    }

    pub fn len(&self) -> usize {
        self.deployed.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.deployed.read().is_empty()
    }
}

impl SubmoduleDirectory for InMemorySubmoduleDirectory {
    fn lookup(&self, id: &SubmoduleId) -> Option<Arc<dyn MessageVerifier>> {
        self.deployed.read().get(id).cloned()
    }
}
