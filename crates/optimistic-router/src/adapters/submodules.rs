//! Fixed-verdict submodule.
//!
//! Stands in for a real verifier when wiring scenarios and tests.

use crate::error::SubmoduleError;
use crate::ports::outbound::MessageVerifier;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// What a [`StaticVerdictSubmodule`] answers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticVerdict {
    Accept,
    Reject,
    Fail(String),
}

/// Submodule that answers every message the same way and counts its calls.
#[derive(Debug)]
pub struct StaticVerdictSubmodule {
    verdict: StaticVerdict,
    calls: AtomicU64,
}

impl StaticVerdictSubmodule {
    pub fn new(verdict: StaticVerdict) -> Self {
        Self {
            verdict,
            calls: AtomicU64::new(0),
        }
    }

    pub fn accepting() -> Self {
        Self::new(StaticVerdict::Accept)
    }

    pub fn rejecting() -> Self {
        Self::new(StaticVerdict::Reject)
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(StaticVerdict::Fail(reason.into()))
    }

    /// Number of `verify` calls received.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MessageVerifier for StaticVerdictSubmodule {
    fn verify(&self, _metadata: &[u8], _message: &[u8]) -> Result<bool, SubmoduleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.verdict {
            StaticVerdict::Accept => Ok(true),
            StaticVerdict::Reject => Ok(false),
            StaticVerdict::Fail(reason) => Err(SubmoduleError::Internal(reason.clone())),
        }
    }
}
