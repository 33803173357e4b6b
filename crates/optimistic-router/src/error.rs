//! Error types for the optimistic router
//!
//! Every failure is terminal for the call that produced it; the caller decides
//! whether to resubmit later or escalate.

use crate::domain::{Address, MessageKey, SubmoduleId};
use thiserror::Error;

/// Errors raised by a submodule's verification capability.
///
/// These travel through the router unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmoduleError {
    /// No callable capability is bound to the handle.
    #[error("Submodule {0} is unreachable")]
    Unreachable(SubmoduleId),

    /// The submodule could not interpret its input.
    #[error("Submodule rejected input: {0}")]
    InvalidInput(String),

    /// Implementation-defined failure inside the submodule.
    #[error("Submodule failure: {0}")]
    Internal(String),
}

/// Router errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Caller lacks the owner or watcher capability for the mutation.
    #[error("Unauthorized caller: {caller}")]
    Unauthorized { caller: Address },

    /// No submodule registered for the message key.
    #[error("No submodule registered for {key:?}")]
    NotFound { key: MessageKey },

    /// The resolved submodule rejected the message.
    #[error("Pre-verification failed by submodule {submodule}")]
    PreVerificationFailed { submodule: SubmoduleId },

    /// The resolved submodule's fraud count exceeds the threshold.
    #[error("Submodule {submodule} flagged fraudulent: {fraud_count} flags > threshold {threshold}")]
    FlaggedFraudulent {
        submodule: SubmoduleId,
        fraud_count: u64,
        threshold: u64,
    },

    /// Verification attempted while the dispute window is open.
    #[error("Dispute window not elapsed: now={now}, deadline={deadline}")]
    WindowNotElapsed { now: u64, deadline: u64 },

    /// Flag attempted after the dispute window closed.
    #[error("Dispute window already closed: now={now}, deadline={deadline}")]
    WindowAlreadyClosed { now: u64, deadline: u64 },

    /// `initialize` called more than once.
    #[error("Router already initialized")]
    AlreadyInitialized,

    /// Error raised by the submodule capability itself.
    #[error(transparent)]
    Submodule(#[from] SubmoduleError),
}

impl RouterError {
    /// Stable label for events and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotFound { .. } => "not_found",
            Self::PreVerificationFailed { .. } => "pre_verification_failed",
            Self::FlaggedFraudulent { .. } => "flagged_fraudulent",
            Self::WindowNotElapsed { .. } => "window_not_elapsed",
            Self::WindowAlreadyClosed { .. } => "window_already_closed",
            Self::AlreadyInitialized => "already_initialized",
            Self::Submodule(_) => "submodule_error",
        }
    }
}

/// Result type for router operations
pub type RouterResult<T> = Result<T, RouterError>;
