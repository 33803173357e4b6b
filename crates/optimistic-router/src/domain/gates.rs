//! # Verification Gates
//!
//! The accept/reject decision, as a pure function over state read before the
//! submodule was called.
//!
//! Gate order is fixed:
//!
//! ```text
//! pre-verify ──false──→ PreVerificationFailed
//!     │ true
//!     ↓
//! fraud_count > threshold ──→ FlaggedFraudulent
//!     │ no
//!     ↓
//! now < deadline ──→ WindowNotElapsed
//!     │ no
//!     ↓
//!  ACCEPT
//! ```

use super::value_objects::{SubmoduleId, Timestamp};
use crate::error::{RouterError, RouterResult};

/// Router state captured before the submodule capability runs.
///
/// Gates 2 and 3 are evaluated against this copy, so nothing the submodule
/// does during its call can change the outcome of the current decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateSnapshot {
    /// Submodule resolved for the message.
    pub submodule: SubmoduleId,
    /// Its fraud count at snapshot time.
    pub fraud_count: u64,
    /// Flag threshold at snapshot time.
    pub threshold: u64,
    /// Dispute deadline at snapshot time.
    pub deadline: Timestamp,
    /// Clock reading at snapshot time.
    pub now: Timestamp,
}

/// Gate 1: the submodule's own verdict.
pub fn gate_pre_verification(submodule: SubmoduleId, verdict: bool) -> RouterResult<()> {
    if !verdict {
        return Err(RouterError::PreVerificationFailed { submodule });
    }
    Ok(())
}

/// Gate 2: fraudulent once the count strictly exceeds the threshold.
pub fn gate_fraud_count(snapshot: &GateSnapshot) -> RouterResult<()> {
    if snapshot.fraud_count > snapshot.threshold {
        return Err(RouterError::FlaggedFraudulent {
            submodule: snapshot.submodule,
            fraud_count: snapshot.fraud_count,
            threshold: snapshot.threshold,
        });
    }
    Ok(())
}

/// Gate 3: verification only succeeds once the window has closed.
pub fn gate_window_elapsed(snapshot: &GateSnapshot) -> RouterResult<()> {
    if snapshot.now < snapshot.deadline {
        return Err(RouterError::WindowNotElapsed {
            now: snapshot.now,
            deadline: snapshot.deadline,
        });
    }
    Ok(())
}

/// Run all three gates in order and stop at the first failure.
pub fn evaluate_gates(snapshot: &GateSnapshot, verdict: bool) -> RouterResult<()> {
    gate_pre_verification(snapshot.submodule, verdict)?;
    gate_fraud_count(snapshot)?;
    gate_window_elapsed(snapshot)
}
