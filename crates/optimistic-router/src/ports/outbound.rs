//! # Outbound Ports
//!
//! Traits for external dependencies: submodule capabilities, the clock and
//! the event sink.

use crate::domain::{SubmoduleId, Timestamp};
use crate::error::SubmoduleError;
use crate::events::RouterEventEnvelope;
use std::sync::Arc;

/// Verification capability of a submodule.
///
/// The router knows nothing about how a submodule decides. Implementations
/// may call back into the router; the router holds no lock while this runs.
pub trait MessageVerifier: Send + Sync {
    /// `Ok(true)` accepts the message, `Ok(false)` rejects it. Errors are
    /// propagated to the router's caller unchanged.
    fn verify(&self, metadata: &[u8], message: &[u8]) -> Result<bool, SubmoduleError>;
}

/// Binds submodule handles to callable capabilities.
pub trait SubmoduleDirectory: Send + Sync {
    /// `None` when nothing is deployed at `id`.
    fn lookup(&self, id: &SubmoduleId) -> Option<Arc<dyn MessageVerifier>>;
}

/// Time source for window checks.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Current Unix time in seconds.
    fn now(&self) -> Timestamp;
}

/// Sink for router domain events.
pub trait RouterEventPublisher: Send + Sync {
    /// Publish one event. Must not call back into the router.
    fn publish(&self, event: RouterEventEnvelope);
}
