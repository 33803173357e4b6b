//! # Optimistic Router
//!
//! Routes cross-domain messages to pluggable verification submodules and
//! accepts them optimistically, subject to a fraud-challenge window.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Verifying a submodule's own correctness is slow, so each message is
//! checked by one submodule and finalized only after a dispute window during
//! which watchers may flag that submodule:
//! - Submodule registry: message key → submodule handle
//! - Watcher set: who may flag
//! - Fraud ledger: flags per submodule, compared against a threshold
//! - Dispute window: one global deadline gating both flagging and acceptance
//!
//! ## Decision Order
//!
//! | Gate | Fails with |
//! |------|------------|
//! | Submodule verdict is `false` | `PreVerificationFailed` |
//! | Fraud count > threshold | `FlaggedFraudulent` |
//! | `now < deadline` | `WindowNotElapsed` |
//!
//! ## Module Structure
//!
//! ```text
//! optimistic-router/
//! ├── domain/          # Registry, watchers, fraud ledger, window, gates
//! ├── ports/           # OptimisticRouterApi, MessageVerifier, TimeSource
//! ├── adapters/        # In-memory directory, clocks, publishers
//! ├── events/          # RouterEvent
//! └── service.rs       # OptimisticRouterService
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use optimistic_router::*;
//! use std::sync::Arc;
//!
//! let directory = Arc::new(InMemorySubmoduleDirectory::new());
//! directory.deploy(submodule, Arc::new(my_verifier));
//!
//! let router = OptimisticRouterService::new(
//!     directory,
//!     Arc::new(SystemTimeSource),
//!     Arc::new(TracingEventPublisher),
//! );
//! router.initialize(owner, 2)?;
//! router.set_submodule(&owner, MessageKey::from("msg1"), submodule)?;
//! router.set_window_deadline(&owner, deadline)?;
//!
//! // Later, once the window has elapsed:
//! router.verify(&metadata, b"msg1")?;
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    InMemorySubmoduleDirectory, ManualTimeSource, NoopEventPublisher, RecordingEventPublisher,
    StaticVerdict, StaticVerdictSubmodule, SystemTimeSource, TracingEventPublisher,
};
pub use domain::{
    evaluate_gates, Address, AddressParseError, DisputeWindow, FraudLedger, GateSnapshot,
    MessageKey, RouterSettings, SubmoduleId, SubmoduleRegistry, Timestamp, WatcherSet,
};
pub use error::{RouterError, RouterResult, SubmoduleError};
pub use events::{RouterEvent, RouterEventEnvelope};
pub use ports::{
    MessageVerifier, OptimisticRouterApi, RouterEventPublisher, SubmoduleDirectory, TimeSource,
};
pub use service::OptimisticRouterService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
