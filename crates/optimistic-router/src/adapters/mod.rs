//! Adapters for the optimistic router
//!
//! In-memory and system implementations of the outbound ports.

pub mod directory;
pub mod publisher;
pub mod submodules;
pub mod time;

pub use directory::InMemorySubmoduleDirectory;
pub use publisher::{NoopEventPublisher, RecordingEventPublisher, TracingEventPublisher};
pub use submodules::{StaticVerdict, StaticVerdictSubmodule};
pub use time::{ManualTimeSource, SystemTimeSource};
