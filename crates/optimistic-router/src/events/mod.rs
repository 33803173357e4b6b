//! Events module for the optimistic router

pub mod outgoing;

pub use outgoing::{RouterEvent, RouterEventEnvelope};
