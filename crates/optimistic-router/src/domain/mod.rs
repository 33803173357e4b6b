//! # Domain Module
//!
//! Router state components and the verification decision.

pub mod dispute_window;
pub mod fraud_ledger;
pub mod gates;
pub mod registry;
pub mod settings;
pub mod value_objects;
pub mod watchers;

pub use dispute_window::DisputeWindow;
pub use fraud_ledger::FraudLedger;
pub use gates::{
    evaluate_gates, gate_fraud_count, gate_pre_verification, gate_window_elapsed, GateSnapshot,
};
pub use registry::SubmoduleRegistry;
pub use settings::RouterSettings;
pub use value_objects::{Address, AddressParseError, MessageKey, SubmoduleId, Timestamp};
pub use watchers::WatcherSet;
