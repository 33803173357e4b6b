//! # Router Metrics
//!
//! Prometheus metrics for verification outcomes and flagging activity.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! optimistic-router = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `router_messages_accepted_total` - Counter of accepted verifications
//! - `router_messages_rejected_total` - Counter of rejected verifications (by reason)
//! - `router_flags_raised_total` - Counter of successful fraud flags
//! - `router_flags_refused_total` - Counter of refused flag attempts (by reason)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total messages accepted
    pub static ref MESSAGES_ACCEPTED: IntCounter = register_int_counter!(
        "router_messages_accepted_total",
        "Total number of messages accepted by verify"
    )
    .expect("Failed to create MESSAGES_ACCEPTED metric");

    /// Total messages rejected, labeled by reason
    pub static ref MESSAGES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "router_messages_rejected_total",
        "Total number of messages rejected by verify",
        &["reason"]
    )
    .expect("Failed to create MESSAGES_REJECTED metric");

    /// Total successful flags
    pub static ref FLAGS_RAISED: IntCounter = register_int_counter!(
        "router_flags_raised_total",
        "Total number of fraud flags recorded"
    )
    .expect("Failed to create FLAGS_RAISED metric");

    /// Total refused flags, labeled by reason
    pub static ref FLAGS_REFUSED: IntCounterVec = register_int_counter_vec!(
        "router_flags_refused_total",
        "Total number of flag attempts refused",
        &["reason"]
    )
    .expect("Failed to create FLAGS_REFUSED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an accepted message
#[cfg(feature = "metrics")]
pub fn record_message_accepted() {
    MESSAGES_ACCEPTED.inc();
}

/// Record a rejected message with reason
#[cfg(feature = "metrics")]
pub fn record_message_rejected(reason: &str) {
    MESSAGES_REJECTED.with_label_values(&[reason]).inc();
}

/// Record a successful flag
#[cfg(feature = "metrics")]
pub fn record_flag_raised() {
    FLAGS_RAISED.inc();
}

/// Record a refused flag with reason
#[cfg(feature = "metrics")]
pub fn record_flag_refused(reason: &str) {
    FLAGS_REFUSED.with_label_values(&[reason]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_message_accepted() {}

#[cfg(not(feature = "metrics"))]
pub fn record_message_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_flag_raised() {}

#[cfg(not(feature = "metrics"))]
pub fn record_flag_refused(_reason: &str) {}
