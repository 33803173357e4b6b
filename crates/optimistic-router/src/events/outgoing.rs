//! Outgoing events for the optimistic router
//!
//! One event per successful mutation, and one per `verify` outcome.

use crate::domain::{Address, MessageKey, SubmoduleId, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Router domain event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouterEvent {
    Initialized {
        owner: Address,
        flag_threshold: u64,
    },
    FlagThresholdUpdated {
        previous: u64,
        current: u64,
    },
    SubmoduleSet {
        key: MessageKey,
        submodule: SubmoduleId,
        replaced: Option<SubmoduleId>,
    },
    WatcherAdded {
        watcher: Address,
        watcher_count: u64,
    },
    WindowDeadlineUpdated {
        previous: Timestamp,
        current: Timestamp,
    },
    SubmoduleFlagged {
        watcher: Address,
        submodule: SubmoduleId,
        fraud_count: u64,
    },
    MessageAccepted {
        submodule: SubmoduleId,
    },
    MessageRejected {
        submodule: Option<SubmoduleId>,
        reason: String,
    },
}

impl RouterEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => "initialized",
            Self::FlagThresholdUpdated { .. } => "flag_threshold_updated",
            Self::SubmoduleSet { .. } => "submodule_set",
            Self::WatcherAdded { .. } => "watcher_added",
            Self::WindowDeadlineUpdated { .. } => "window_deadline_updated",
            Self::SubmoduleFlagged { .. } => "submodule_flagged",
            Self::MessageAccepted { .. } => "message_accepted",
            Self::MessageRejected { .. } => "message_rejected",
        }
    }
}

/// Event with correlation id and emission time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterEventEnvelope {
    pub event_id: Uuid,
    pub timestamp: Timestamp,
    pub event: RouterEvent,
}

impl RouterEventEnvelope {
    pub fn new(event: RouterEvent, timestamp: Timestamp) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp,
            event,
        }
    }
}
