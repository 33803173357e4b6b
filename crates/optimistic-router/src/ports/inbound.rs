//! # Inbound Ports
//!
//! API trait defining what the router can do.
//!
//! Identity is passed explicitly as `caller`; authentication of that identity
//! belongs to the layer in front of the router.

use crate::domain::{Address, MessageKey, SubmoduleId, Timestamp};
use crate::error::RouterResult;

/// Optimistic router API - inbound port.
pub trait OptimisticRouterApi: Send + Sync {
    /// One-time setup of owner and flag threshold.
    fn initialize(&self, owner: Address, flag_threshold: u64) -> RouterResult<()>;

    /// Owner only.
    fn set_flag_threshold(&self, caller: &Address, value: u64) -> RouterResult<()>;

    /// Owner only. Overwrites any existing mapping; the null handle is accepted.
    fn set_submodule(
        &self,
        caller: &Address,
        key: MessageKey,
        handle: SubmoduleId,
    ) -> RouterResult<()>;

    /// Owner only. Idempotent.
    fn add_watcher(&self, caller: &Address, watcher: Address) -> RouterResult<()>;

    /// Owner only. Any value is accepted.
    fn set_window_deadline(&self, caller: &Address, deadline: Timestamp) -> RouterResult<()>;

    /// Resolve the submodule for a message.
    fn route(&self, message: &[u8]) -> RouterResult<SubmoduleId>;

    /// Call the resolved submodule directly, without fraud or window gating.
    fn pre_verify(&self, metadata: &[u8], message: &[u8]) -> RouterResult<bool>;

    /// Full three-gate decision. `Ok(true)` means accepted.
    fn verify(&self, metadata: &[u8], message: &[u8]) -> RouterResult<bool>;

    /// Watcher only. Returns the submodule's new fraud count.
    fn flag(&self, caller: &Address, submodule: SubmoduleId) -> RouterResult<u64>;

    /// Same lookup as [`route`](Self::route).
    fn get_submodule(&self, message: &[u8]) -> RouterResult<SubmoduleId>;

    /// Fraud count of a submodule (zero if never flagged).
    fn get_fraud_count(&self, submodule: &SubmoduleId) -> u64;

    /// Whether `address` is an authorized watcher.
    fn is_watcher(&self, address: &Address) -> bool;

    /// Distinct watchers ever added.
    fn watcher_count(&self) -> u64;

    /// Current flag threshold.
    fn flag_threshold(&self) -> u64;

    /// Current dispute deadline.
    fn window_deadline(&self) -> Timestamp;

    /// `now < deadline`
    fn is_window_open(&self) -> bool;

    /// Owner, if initialized.
    fn owner(&self) -> Option<Address>;
}
