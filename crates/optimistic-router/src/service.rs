//! Optimistic Router Service - verification orchestrator
//!
//! Owns all router state behind one lock. Every inbound operation takes the
//! lock once, so callers are serialized into a total order. `verify` and
//! `pre_verify` release the lock before the submodule runs: a submodule that
//! calls back into the router sees committed state only, and the decision
//! for the current call is made against the snapshot taken beforehand.

use crate::domain::{
    evaluate_gates, Address, DisputeWindow, FraudLedger, GateSnapshot, MessageKey,
    RouterSettings, SubmoduleId, SubmoduleRegistry, Timestamp, WatcherSet,
};
use crate::error::{RouterError, RouterResult, SubmoduleError};
use crate::events::{RouterEvent, RouterEventEnvelope};
use crate::metrics;
use crate::ports::inbound::OptimisticRouterApi;
use crate::ports::outbound::{RouterEventPublisher, SubmoduleDirectory, TimeSource};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// All mutable router state.
#[derive(Debug, Default)]
struct RouterState {
    settings: RouterSettings,
    registry: SubmoduleRegistry,
    watchers: WatcherSet,
    ledger: FraudLedger,
    window: DisputeWindow,
}

impl RouterState {
    /// Read everything gates 2 and 3 need, in one consistent view.
    fn snapshot(&self, submodule: SubmoduleId, now: Timestamp) -> GateSnapshot {
        GateSnapshot {
            submodule,
            fraud_count: self.ledger.count(&submodule),
            threshold: self.settings.flag_threshold(),
            deadline: self.window.deadline(),
            now,
        }
    }
}

/// Optimistic router implementation
pub struct OptimisticRouterService<D, T, P>
where
    D: SubmoduleDirectory,
    T: TimeSource,
    P: RouterEventPublisher,
{
    state: Arc<RwLock<RouterState>>,
    directory: Arc<D>,
    clock: Arc<T>,
    publisher: Arc<P>,
}

impl<D, T, P> OptimisticRouterService<D, T, P>
where
    D: SubmoduleDirectory,
    T: TimeSource,
    P: RouterEventPublisher,
{
    /// Create an uninitialized router. Call `initialize` before any
    /// owner-only operation.
    pub fn new(directory: Arc<D>, clock: Arc<T>, publisher: Arc<P>) -> Self {
        Self {
            state: Arc::new(RwLock::new(RouterState::default())),
            directory,
            clock,
            publisher,
        }
    }

    fn publish(&self, event: RouterEvent) {
        self.publisher
            .publish(RouterEventEnvelope::new(event, self.clock.now()));
    }

    /// Run a mutation under the write lock after the owner check.
    fn with_owner<R>(
        &self,
        caller: &Address,
        mutate: impl FnOnce(&mut RouterState) -> R,
    ) -> RouterResult<R> {
        let mut state = self.state.write();
        if let Err(err) = state.settings.ensure_owner(caller) {
            warn!("[router] rejected admin call from {}", caller);
            return Err(err);
        }
        Ok(mutate(&mut state))
    }

    /// Call the capability bound to `submodule`. No lock is held here.
    fn call_submodule(
        &self,
        submodule: SubmoduleId,
        metadata: &[u8],
        message: &[u8],
    ) -> RouterResult<bool> {
        let verifier = self
            .directory
            .lookup(&submodule)
            .ok_or(SubmoduleError::Unreachable(submodule))?;
        let verdict = verifier.verify(metadata, message)?;
        debug!(
            "[router] submodule {} returned {} for {}-byte message",
            submodule,
            verdict,
            message.len()
        );
        Ok(verdict)
    }

    /// Gates 1-3 for an already resolved submodule.
    fn decide(&self, snapshot: &GateSnapshot, metadata: &[u8], message: &[u8]) -> RouterResult<()> {
        let verdict = self.call_submodule(snapshot.submodule, metadata, message)?;
        debug!(
            "[router] gates for {}: verdict={}, flags={}/{}, now={}, deadline={}",
            snapshot.submodule,
            verdict,
            snapshot.fraud_count,
            snapshot.threshold,
            snapshot.now,
            snapshot.deadline
        );
        evaluate_gates(snapshot, verdict)
    }

    fn record_rejection(&self, submodule: Option<SubmoduleId>, err: &RouterError) {
        match err {
            RouterError::FlaggedFraudulent { .. } => warn!("[router] verify rejected: {}", err),
            _ => debug!("[router] verify rejected: {}", err),
        }
        metrics::record_message_rejected(err.reason());
        self.publish(RouterEvent::MessageRejected {
            submodule,
            reason: err.reason().to_string(),
        });
    }
}

impl<D, T, P> OptimisticRouterApi for OptimisticRouterService<D, T, P>
where
    D: SubmoduleDirectory,
    T: TimeSource,
    P: RouterEventPublisher,
{
    fn initialize(&self, owner: Address, flag_threshold: u64) -> RouterResult<()> {
        self.state
            .write()
            .settings
            .initialize(owner, flag_threshold)?;
        info!(
            "[router] initialized: owner={}, flag_threshold={}",
            owner, flag_threshold
        );
        self.publish(RouterEvent::Initialized {
            owner,
            flag_threshold,
        });
        Ok(())
    }

    fn set_flag_threshold(&self, caller: &Address, value: u64) -> RouterResult<()> {
        let previous = self.with_owner(caller, |state| state.settings.set_flag_threshold(value))?;
        info!("[router] flag threshold {} -> {}", previous, value);
        self.publish(RouterEvent::FlagThresholdUpdated {
            previous,
            current: value,
        });
        Ok(())
    }

    fn set_submodule(
        &self,
        caller: &Address,
        key: MessageKey,
        handle: SubmoduleId,
    ) -> RouterResult<()> {
        let replaced = self.with_owner(caller, |state| state.registry.set(key.clone(), handle))?;
        if handle.is_zero() {
            warn!("[router] null submodule registered for {:?}", key);
        } else {
            info!("[router] submodule {} registered for {:?}", handle, key);
        }
        self.publish(RouterEvent::SubmoduleSet {
            key,
            submodule: handle,
            replaced,
        });
        Ok(())
    }

    fn add_watcher(&self, caller: &Address, watcher: Address) -> RouterResult<()> {
        let (added, watcher_count) = self.with_owner(caller, |state| {
            (state.watchers.add(watcher), state.watchers.count())
        })?;
        if !added {
            debug!("[router] watcher {} already present", watcher);
            return Ok(());
        }
        info!("[router] watcher {} added ({} total)", watcher, watcher_count);
        self.publish(RouterEvent::WatcherAdded {
            watcher,
            watcher_count,
        });
        Ok(())
    }

    fn set_window_deadline(&self, caller: &Address, deadline: Timestamp) -> RouterResult<()> {
        let previous = self.with_owner(caller, |state| state.window.set_deadline(deadline))?;
        info!("[router] dispute deadline {} -> {}", previous, deadline);
        self.publish(RouterEvent::WindowDeadlineUpdated {
            previous,
            current: deadline,
        });
        Ok(())
    }

    fn route(&self, message: &[u8]) -> RouterResult<SubmoduleId> {
        self.state.read().registry.resolve(message)
    }

    fn pre_verify(&self, metadata: &[u8], message: &[u8]) -> RouterResult<bool> {
        let submodule = self.route(message)?;
        self.call_submodule(submodule, metadata, message)
    }

    fn verify(&self, metadata: &[u8], message: &[u8]) -> RouterResult<bool> {
        let snapshot = {
            let state = self.state.read();
            let submodule = match state.registry.resolve(message) {
                Ok(submodule) => submodule,
                Err(err) => {
                    drop(state);
                    self.record_rejection(None, &err);
                    return Err(err);
                }
            };
            state.snapshot(submodule, self.clock.now())
        };

        match self.decide(&snapshot, metadata, message) {
            Ok(()) => {
                debug!("[router] message accepted via {}", snapshot.submodule);
                metrics::record_message_accepted();
                self.publish(RouterEvent::MessageAccepted {
                    submodule: snapshot.submodule,
                });
                Ok(true)
            }
            Err(err) => {
                self.record_rejection(Some(snapshot.submodule), &err);
                Err(err)
            }
        }
    }

    fn flag(&self, caller: &Address, submodule: SubmoduleId) -> RouterResult<u64> {
        let result = {
            let mut state = self.state.write();
            if !state.watchers.contains(caller) {
                Err(RouterError::Unauthorized { caller: *caller })
            } else {
                let now = self.clock.now();
                let deadline = state.window.deadline();
                if state.window.is_open(now) {
                    Ok(state.ledger.record_flag(submodule))
                } else {
                    Err(RouterError::WindowAlreadyClosed { now, deadline })
                }
            }
        };

        match result {
            Ok(fraud_count) => {
                info!(
                    "[router] {} flagged {} (count={})",
                    caller, submodule, fraud_count
                );
                metrics::record_flag_raised();
                self.publish(RouterEvent::SubmoduleFlagged {
                    watcher: *caller,
                    submodule,
                    fraud_count,
                });
                Ok(fraud_count)
            }
            Err(err) => {
                warn!("[router] flag by {} refused: {}", caller, err);
                metrics::record_flag_refused(err.reason());
                Err(err)
            }
        }
    }

    fn get_submodule(&self, message: &[u8]) -> RouterResult<SubmoduleId> {
        self.route(message)
    }

    fn get_fraud_count(&self, submodule: &SubmoduleId) -> u64 {
        self.state.read().ledger.count(submodule)
    }

    fn is_watcher(&self, address: &Address) -> bool {
        self.state.read().watchers.contains(address)
    }

    fn watcher_count(&self) -> u64 {
        self.state.read().watchers.count()
    }

    fn flag_threshold(&self) -> u64 {
        self.state.read().settings.flag_threshold()
    }

    fn window_deadline(&self) -> Timestamp {
        self.state.read().window.deadline()
    }

    fn is_window_open(&self) -> bool {
        let now = self.clock.now();
        self.state.read().window.is_open(now)
    }

    fn owner(&self) -> Option<Address> {
        self.state.read().settings.owner()
    }
}
