//! Shared test wiring.

use optimistic_router::{
    Address, InMemorySubmoduleDirectory, ManualTimeSource, MessageKey, MessageVerifier,
    OptimisticRouterApi, OptimisticRouterService, RecordingEventPublisher, RouterEvent,
    StaticVerdictSubmodule, SubmoduleId, Timestamp,
};
use std::sync::Arc;

pub type TestRouter =
    OptimisticRouterService<InMemorySubmoduleDirectory, ManualTimeSource, RecordingEventPublisher>;

pub const OWNER: Address = Address::repeat(0xAA);
pub const WATCHER_A: Address = Address::repeat(0xA1);
pub const WATCHER_B: Address = Address::repeat(0xA2);
pub const WATCHER_C: Address = Address::repeat(0xA3);
pub const ATTACKER: Address = Address::repeat(0xEE);

pub const SUBMODULE_X: SubmoduleId = Address::repeat(0x51);
pub const SUBMODULE_Y: SubmoduleId = Address::repeat(0x52);

pub const START: Timestamp = 1_000;
pub const DEADLINE: Timestamp = 2_000;
pub const THRESHOLD: u64 = 2;

/// Router initialized by [`OWNER`] with threshold [`THRESHOLD`], deadline
/// [`DEADLINE`] and the clock at [`START`]. No watchers, no routes.
pub struct RouterHarness {
    pub router: Arc<TestRouter>,
    pub directory: Arc<InMemorySubmoduleDirectory>,
    pub clock: Arc<ManualTimeSource>,
    pub events: Arc<RecordingEventPublisher>,
}

impl RouterHarness {
    pub fn new() -> Self {
        let directory = Arc::new(InMemorySubmoduleDirectory::new());
        let clock = Arc::new(ManualTimeSource::new(START));
        let events = Arc::new(RecordingEventPublisher::new());
        let router = Arc::new(OptimisticRouterService::new(
            Arc::clone(&directory),
            Arc::clone(&clock),
            Arc::clone(&events),
        ));
        router.initialize(OWNER, THRESHOLD).unwrap();
        router.set_window_deadline(&OWNER, DEADLINE).unwrap();
        Self {
            router,
            directory,
            clock,
            events,
        }
    }

    pub fn with_watchers(self, watchers: &[Address]) -> Self {
        for watcher in watchers {
            self.router.add_watcher(&OWNER, *watcher).unwrap();
        }
        self
    }

    /// Deploy `verifier` at `id` and route `key` to it.
    pub fn deploy(&self, key: &str, id: SubmoduleId, verifier: Arc<dyn MessageVerifier>) {
        self.directory.deploy(id, verifier);
        self.router
            .set_submodule(&OWNER, MessageKey::from(key), id)
            .unwrap();
    }

    pub fn deploy_accepting(&self, key: &str, id: SubmoduleId) -> Arc<StaticVerdictSubmodule> {
        let submodule = Arc::new(StaticVerdictSubmodule::accepting());
        self.deploy(key, id, submodule.clone());
        submodule
    }

    pub fn deploy_rejecting(&self, key: &str, id: SubmoduleId) -> Arc<StaticVerdictSubmodule> {
        let submodule = Arc::new(StaticVerdictSubmodule::rejecting());
        self.deploy(key, id, submodule.clone());
        submodule
    }

    pub fn close_window(&self) {
        self.clock.set(DEADLINE);
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.events().iter().map(|e| e.event.name()).collect()
    }

    pub fn last_event(&self) -> Option<RouterEvent> {
        self.events.events().pop().map(|e| e.event)
    }
}

impl Default for RouterHarness {
    fn default() -> Self {
        Self::new()
    }
}
