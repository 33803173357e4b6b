//! # Governance Attacks
//!
//! Misuse of owner-only configuration: outsiders attempting takeover, and
//! an owner (or stolen owner key) gaming the dispute deadline or routing
//! to the null handle.

#[cfg(test)]
mod tests {
    use crate::harness::*;
    use optimistic_router::{
        Address, InMemorySubmoduleDirectory, ManualTimeSource, MessageKey, NoopEventPublisher,
        OptimisticRouterApi, OptimisticRouterService, RouterError,
    };
    use std::sync::Arc;

    // =============================================================================
    // TAKEOVER
    // =============================================================================

    #[test]
    fn test_outsider_cannot_configure() {
        let h = RouterHarness::new();
        let denied = Err(RouterError::Unauthorized { caller: ATTACKER });

        assert_eq!(h.router.set_flag_threshold(&ATTACKER, 1_000), denied);
        assert_eq!(
            h.router
                .set_submodule(&ATTACKER, MessageKey::from("msg1"), SUBMODULE_Y),
            denied
        );
        assert_eq!(h.router.add_watcher(&ATTACKER, ATTACKER), denied);
        assert_eq!(h.router.set_window_deadline(&ATTACKER, u64::MAX), denied);

        assert_eq!(h.router.flag_threshold(), THRESHOLD);
        assert!(h.router.route(b"msg1").is_err());
        assert!(!h.router.is_watcher(&ATTACKER));
        assert_eq!(h.router.window_deadline(), DEADLINE);
    }

    /// A watcher key is not an admin key.
    #[test]
    fn test_watcher_cannot_configure() {
        let h = RouterHarness::new().with_watchers(&[WATCHER_A]);
        assert!(h.router.add_watcher(&WATCHER_A, WATCHER_B).is_err());
        assert!(h.router.set_flag_threshold(&WATCHER_A, 0).is_err());
    }

    #[test]
    fn test_reinitialize_rejected() {
        let h = RouterHarness::new();
        assert_eq!(
            h.router.initialize(ATTACKER, u64::MAX),
            Err(RouterError::AlreadyInitialized)
        );
        assert_eq!(h.router.owner(), Some(OWNER));
        assert_eq!(h.router.flag_threshold(), THRESHOLD);
    }

    /// Before initialization nobody, including the zero address, is owner.
    #[test]
    fn test_uninitialized_router_has_no_owner() {
        let router = OptimisticRouterService::new(
            Arc::new(InMemorySubmoduleDirectory::new()),
            Arc::new(ManualTimeSource::new(START)),
            Arc::new(NoopEventPublisher),
        );
        assert_eq!(router.owner(), None);
        for caller in [Address::ZERO, OWNER, ATTACKER] {
            assert!(matches!(
                router.add_watcher(&caller, caller),
                Err(RouterError::Unauthorized { .. })
            ));
        }
    }

    // =============================================================================
    // DEADLINE MANIPULATION
    // =============================================================================

    /// Pulling the deadline into the past closes the window at once: pending
    /// flags stop and messages become deliverable.
    #[test]
    fn test_deadline_pulled_into_past() {
        let h = RouterHarness::new().with_watchers(&[WATCHER_A]);
        h.deploy_accepting("msg1", SUBMODULE_X);

        h.router.set_window_deadline(&OWNER, START - 1).unwrap();
        assert!(!h.router.is_window_open());
        assert!(h.router.flag(&WATCHER_A, SUBMODULE_X).is_err());
        assert_eq!(h.router.verify(b"", b"msg1"), Ok(true));
    }

    /// Pushing the deadline out reopens a closed window.
    #[test]
    fn test_deadline_reopened() {
        let h = RouterHarness::new().with_watchers(&[WATCHER_A]);
        h.deploy_accepting("msg1", SUBMODULE_X);
        h.close_window();
        assert_eq!(h.router.verify(b"", b"msg1"), Ok(true));

        h.router.set_window_deadline(&OWNER, DEADLINE + 100).unwrap();
        assert!(h.router.is_window_open());
        assert_eq!(h.router.flag(&WATCHER_A, SUBMODULE_X), Ok(1));
        assert!(matches!(
            h.router.verify(b"", b"msg1"),
            Err(RouterError::WindowNotElapsed { .. })
        ));
    }

    /// `u64::MAX` keeps the window open forever: nothing is ever delivered.
    #[test]
    fn test_deadline_at_max_blocks_forever() {
        let h = RouterHarness::new();
        h.deploy_accepting("msg1", SUBMODULE_X);
        h.router.set_window_deadline(&OWNER, u64::MAX).unwrap();
        h.clock.set(u64::MAX - 1);

        assert!(matches!(
            h.router.verify(b"", b"msg1"),
            Err(RouterError::WindowNotElapsed { .. })
        ));
    }

    // =============================================================================
    // NULL HANDLE
    // =============================================================================

    /// Routing a key to the null handle disables it.
    #[test]
    fn test_null_handle_disables_route() {
        let h = RouterHarness::new();
        h.deploy_accepting("msg1", SUBMODULE_X);
        h.router
            .set_submodule(&OWNER, MessageKey::from("msg1"), Address::ZERO)
            .unwrap();
        h.close_window();

        let not_found = Err(RouterError::NotFound {
            key: MessageKey::from("msg1"),
        });
        assert_eq!(h.router.route(b"msg1"), not_found);
        assert_eq!(h.router.pre_verify(b"", b"msg1"), not_found.clone().map(|_| false));
        assert_eq!(h.router.verify(b"", b"msg1"), not_found.map(|_| false));
    }
}
