//! # Reentrant Submodules
//!
//! A submodule is arbitrary code invoked in the middle of `verify`. These
//! tests give it a handle back to the router and let it try to change the
//! outcome of the call that invoked it.
//!
//! ## Attack Vectors:
//!
//! 1. **Self-flagging**: a watcher-controlled submodule flags itself during
//!    `verify` to flip the fraud gate mid-call
//! 2. **Rescue**: a submodule raises the threshold mid-call to escape a
//!    fraud verdict
//! 3. **Nested verify**: recursion into `verify` must not deadlock

#[cfg(test)]
mod tests {
    use crate::harness::*;
    use optimistic_router::{
        Address, MessageVerifier, OptimisticRouterApi, RouterError, SubmoduleError, SubmoduleId,
    };
    use parking_lot::Mutex;
    use std::sync::{Arc, Weak};

    /// What the malicious submodule does with its router handle.
    #[derive(Clone, Copy)]
    enum Payload {
        FlagSelf { as_watcher: Address, times: u32 },
        RaiseThreshold { as_owner: Address, to: u64 },
        VerifyInner,
    }

    struct MaliciousSubmodule {
        id: SubmoduleId,
        payload: Payload,
        router: Mutex<Weak<TestRouter>>,
    }

    impl MaliciousSubmodule {
        fn new(id: SubmoduleId, payload: Payload) -> Arc<Self> {
            Arc::new(Self {
                id,
                payload,
                router: Mutex::new(Weak::new()),
            })
        }

        fn attach(&self, router: &Arc<TestRouter>) {
            *self.router.lock() = Arc::downgrade(router);
        }
    }

    impl MessageVerifier for MaliciousSubmodule {
        fn verify(&self, _metadata: &[u8], message: &[u8]) -> Result<bool, SubmoduleError> {
            let router = self
                .router
                .lock()
                .upgrade()
                .ok_or_else(|| SubmoduleError::Internal("detached".to_string()))?;
            match self.payload {
                Payload::FlagSelf { as_watcher, times } => {
                    for _ in 0..times {
                        let _ = router.flag(&as_watcher, self.id);
                    }
                }
                Payload::RaiseThreshold { as_owner, to } => {
                    let _ = router.set_flag_threshold(&as_owner, to);
                }
                Payload::VerifyInner => {
                    if message != b"inner" {
                        let _ = router.verify(b"", b"inner");
                    }
                }
            }
            Ok(true)
        }
    }

    fn arm(h: &RouterHarness, key: &str, payload: Payload) -> Arc<MaliciousSubmodule> {
        let submodule = MaliciousSubmodule::new(SUBMODULE_X, payload);
        submodule.attach(&h.router);
        h.deploy(key, SUBMODULE_X, submodule.clone());
        submodule
    }

    // =============================================================================
    // ATTACK 1: SELF-FLAGGING DURING VERIFY
    // =============================================================================

    /// Flags raised during the call land in the ledger but the in-flight
    /// decision uses the count read before the submodule ran.
    #[test]
    fn test_self_flagging_does_not_change_inflight_verdict() {
        let h = RouterHarness::new().with_watchers(&[WATCHER_A]);
        arm(
            &h,
            "msg1",
            Payload::FlagSelf {
                as_watcher: WATCHER_A,
                times: 5,
            },
        );

        let result = h.router.verify(b"", b"msg1");
        assert!(matches!(result, Err(RouterError::WindowNotElapsed { .. })));
        assert_eq!(h.router.get_fraud_count(&SUBMODULE_X), 5);

        // The next call sees the new count.
        assert!(matches!(
            h.router.verify(b"", b"msg1"),
            Err(RouterError::FlaggedFraudulent { fraud_count: 5, .. })
        ));
    }

    /// After the window closes the submodule can no longer add flags, and a
    /// clean record stays clean.
    #[test]
    fn test_self_flagging_after_close_is_refused() {
        let h = RouterHarness::new().with_watchers(&[WATCHER_A]);
        arm(
            &h,
            "msg1",
            Payload::FlagSelf {
                as_watcher: WATCHER_A,
                times: 10,
            },
        );
        h.close_window();

        assert_eq!(h.router.verify(b"", b"msg1"), Ok(true));
        assert_eq!(h.router.get_fraud_count(&SUBMODULE_X), 0);
    }

    // =============================================================================
    // ATTACK 2: THRESHOLD RESCUE
    // =============================================================================

    /// A submodule without the owner key cannot raise the threshold.
    #[test]
    fn test_threshold_rescue_without_owner_key() {
        let h = RouterHarness::new().with_watchers(&[WATCHER_A]);
        arm(
            &h,
            "msg1",
            Payload::RaiseThreshold {
                as_owner: ATTACKER,
                to: u64::MAX,
            },
        );
        for _ in 0..3 {
            h.router.flag(&WATCHER_A, SUBMODULE_X).unwrap();
        }
        h.close_window();

        assert!(matches!(
            h.router.verify(b"", b"msg1"),
            Err(RouterError::FlaggedFraudulent { .. })
        ));
        assert_eq!(h.router.flag_threshold(), THRESHOLD);
    }

    /// Even a submodule acting with the owner key cannot rescue the call it
    /// is running inside: the threshold was read before it ran.
    #[test]
    fn test_threshold_rescue_with_owner_key_misses_inflight_call() {
        let h = RouterHarness::new().with_watchers(&[WATCHER_A]);
        arm(
            &h,
            "msg1",
            Payload::RaiseThreshold {
                as_owner: OWNER,
                to: 100,
            },
        );
        for _ in 0..3 {
            h.router.flag(&WATCHER_A, SUBMODULE_X).unwrap();
        }
        h.close_window();

        assert!(matches!(
            h.router.verify(b"", b"msg1"),
            Err(RouterError::FlaggedFraudulent { threshold: 2, .. })
        ));
        assert_eq!(h.router.flag_threshold(), 100);
    }

    // =============================================================================
    // ATTACK 3: NESTED VERIFY
    // =============================================================================

    #[test]
    fn test_nested_verify_completes() {
        let h = RouterHarness::new();
        arm(&h, "outer", Payload::VerifyInner);
        h.router
            .set_submodule(&OWNER, "inner".into(), SUBMODULE_X)
            .unwrap();
        h.close_window();

        assert_eq!(h.router.verify(b"", b"outer"), Ok(true));
        let accepted = h
            .event_names()
            .into_iter()
            .filter(|name| *name == "message_accepted")
            .count();
        assert_eq!(accepted, 2);
    }
}
