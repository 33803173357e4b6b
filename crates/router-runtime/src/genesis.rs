//! # Router Genesis
//!
//! Initial router configuration, applied through the public API in a fixed
//! order: initialize → deadline → watchers → deployments → routes.

use optimistic_router::{
    Address, InMemorySubmoduleDirectory, MessageKey, OptimisticRouterApi, RouterError,
    StaticVerdict, StaticVerdictSubmodule, SubmoduleId, Timestamp,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Genesis application errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// A route points at a submodule that is neither deployed nor null.
    #[error("Route {key:?} references undeployed submodule {submodule}")]
    UndeployedSubmodule { key: String, submodule: SubmoduleId },

    /// The router refused a genesis call.
    #[error("Router rejected genesis step '{step}': {source}")]
    Router {
        step: &'static str,
        #[source]
        source: RouterError,
    },
}

fn router_step(step: &'static str) -> impl FnOnce(RouterError) -> GenesisError {
    move |source| GenesisError::Router { step, source }
}

/// A submodule deployed at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmoduleSpec {
    pub id: SubmoduleId,
    pub verdict: StaticVerdict,
}

/// A key → submodule registration made at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteSpec {
    pub key: String,
    pub submodule: SubmoduleId,
}

/// Genesis configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenesisConfig {
    pub owner: Address,
    #[serde(default)]
    pub flag_threshold: u64,
    /// Left at zero (closed) when absent.
    #[serde(default)]
    pub window_deadline: Option<Timestamp>,
    #[serde(default)]
    pub watchers: Vec<Address>,
    #[serde(default)]
    pub submodules: Vec<SubmoduleSpec>,
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl GenesisConfig {
    /// Check that every non-null route targets a deployed submodule.
    pub fn validate(&self) -> Result<(), GenesisError> {
        for route in &self.routes {
            let deployed = self.submodules.iter().any(|s| s.id == route.submodule);
            if !route.submodule.is_zero() && !deployed {
                return Err(GenesisError::UndeployedSubmodule {
                    key: route.key.clone(),
                    submodule: route.submodule,
                });
            }
        }
        Ok(())
    }

    /// Deploy submodules into `directory` and configure `router`.
    pub fn apply<R: OptimisticRouterApi>(
        &self,
        router: &R,
        directory: &InMemorySubmoduleDirectory,
    ) -> Result<(), GenesisError> {
        self.validate()?;
        let owner = &self.owner;

        router
            .initialize(self.owner, self.flag_threshold)
            .map_err(router_step("initialize"))?;
        if let Some(deadline) = self.window_deadline {
            router
                .set_window_deadline(owner, deadline)
                .map_err(router_step("set_window_deadline"))?;
        }
        for watcher in &self.watchers {
            router
                .add_watcher(owner, *watcher)
                .map_err(router_step("add_watcher"))?;
        }
        for spec in &self.submodules {
            directory.deploy(
                spec.id,
                Arc::new(StaticVerdictSubmodule::new(spec.verdict.clone())),
            );
        }
        for route in &self.routes {
            router
                .set_submodule(owner, MessageKey::from(route.key.as_str()), route.submodule)
                .map_err(router_step("set_submodule"))?;
        }

        info!(
            "Genesis applied: {} watchers, {} submodules, {} routes",
            self.watchers.len(),
            self.submodules.len(),
            self.routes.len()
        );
        Ok(())
    }
}
