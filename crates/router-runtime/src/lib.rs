//! # Router Runtime
//!
//! Governance tooling around the optimistic router: loads a scenario
//! (genesis + steps), replays it against an in-memory router with a manual
//! clock, and reports every step whose outcome differs from its expectation.
//!
//! ## Modules
//!
//! - `config/` - Environment and CLI configuration
//! - `genesis/` - Initial owner, threshold, window, watchers and routes
//! - `scenario/` - Step model and replay

pub mod config;
pub mod genesis;
pub mod scenario;

use anyhow::{Context, Result};
use optimistic_router::TracingEventPublisher;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub use config::RuntimeConfig;
pub use genesis::{GenesisConfig, GenesisError, RouteSpec, SubmoduleSpec};
pub use scenario::{
    replay, Scenario, ScenarioError, ScenarioReport, ScenarioRunner, ScenarioStep, Step,
    StepOutcome,
};

/// Install the global tracing subscriber.
pub fn init_tracing(config: &RuntimeConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true);
    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

/// Load the configured scenario and replay it, logging every event.
pub fn run(config: &RuntimeConfig) -> Result<ScenarioReport> {
    let path = config
        .scenario
        .as_deref()
        .context("No scenario given (use --scenario or ROUTER_SCENARIO)")?;
    let scenario = Scenario::from_path(path)
        .with_context(|| format!("Failed to load scenario {}", path.display()))?;
    let report = replay(&scenario, config.start_time, Arc::new(TracingEventPublisher))
        .context("Failed to set up scenario")?;
    Ok(report)
}
