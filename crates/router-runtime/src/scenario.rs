//! # Scenario Replay
//!
//! A scenario is a genesis block plus an ordered list of steps executed
//! through [`OptimisticRouterApi`] against a manually driven clock. Steps may
//! carry an expectation; the report lists every step whose outcome differs.
//!
//! ```json
//! {
//!   "start_time": 1000,
//!   "genesis": { "owner": "0xaa..", "flag_threshold": 2, "window_deadline": 2000 },
//!   "steps": [
//!     { "op": "flag", "caller": "0xa1..", "submodule": "0x51..", "expect": "1" },
//!     { "op": "set_time", "time": 2000 },
//!     { "op": "verify", "key": "msg1", "expect": "ok" }
//!   ]
//! }
//! ```
//!
//! An expectation matches either the outcome label (`ok` or an error reason
//! such as `window_not_elapsed`) or the rendered return value.

use crate::genesis::{GenesisConfig, GenesisError};
use optimistic_router::{
    Address, InMemorySubmoduleDirectory, ManualTimeSource, MessageKey, OptimisticRouterApi,
    OptimisticRouterService, RouterEventPublisher, RouterResult, SubmoduleId, Timestamp,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Scenario loading and setup errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Scenario file could not be read.
    #[error("Failed to read scenario {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scenario JSON is malformed.
    #[error("Invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// Genesis could not be applied.
    #[error(transparent)]
    Genesis(#[from] GenesisError),
}

/// One router operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    SetTime {
        time: Timestamp,
    },
    AdvanceTime {
        secs: u64,
    },
    SetFlagThreshold {
        caller: Address,
        value: u64,
    },
    SetSubmodule {
        caller: Address,
        key: String,
        submodule: SubmoduleId,
    },
    AddWatcher {
        caller: Address,
        watcher: Address,
    },
    SetWindowDeadline {
        caller: Address,
        deadline: Timestamp,
    },
    Flag {
        caller: Address,
        submodule: SubmoduleId,
    },
    Route {
        key: String,
    },
    PreVerify {
        #[serde(default)]
        metadata: String,
        key: String,
    },
    Verify {
        #[serde(default)]
        metadata: String,
        key: String,
    },
}

impl Step {
    /// Operation name as written in scenario files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetTime { .. } => "set_time",
            Self::AdvanceTime { .. } => "advance_time",
            Self::SetFlagThreshold { .. } => "set_flag_threshold",
            Self::SetSubmodule { .. } => "set_submodule",
            Self::AddWatcher { .. } => "add_watcher",
            Self::SetWindowDeadline { .. } => "set_window_deadline",
            Self::Flag { .. } => "flag",
            Self::Route { .. } => "route",
            Self::PreVerify { .. } => "pre_verify",
            Self::Verify { .. } => "verify",
        }
    }
}

/// A step with an optional expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioStep {
    #[serde(flatten)]
    pub step: Step,
    #[serde(default)]
    pub expect: Option<String>,
}

/// Scenario file contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub start_time: Timestamp,
    pub genesis: GenesisConfig,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScenarioError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// What one step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub index: usize,
    pub op: &'static str,
    /// `ok` or the error reason.
    pub label: String,
    /// Rendered return value, if any.
    pub value: Option<String>,
    pub expected: Option<String>,
}

impl StepOutcome {
    /// Steps without an expectation always pass.
    pub fn passed(&self) -> bool {
        match &self.expected {
            None => true,
            Some(expected) => {
                *expected == self.label || self.value.as_deref() == Some(expected.as_str())
            }
        }
    }
}

/// Result of a full replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioReport {
    pub outcomes: Vec<StepOutcome>,
}

impl ScenarioReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Router wired for replay: in-memory submodules and a manual clock.
pub struct ScenarioRunner<P: RouterEventPublisher> {
    router: OptimisticRouterService<InMemorySubmoduleDirectory, ManualTimeSource, P>,
    clock: Arc<ManualTimeSource>,
}

impl<P: RouterEventPublisher> ScenarioRunner<P> {
    /// Build the router and apply genesis at `start_time`.
    pub fn new(
        genesis: &GenesisConfig,
        start_time: Timestamp,
        publisher: Arc<P>,
    ) -> Result<Self, ScenarioError> {
        let clock = Arc::new(ManualTimeSource::new(start_time));
        let directory = Arc::new(InMemorySubmoduleDirectory::new());
        let router =
            OptimisticRouterService::new(Arc::clone(&directory), Arc::clone(&clock), publisher);
        genesis.apply(&router, &directory)?;
        Ok(Self { router, clock })
    }

    pub fn router(&self) -> &impl OptimisticRouterApi {
        &self.router
    }

    /// Execute one step.
    pub fn execute(&self, step: &Step) -> RouterResult<Option<String>> {
        let router = &self.router;
        match step {
            Step::SetTime { time } => {
                self.clock.set(*time);
                Ok(None)
            }
            Step::AdvanceTime { secs } => {
                self.clock.advance(*secs);
                Ok(None)
            }
            Step::SetFlagThreshold { caller, value } => {
                router.set_flag_threshold(caller, *value).map(|_| None)
            }
            Step::SetSubmodule {
                caller,
                key,
                submodule,
            } => router
                .set_submodule(caller, MessageKey::from(key.as_str()), *submodule)
                .map(|_| None),
            Step::AddWatcher { caller, watcher } => {
                router.add_watcher(caller, *watcher).map(|_| None)
            }
            Step::SetWindowDeadline { caller, deadline } => {
                router.set_window_deadline(caller, *deadline).map(|_| None)
            }
            Step::Flag { caller, submodule } => router
                .flag(caller, *submodule)
                .map(|count| Some(count.to_string())),
            Step::Route { key } => router
                .route(key.as_bytes())
                .map(|handle| Some(handle.to_string())),
            Step::PreVerify { metadata, key } => router
                .pre_verify(metadata.as_bytes(), key.as_bytes())
                .map(|verdict| Some(verdict.to_string())),
            Step::Verify { metadata, key } => router
                .verify(metadata.as_bytes(), key.as_bytes())
                .map(|accepted| Some(accepted.to_string())),
        }
    }

    /// Execute every step in order. Router errors are outcomes, not failures
    /// of the replay itself.
    pub fn run(&self, steps: &[ScenarioStep]) -> ScenarioReport {
        let mut report = ScenarioReport::default();
        for (index, scenario_step) in steps.iter().enumerate() {
            let result = self.execute(&scenario_step.step);
            let (label, value) = match result {
                Ok(value) => ("ok".to_string(), value),
                Err(err) => (err.reason().to_string(), None),
            };
            let outcome = StepOutcome {
                index,
                op: scenario_step.step.name(),
                label,
                value,
                expected: scenario_step.expect.clone(),
            };
            if outcome.passed() {
                debug!(
                    "step {} {}: {} {:?}",
                    index, outcome.op, outcome.label, outcome.value
                );
            } else {
                warn!(
                    "step {} {}: got {} {:?}, expected {:?}",
                    index, outcome.op, outcome.label, outcome.value, outcome.expected
                );
            }
            report.outcomes.push(outcome);
        }
        info!(
            "Scenario finished: {} steps, {} failed expectations",
            report.outcomes.len(),
            report.failures().count()
        );
        report
    }
}

/// Replay an already parsed scenario. `start_time_override` wins over the
/// scenario's own start time.
pub fn replay<P: RouterEventPublisher>(
    scenario: &Scenario,
    start_time_override: Option<Timestamp>,
    publisher: Arc<P>,
) -> Result<ScenarioReport, ScenarioError> {
    let start_time = start_time_override.unwrap_or(scenario.start_time);
    let runner = ScenarioRunner::new(&scenario.genesis, start_time, publisher)?;
    Ok(runner.run(&scenario.steps))
}
