//! # Runtime Configuration
//!
//! Environment first, CLI flags on top.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `ROUTER_LOG_LEVEL` / `RUST_LOG` | tracing filter | `info` |
//! | `ROUTER_SCENARIO` | scenario file | none |
//! | `ROUTER_START_TIME` | clock start (Unix seconds) | scenario value, else 0 |
//! | `ROUTER_JSON_LOGS` | JSON log lines | `false` |

use std::env;
use std::path::PathBuf;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Log filter directive.
    pub log_level: String,
    /// Scenario file to replay.
    pub scenario: Option<PathBuf>,
    /// Overrides the scenario's start time.
    pub start_time: Option<u64>,
    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            scenario: None,
            start_time: None,
            json_logs: false,
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("ROUTER_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            scenario: lookup("ROUTER_SCENARIO").map(PathBuf::from),
            start_time: lookup("ROUTER_START_TIME").and_then(|v| v.parse().ok()),
            json_logs: lookup("ROUTER_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Apply CLI overrides. `None` keeps the current value.
    pub fn with_overrides(
        mut self,
        scenario: Option<PathBuf>,
        log_level: Option<String>,
        start_time: Option<u64>,
    ) -> Self {
        if let Some(path) = scenario {
            self.scenario = Some(path);
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if start_time.is_some() {
            self.start_time = start_time;
        }
        self
    }
}
