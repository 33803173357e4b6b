//! # Router Runtime
//!
//! Replays a router scenario file and exits non-zero when any step's
//! expectation is not met.
//!
//! ```bash
//! router-runtime --scenario scenarios/dispute_window.json
//! ROUTER_LOG_LEVEL=debug router-runtime -s scenarios/dispute_window.json
//! ```

use anyhow::{bail, Result};
use clap::Parser;
use router_runtime::{init_tracing, run, RuntimeConfig};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "router-runtime")]
#[command(about = "Replay optimistic router scenarios")]
struct Args {
    /// Scenario file (JSON)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Log filter, e.g. "info" or "optimistic_router=debug"
    #[arg(short, long)]
    log_level: Option<String>,

    /// Clock start in Unix seconds (overrides the scenario)
    #[arg(long)]
    start_time: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = RuntimeConfig::from_env().with_overrides(
        args.scenario,
        args.log_level,
        args.start_time,
    );
    init_tracing(&config)?;

    info!("===========================================");
    info!("  Optimistic Router Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let report = run(&config)?;
    for outcome in &report.outcomes {
        println!(
            "[{:>3}] {:<20} {:<24} {}",
            outcome.index,
            outcome.op,
            outcome.label,
            outcome.value.as_deref().unwrap_or("-")
        );
    }

    let failed = report.failures().count();
    if failed > 0 {
        for failure in report.failures() {
            error!(
                "step {} ({}) expected {:?}, got {} {:?}",
                failure.index, failure.op, failure.expected, failure.label, failure.value
            );
        }
        bail!("{} of {} steps missed their expectation", failed, report.outcomes.len());
    }

    info!("All {} steps matched", report.outcomes.len());
    Ok(())
}
