//! AMG Census Binary
//!
//! Enumerates every connected AMG of one chromosome/DSB layout and prints a
//! census as JSON on stdout. Logs go to stderr.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `AMG_CHROMOSOMES`: Number of chromosomes (default: 2)
//! - `AMG_DSBS`: Comma-separated DSB count per chromosome (default: 1 each)
//! - `AMG_MODE`: "summary", "report" (JSON lines) or "atlas" (default: summary)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! AMG_CHROMOSOMES=2 AMG_DSBS=2,2 AMG_MODE=summary cargo run --bin amg_census
//! ```

use std::io::Write;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use aberration_multigraph::{write_report, CensusConfig, CensusMode, CensusSummary, TransformationAtlas};

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "amg_census=info,aberration_multigraph=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .flatten_event(true),
            )
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = CensusConfig::from_env()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        num_chromosomes = config.num_chromosomes,
        num_dsbs = ?config.num_dsbs,
        mode = %config.mode,
        "Starting AMG census"
    );

    let generator = config.generator()?;
    let start = Instant::now();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match config.mode {
        CensusMode::Summary => {
            let summary = CensusSummary::from_amgs(generator.generate_amgs());
            serde_json::to_writer_pretty(&mut out, &summary)?;
            writeln!(out)?;
            info!(total = summary.total, "summary complete");
        }
        CensusMode::Report => {
            let rows = write_report(&mut out, generator.generate_amgs())?;
            info!(rows, "report complete");
        }
        CensusMode::Atlas => {
            let atlas = TransformationAtlas::build(&generator)?;
            serde_json::to_writer_pretty(&mut out, &atlas)?;
            writeln!(out)?;
            info!(
                nodes = atlas.nodes.len(),
                edges = atlas.edges.len(),
                classes = atlas.num_classes(),
                "atlas complete"
            );
        }
    }

    info!(latency_ms = start.elapsed().as_millis() as u64, "AMG census complete");
    Ok(())
}
