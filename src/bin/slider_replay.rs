//! Slider Replay Binary
//!
//! Replays a scripted gesture session against the slider engine and prints
//! the resulting report as JSON on stdout. Logs go to stderr.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default: `slider_replay=info,range_slider_kernel=info`)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! LOG_FORMAT=pretty cargo run --bin slider_replay --features replay -- session.json
//! ```

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use range_slider_kernel::replay::{run_script, ReplayError, ReplayScript};

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slider_replay=info,range_slider_kernel=info".into());

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

fn run(path: &str) -> Result<String, ReplayError> {
    let script = ReplayScript::load(path)?;
    info!(path = %path, steps = script.steps.len(), "loaded replay script");
    let report = run_script(&script)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() -> ExitCode {
    init_tracing();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: slider_replay <script.json>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, path = %path, "replay failed");
            ExitCode::FAILURE
        }
    }
}
