//! # eventdex - Event Index Builder
//!
//! The main binary for building `index.json` from a directory of event
//! folders.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │           apps/eventdex (THE BINARY)          │
//! │                                               │
//! │   ┌─────────────┐      ┌──────────────────┐   │
//! │   │    CLI      │      │  tracing logs    │   │
//! │   │   (clap)    │      │    (stderr)      │   │
//! │   └──────┬──────┘      └──────────────────┘   │
//! │          ▼                                    │
//! │   ┌───────────────┐                           │
//! │   │ eventdex-core │                           │
//! │   │  (THE LOGIC)  │                           │
//! │   └───────────────┘                           │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Index the data/ folder next to the executable
//! eventdex
//!
//! # Explicit paths
//! eventdex --data-dir ./site/data --output ./site/data/index.json
//!
//! # Verify the committed index is current
//! eventdex check -q
//! ```

use clap::Parser;
use eventdex::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // EVENTDEX_LOG_FORMAT=json enables machine-parseable logs.
    let log_format = std::env::var("EVENTDEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eventdex=info,eventdex_core=info".into());

    // Logs go to stderr; stdout carries progress and summary.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        // Printed unconditionally; RUST_LOG can filter out the log line.
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!("eventdex v{} - event index builder", env!("CARGO_PKG_VERSION"));
    println!();
}
