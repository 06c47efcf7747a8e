//! dv - Plutus datum viewer for Cardano.

use anyhow::{Context, anyhow};
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DV_LOG";

/// Log to stderr; `DV_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {} filter '{}'", LOG_ENV, directives))?,
        Err(_) => EnvFilter::new(match verbose {
            0 => "warn",
            1 => "warn,datum_view=debug",
            _ => "warn,datum_view=trace",
        }),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("failed to install log subscriber")
}

fn main() -> ExitCode {
    let args = datum_view::Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("{}: {:#}", "warning".yellow(), e);
    }

    match datum_view::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
