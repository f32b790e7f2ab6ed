mod cli;
mod commands;
mod snapshot;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout carries only command output.
    // Override with RUST_LOG, e.g. RUST_LOG=ledgerstore_hostapi=trace
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ledgerstore=debug")),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, state = %cli.state.display(), "starting");
    Ok(if commands::run(&cli)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
