use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use student_payments::application::Status;
use student_payments::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.run()? {
        Status::Success => Ok(ExitCode::SUCCESS),
        Status::Error => Ok(ExitCode::FAILURE),
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
