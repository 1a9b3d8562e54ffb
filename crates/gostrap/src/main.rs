//! gostrap CLI - Go project scaffolding
//!
//! This is the main entry point for the gostrap command-line interface.

mod cli;
mod commands;
mod output;

use clap::Parser;
use gostrap_projects::ProvisionError;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

/// Exit status for any failure
const EXIT_FAILURE: u8 = 1;

/// Exit status when the user declined to reuse an existing directory
const EXIT_ABORTED: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::New(args) => commands::new::run(args, cli.quiet),
        Commands::List => commands::list::run(),
        Commands::Version => commands::version::run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code(&err);
            if code == EXIT_ABORTED {
                output::warning(&err.to_string());
            } else {
                output::error(&format!("{:#}", err));
            }
            ExitCode::from(code)
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ProvisionError>() {
        Some(err) if err.is_aborted() => EXIT_ABORTED,
        _ => EXIT_FAILURE,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Step progress is printed by the console observer, keep logs quiet
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
