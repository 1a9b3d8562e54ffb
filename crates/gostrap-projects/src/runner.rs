//! External command execution
//!
//! Provisioning steps shell out to the Go toolchain and git. The runner
//! streams the child's stdout/stderr straight to the console and reports
//! only whether the command succeeded; output is never captured or parsed.

use camino::Utf8Path;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

/// Failure to run an external command
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started (missing binary, bad working dir)
    #[error("Failed to start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and reported failure
    #[error("'{command}' {}", describe_exit(.code))]
    Failed { command: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Runs a program to completion in a working directory
///
/// Implementations block until the program exits.
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` inside `working_dir`
    fn run(&self, working_dir: &Utf8Path, program: &str, args: &[String])
        -> Result<(), CommandError>;
}

/// [`CommandRunner`] that spawns real processes with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        working_dir: &Utf8Path,
        program: &str,
        args: &[String],
    ) -> Result<(), CommandError> {
        let command_line = render_command(program, args);
        debug!("Running: {} (in {})", command_line, working_dir);

        let status = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if status.success() {
            debug!("Command succeeded: {}", command_line);
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: command_line,
                code: status.code(),
            })
        }
    }
}

/// Join a program and its arguments for display
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
