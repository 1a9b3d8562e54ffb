//! New project command

use super::Workspace;
use crate::cli::NewArgs;
use crate::output;
use anyhow::Result;
use camino::Utf8Path;
use dialoguer::Confirm;
use gostrap_projects::{
    AssumeYes, OverwritePrompt, ProjectPath, ProjectRequest, ProvisionObserver, Provisioner,
    Rollback, Step, Toolchain,
};
use std::io::IsTerminal;

pub fn run(args: NewArgs, quiet: bool) -> Result<()> {
    let workspace = Workspace::load()?;
    let request = build_request(&args);

    let provisioner = Provisioner::new(
        workspace.projects_dir,
        workspace.registry,
        Toolchain::from_config(&workspace.config),
    )
    .with_observer(ConsoleObserver { quiet });
    let provisioner = if args.yes {
        provisioner.with_prompt(AssumeYes)
    } else {
        provisioner.with_prompt(DialoguerPrompt)
    };

    let path = provisioner.create_project(&request)?;
    if quiet {
        return Ok(());
    }

    output::success(&format!(
        "Done. Created project '{}' of kind '{}' in '{}'",
        request.name(),
        request.kind(),
        path
    ));
    Ok(())
}

fn build_request(args: &NewArgs) -> ProjectRequest {
    let mut request = ProjectRequest::new(&args.name, args.kind).with_vcs(args.git);
    if let Some(module) = &args.module {
        request = request.with_module_path(module);
    }
    if let Some(framework) = &args.cli_lib {
        request = request.with_framework(framework);
    }
    request
}

/// Asks on the terminal; answers "no" when stdin is not interactive
struct DialoguerPrompt;

impl OverwritePrompt for DialoguerPrompt {
    fn confirm_overwrite(&self, path: &Utf8Path) -> bool {
        if !std::io::stdin().is_terminal() {
            output::warning(&format!(
                "Directory {} already exists; pass --yes to continue in it",
                path
            ));
            return false;
        }

        Confirm::new()
            .with_prompt(format!(
                "Directory {} already exists. Do you want to continue?",
                path
            ))
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Prints one line per completed step
///
/// When `quiet`, only rollback warnings and errors reach the terminal.
struct ConsoleObserver {
    quiet: bool,
}

impl ProvisionObserver for ConsoleObserver {
    fn on_step_started(&self, step: Step, subject: &str) {
        if !self.quiet && step == Step::FetchDependencies {
            output::info(&format!("Adding dependencies for {}", subject));
        }
    }

    fn on_step_completed(&self, step: Step, subject: &str) {
        if self.quiet {
            return;
        }
        match step {
            Step::WriteTemplate => output::success(&format!("Wrote {} file", subject)),
            _ => output::success(step.completed_message()),
        }
    }

    fn on_rollback(&self, path: &ProjectPath, outcome: &Rollback) {
        match outcome {
            Rollback::NotNeeded => {}
            Rollback::Completed => {
                output::warning(&format!("Removed partially created project {}", path))
            }
            Rollback::Failed(err) => output::error(&format!(
                "Could not remove partially created project: {}: {}",
                err, err.source
            )),
        }
    }
}
