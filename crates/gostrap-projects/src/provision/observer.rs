//! Provisioning progress observation
//!
//! The `ProvisionObserver` trait receives an event at every step boundary
//! and once the run ends. `TracingObserver` logs those events with
//! `tracing`; front ends implement the trait to render progress.

use crate::error::{Error, Rollback};
use crate::types::{ProjectPath, Step};

/// Observer for provisioning events
///
/// `subject` names what a step acts on: the project path, the module path,
/// the framework whose dependencies are fetched, or the starter file name.
///
/// # Example
///
/// ```rust
/// use gostrap_projects::{ProvisionObserver, Step};
///
/// struct Checklist;
///
/// impl ProvisionObserver for Checklist {
///     fn on_step_completed(&self, step: Step, _subject: &str) {
///         println!("[x] {}", step.completed_message());
///     }
/// }
/// ```
pub trait ProvisionObserver: Send + Sync {
    /// Called before a step starts
    fn on_step_started(&self, step: Step, subject: &str) {
        let _ = (step, subject);
    }

    /// Called after a step succeeded
    fn on_step_completed(&self, step: Step, subject: &str);

    /// Called when a step fails, before any rollback
    fn on_step_failed(&self, step: Option<Step>, error: &Error) {
        let _ = (step, error);
    }

    /// Called after a failed run has been undone, or failed to be
    fn on_rollback(&self, path: &ProjectPath, outcome: &Rollback) {
        let _ = (path, outcome);
    }

    /// Called once the project is complete
    fn on_committed(&self, path: &ProjectPath) {
        let _ = path;
    }
}

/// An observer that logs provisioning events using the `tracing` crate
///
/// # Log Levels
///
/// - `on_step_started`: DEBUG
/// - `on_step_completed`: INFO
/// - `on_step_failed`: ERROR
/// - `on_rollback`: WARN
/// - `on_committed`: INFO
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProvisionObserver for TracingObserver {
    fn on_step_started(&self, step: Step, subject: &str) {
        tracing::debug!(step = %step, subject = subject, "starting step");
    }

    fn on_step_completed(&self, step: Step, subject: &str) {
        tracing::info!(step = %step, subject = subject, "{}", step.completed_message());
    }

    fn on_step_failed(&self, step: Option<Step>, error: &Error) {
        match step {
            Some(step) => tracing::error!(step = %step, error = %error, "step failed"),
            None => tracing::error!(error = %error, "provisioning failed"),
        }
    }

    fn on_rollback(&self, path: &ProjectPath, outcome: &Rollback) {
        match outcome {
            Rollback::NotNeeded => {}
            Rollback::Completed => {
                tracing::warn!(path = %path, "removed partially created project")
            }
            Rollback::Failed(err) => tracing::warn!(
                path = %path,
                error = %err,
                "could not remove partially created project"
            ),
        }
    }

    fn on_committed(&self, path: &ProjectPath) {
        tracing::info!(path = %path, "project created");
    }
}
