//! In-memory progress of a single provisioning run

use super::guard::RollbackGuard;
use crate::error::Rollback;
use crate::types::Step;
use std::collections::BTreeSet;

/// Steps completed so far and the guard over what they created
///
/// Owned by one run and dropped when it ends; never persisted. The run is
/// eligible for rollback from the moment the project directory is handed
/// over until [`ProvisioningState::commit`] or
/// [`ProvisioningState::rollback`] consumes the guard.
#[derive(Debug, Default)]
pub struct ProvisioningState {
    completed: BTreeSet<Step>,
    guard: Option<RollbackGuard>,
}

impl ProvisioningState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the project directory exists, guarded by `guard`
    pub fn directory_created(&mut self, guard: RollbackGuard) {
        self.guard = Some(guard);
        self.mark_completed(Step::CreateDirectory);
    }

    /// Record that `step` finished successfully
    pub fn mark_completed(&mut self, step: Step) {
        self.completed.insert(step);
    }

    pub fn is_completed(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }

    /// Completed steps in pipeline order
    pub fn completed(&self) -> Vec<Step> {
        self.completed.iter().copied().collect()
    }

    /// Whether a failure now has something to undo
    pub fn rollback_eligible(&self) -> bool {
        self.guard.is_some()
    }

    /// Keep everything the run created
    pub fn commit(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.disarm();
        }
    }

    /// Undo the run, if anything was created
    pub fn rollback(&mut self) -> Rollback {
        match self.guard.take() {
            None => Rollback::NotNeeded,
            Some(guard) => match guard.rollback() {
                Ok(()) => Rollback::Completed,
                Err(err) => Rollback::Failed(err),
            },
        }
    }
}
