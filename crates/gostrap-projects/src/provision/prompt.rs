//! Confirmation asked before provisioning into an existing directory

use camino::Utf8Path;

/// Decides whether a run may continue when the target already exists
pub trait OverwritePrompt: Send + Sync {
    /// Return `true` to continue inside the existing `path`
    fn confirm_overwrite(&self, path: &Utf8Path) -> bool;
}

/// Always continue
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl OverwritePrompt for AssumeYes {
    fn confirm_overwrite(&self, _path: &Utf8Path) -> bool {
        true
    }
}

/// Never continue; the default for non-interactive use
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeNo;

impl OverwritePrompt for AssumeNo {
    fn confirm_overwrite(&self, _path: &Utf8Path) -> bool {
        false
    }
}
