//! Transactional project provisioning
//!
//! [`Provisioner::create_project`] validates a request completely before
//! touching the filesystem, then runs the pipeline steps in order. Once the
//! project directory exists a [`RollbackGuard`] owns it: the guard is
//! disarmed on success and removes what the run created on any other exit,
//! including a panic unwinding through the provisioner.

mod guard;
mod observer;
mod prompt;
mod provisioner;
mod state;

pub use guard::RollbackGuard;
pub use observer::{ProvisionObserver, TracingObserver};
pub use prompt::{AssumeNo, AssumeYes, OverwritePrompt};
pub use provisioner::{Provisioner, Toolchain};
pub use state::ProvisioningState;
