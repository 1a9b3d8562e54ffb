//! # gostrap-projects
//!
//! Project provisioning library for the gostrap CLI providing:
//! - Project name resolution under a base directory
//! - Template and dependency registries
//! - A blocking external command runner
//! - The transactional provisioner that creates a Go project or removes
//!   everything it created
//!
//! # Examples
//!
//! ```no_run
//! use gostrap_core::GostrapConfig;
//! use gostrap_projects::{
//!     DependencyRegistry, ProjectKind, ProjectRequest, Provisioner, Registry, TemplateRegistry,
//!     Toolchain,
//! };
//! use camino::Utf8PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GostrapConfig::default();
//! let registry = Registry::new(
//!     TemplateRegistry::embedded()?,
//!     DependencyRegistry::from_config(&config),
//! );
//! let provisioner = Provisioner::new(
//!     Utf8PathBuf::from("/home/me/projects"),
//!     registry,
//!     Toolchain::from_config(&config),
//! );
//!
//! let request = ProjectRequest::new("demo", ProjectKind::Cli).with_vcs(true);
//! let path = provisioner.create_project(&request)?;
//! println!("created {}", path);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod path;
pub mod provision;
pub mod registry;
pub mod runner;
pub mod types;

pub use error::{Error, ProvisionError, Result, Rollback, RollbackError};
pub use provision::{
    AssumeNo, AssumeYes, OverwritePrompt, ProvisionObserver, Provisioner, ProvisioningState,
    RollbackGuard, Toolchain, TracingObserver,
};
pub use registry::{DependencyRegistry, Registry, TemplateRegistry};
pub use runner::{CommandError, CommandRunner, ProcessRunner};
pub use types::{ProjectKind, ProjectPath, ProjectRequest, Step};
