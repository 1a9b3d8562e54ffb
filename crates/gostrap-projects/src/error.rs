//! Error types for gostrap-projects

use crate::runner::CommandError;
use crate::types::Step;
use std::fmt;
use thiserror::Error;

/// Result type alias using gostrap-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project provisioning error types
#[derive(Error, Debug)]
pub enum Error {
    /// Project name is empty, contains separators, or escapes the base directory
    #[error("Invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// No starter template is registered for the kind
    #[error("Unknown project kind: {kind}. Available kinds: {available}")]
    UnknownKind { kind: String, available: String },

    /// No dependency set is registered for the framework
    #[error("Unknown CLI framework: {framework}. Available frameworks: {available}")]
    UnknownFramework {
        framework: String,
        available: String,
    },

    /// The target exists and the user declined to continue
    #[error("Operation aborted: {path} already exists")]
    Aborted { path: String },

    /// The project directory could not be created
    #[error("Failed to create project directory {path}")]
    DirectoryCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The module manifest initializer failed
    #[error("Failed to initialize Go module '{module}'")]
    ManifestInit {
        module: String,
        #[source]
        source: CommandError,
    },

    /// The VCS initializer failed
    #[error("Failed to initialize git repository")]
    VcsInit {
        #[source]
        source: CommandError,
    },

    /// Fetching the framework dependencies failed
    #[error("Failed to add dependencies for {framework}")]
    DependencyFetch {
        framework: String,
        #[source]
        source: CommandError,
    },

    /// Writing the starter file failed
    #[error("Failed to write {path}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A starter template could not be loaded into the registry
    #[error("Failed to load template {name}: {message}")]
    TemplateLoad { name: String, message: String },

    /// Core library error
    #[error(transparent)]
    Core(#[from] gostrap_core::Error),
}

impl Error {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown kind error
    pub fn unknown_kind(kind: impl Into<String>, available: impl Into<String>) -> Self {
        Self::UnknownKind {
            kind: kind.into(),
            available: available.into(),
        }
    }

    /// Create an unknown framework error
    pub fn unknown_framework(framework: impl Into<String>, available: impl Into<String>) -> Self {
        Self::UnknownFramework {
            framework: framework.into(),
            available: available.into(),
        }
    }

    /// Create an aborted error
    pub fn aborted(path: impl Into<String>) -> Self {
        Self::Aborted { path: path.into() }
    }

    /// Create a template load error
    pub fn template_load(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateLoad {
            name: name.into(),
            message: message.into(),
        }
    }

    /// The pipeline step this error belongs to, if it came from one
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::DirectoryCreation { .. } => Some(Step::CreateDirectory),
            Self::ManifestInit { .. } => Some(Step::InitManifest),
            Self::VcsInit { .. } => Some(Step::InitVcs),
            Self::DependencyFetch { .. } => Some(Step::FetchDependencies),
            Self::FileWrite { .. } => Some(Step::WriteTemplate),
            _ => None,
        }
    }

    /// Whether this failure happens after the project directory exists
    pub fn requires_rollback(&self) -> bool {
        matches!(
            self,
            Self::ManifestInit { .. }
                | Self::VcsInit { .. }
                | Self::DependencyFetch { .. }
                | Self::FileWrite { .. }
        )
    }

    /// Whether the user declined to continue
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

/// Failure to undo a partially provisioned project
#[derive(Error, Debug)]
#[error("Failed to remove {path}")]
pub struct RollbackError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// What happened to the partially created project after a failure
#[derive(Debug)]
pub enum Rollback {
    /// The failure happened before anything was created
    NotNeeded,
    /// Everything the run created was removed
    Completed,
    /// Removal failed; the original failure is still the reported cause
    Failed(RollbackError),
}

/// Error returned by [`crate::Provisioner::create_project`]
///
/// Pairs the failure cause with the outcome of the rollback it triggered.
/// The cause's kind is never replaced by a rollback failure.
#[derive(Debug)]
pub struct ProvisionError {
    cause: Error,
    rollback: Rollback,
}

impl ProvisionError {
    pub(crate) fn new(cause: Error, rollback: Rollback) -> Self {
        Self { cause, rollback }
    }

    /// The failure that ended the run
    pub fn cause(&self) -> &Error {
        &self.cause
    }

    /// The rollback outcome
    pub fn rollback(&self) -> &Rollback {
        &self.rollback
    }

    /// Whether the partial project was removed
    pub fn rolled_back(&self) -> bool {
        matches!(self.rollback, Rollback::Completed)
    }

    /// Whether the user declined to continue
    pub fn is_aborted(&self) -> bool {
        self.cause.is_aborted()
    }
}

impl From<Error> for ProvisionError {
    fn from(cause: Error) -> Self {
        Self::new(cause, Rollback::NotNeeded)
    }
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)?;
        if let Rollback::Failed(err) = &self.rollback {
            let detail = std::error::Error::source(err)
                .map(|e| format!(": {}", e))
                .unwrap_or_default();
            write!(f, " (rollback also failed: {}{})", err, detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProvisionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.cause)
    }
}
