//! Core types for project provisioning

use crate::error::Error;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::str::FromStr;

/// Kind of project to scaffold; selects the starter template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectKind {
    /// Command-line program
    Cli,
    /// JSON HTTP API server
    Api,
    /// HTML web application
    App,
}

impl ProjectKind {
    /// Get all available project kinds
    pub fn all() -> Vec<Self> {
        vec![Self::Cli, Self::Api, Self::App]
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Api => "api",
            Self::App => "app",
        }
    }

    /// Get description for the project kind
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cli => "Command-line program",
            Self::Api => "HTTP API server with request logging",
            Self::App => "Web application serving HTML",
        }
    }

    /// File name of the embedded starter template
    pub fn template_file(&self) -> String {
        format!("main-{}.go", self.as_str())
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                let available = Self::all()
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Error::unknown_kind(s, available)
            })
    }
}

/// Everything needed to provision one project
///
/// Immutable once built; the builder methods consume and return `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    name: String,
    kind: ProjectKind,
    module_path: Option<String>,
    framework: Option<String>,
    init_vcs: bool,
}

impl ProjectRequest {
    /// Request a project with default module path, no framework, and no VCS
    pub fn new(name: impl Into<String>, kind: ProjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            module_path: None,
            framework: None,
            init_vcs: false,
        }
    }

    /// Set the module path passed to the manifest initializer
    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        let module_path = module_path.into();
        self.module_path = if module_path.trim().is_empty() {
            None
        } else {
            Some(module_path)
        };
        self
    }

    /// Set the CLI framework whose dependencies should be fetched
    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    /// Enable or disable VCS initialization
    pub fn with_vcs(mut self, init_vcs: bool) -> Self {
        self.init_vcs = init_vcs;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Module path, falling back to the project name
    pub fn module_path(&self) -> &str {
        self.module_path.as_deref().unwrap_or(&self.name)
    }

    /// Requested framework; `None` means the registry's sentinel
    pub fn framework(&self) -> Option<&str> {
        self.framework.as_deref()
    }

    pub fn init_vcs(&self) -> bool {
        self.init_vcs
    }
}

/// Normalized absolute location of a project, contained in the base directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectPath(Utf8PathBuf);

impl ProjectPath {
    pub(crate) fn new(path: Utf8PathBuf) -> Self {
        Self(path)
    }

    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }
}

impl AsRef<Utf8Path> for ProjectPath {
    fn as_ref(&self) -> &Utf8Path {
        &self.0
    }
}

impl AsRef<std::path::Path> for ProjectPath {
    fn as_ref(&self) -> &std::path::Path {
        self.0.as_std_path()
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Steps of the provisioning pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    CreateDirectory,
    InitManifest,
    InitVcs,
    FetchDependencies,
    WriteTemplate,
}

impl Step {
    /// Short imperative description, used in logs
    pub fn description(&self) -> &'static str {
        match self {
            Self::CreateDirectory => "create project directory",
            Self::InitManifest => "initialize Go module",
            Self::InitVcs => "initialize git repository",
            Self::FetchDependencies => "add dependencies",
            Self::WriteTemplate => "write starter file",
        }
    }

    /// Message shown once the step has completed
    pub fn completed_message(&self) -> &'static str {
        match self {
            Self::CreateDirectory => "Created project directory",
            Self::InitManifest => "Initialized Go module",
            Self::InitVcs => "Initialized git repository",
            Self::FetchDependencies => "Dependencies added",
            Self::WriteTemplate => "Wrote starter file",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
