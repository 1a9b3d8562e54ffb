//! Subcommand implementations

pub mod list;
pub mod new;
pub mod version;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use gostrap_core::{ConfigLoader, GostrapConfig};
use gostrap_projects::{DependencyRegistry, Registry, TemplateRegistry};

/// Configuration and registries shared by the subcommands
pub(crate) struct Workspace {
    pub config: GostrapConfig,
    pub projects_dir: Utf8PathBuf,
    pub registry: Registry,
}

impl Workspace {
    /// Load configuration and build the registries, once per process
    pub fn load() -> Result<Self> {
        let loader = ConfigLoader::new()?;
        let config = loader
            .load()
            .with_context(|| format!("Failed to load configuration from {}", loader.config_dir()))?;
        let projects_dir = config.resolve_projects_dir()?;

        let templates = TemplateRegistry::with_overrides(&loader.templates_dir())?;
        let registry = Registry::new(templates, DependencyRegistry::from_config(&config));

        tracing::debug!("Projects directory: {}", projects_dir);
        Ok(Self {
            config,
            projects_dir,
            registry,
        })
    }
}
