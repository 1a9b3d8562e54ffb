//! Template and dependency registries
//!
//! Both registries are immutable once built and are injected into the
//! [`crate::Provisioner`]. Lookups are pure; all I/O happens while loading.
//!
//! - [`TemplateRegistry`] maps a [`ProjectKind`] to its starter source text.
//! - [`DependencyRegistry`] maps a CLI framework name to the package
//!   identifiers fetched for it. One framework name, the sentinel
//!   (`flag` by default), means "standard library only".

mod loader;

pub use loader::EmbeddedTemplates;

use crate::types::ProjectKind;
use gostrap_core::GostrapConfig;
use std::collections::BTreeMap;

/// Starter source text per project kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    templates: BTreeMap<ProjectKind, String>,
}

impl TemplateRegistry {
    /// Build a registry from explicit template text
    pub fn new(templates: impl IntoIterator<Item = (ProjectKind, String)>) -> Self {
        Self {
            templates: templates.into_iter().collect(),
        }
    }

    /// Starter text for `kind`
    pub fn template_for(&self, kind: ProjectKind) -> Option<&str> {
        self.templates.get(&kind).map(String::as_str)
    }

    /// Registered kinds, in declaration order
    pub fn kinds(&self) -> Vec<ProjectKind> {
        self.templates.keys().copied().collect()
    }

    /// Registered kinds joined for messages
    pub fn available(&self) -> String {
        self.templates
            .keys()
            .map(ProjectKind::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Package identifiers per CLI framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRegistry {
    sentinel: String,
    frameworks: BTreeMap<String, Vec<String>>,
}

impl DependencyRegistry {
    /// Build a registry; `sentinel` names the framework that needs no packages
    pub fn new(
        sentinel: impl Into<String>,
        frameworks: impl IntoIterator<Item = (String, Vec<String>)>,
    ) -> Self {
        Self {
            sentinel: sentinel.into(),
            frameworks: frameworks.into_iter().collect(),
        }
    }

    /// Build the registry described by the configuration
    pub fn from_config(config: &GostrapConfig) -> Self {
        Self::new(
            config.default_framework.clone(),
            config
                .frameworks
                .iter()
                .map(|(name, ids)| (name.clone(), ids.clone())),
        )
    }

    /// Package identifiers for `framework`
    pub fn dependencies_for(&self, framework: &str) -> Option<&[String]> {
        self.frameworks.get(framework).map(Vec::as_slice)
    }

    /// Whether `framework` is the "no extra dependencies" sentinel
    pub fn is_sentinel(&self, framework: &str) -> bool {
        framework == self.sentinel
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Registered framework names, sorted
    pub fn frameworks(&self) -> Vec<&str> {
        self.frameworks.keys().map(String::as_str).collect()
    }

    /// Sentinel plus registered frameworks, joined for messages
    pub fn available(&self) -> String {
        std::iter::once(self.sentinel.as_str())
            .chain(self.frameworks())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The two registries handed to the provisioner together
#[derive(Debug, Clone)]
pub struct Registry {
    templates: TemplateRegistry,
    dependencies: DependencyRegistry,
}

impl Registry {
    pub fn new(templates: TemplateRegistry, dependencies: DependencyRegistry) -> Self {
        Self {
            templates,
            dependencies,
        }
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn dependencies(&self) -> &DependencyRegistry {
        &self.dependencies
    }
}
