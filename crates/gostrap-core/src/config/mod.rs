//! gostrap configuration
//!
//! The configuration decides where projects are created, which external
//! commands implement each provisioning step, and which dependency sets a
//! `cli` project may pull in.
//!
//! ```yaml
//! projects-dir: ~/projects
//! entry-point: main.go
//! default-framework: flag
//! toolchain:
//!   manifest-init: [go, mod, init]
//!   vcs-init: [git, init]
//!   dependency-fetch: [go, get]
//! frameworks:
//!   cobra: [github.com/spf13/cobra]
//!   cli: [github.com/urfave/cli/v2]
//! ```

mod loader;

pub use loader::{ConfigLoader, GOSTRAP_HOME_ENV, GOSTRAP_PROJECTS_DIR_ENV};

use crate::error::{Error, Result};
use crate::utils::{get_home_dir, to_utf8};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete gostrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GostrapConfig {
    /// Base directory new projects are created under
    #[serde(default)]
    pub projects_dir: Option<Utf8PathBuf>,

    /// File name of the generated starter source file
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Framework name meaning "no extra dependencies"
    #[serde(default = "default_framework")]
    pub default_framework: String,

    /// External commands run by the provisioning steps
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Framework name to package identifiers
    #[serde(default = "default_frameworks")]
    pub frameworks: BTreeMap<String, Vec<String>>,
}

impl Default for GostrapConfig {
    fn default() -> Self {
        Self {
            projects_dir: None,
            entry_point: default_entry_point(),
            default_framework: default_framework(),
            toolchain: ToolchainConfig::default(),
            frameworks: default_frameworks(),
        }
    }
}

/// Command lines for each external step; each is a program followed by its
/// leading arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainConfig {
    /// Manifest initializer, the module path is appended
    #[serde(default = "default_manifest_init")]
    pub manifest_init: Vec<String>,

    /// VCS initializer
    #[serde(default = "default_vcs_init")]
    pub vcs_init: Vec<String>,

    /// Dependency fetcher, package identifiers are appended
    #[serde(default = "default_dependency_fetch")]
    pub dependency_fetch: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            manifest_init: default_manifest_init(),
            vcs_init: default_vcs_init(),
            dependency_fetch: default_dependency_fetch(),
        }
    }
}

impl GostrapConfig {
    /// Check that every value the provisioner relies on is usable
    pub fn validate(&self) -> Result<()> {
        let commands = [
            ("toolchain.manifest-init", &self.toolchain.manifest_init),
            ("toolchain.vcs-init", &self.toolchain.vcs_init),
            ("toolchain.dependency-fetch", &self.toolchain.dependency_fetch),
        ];
        for (key, argv) in commands {
            match argv.first() {
                Some(program) if !program.trim().is_empty() => {}
                _ => {
                    return Err(Error::invalid_config(format!(
                        "{} must name a program",
                        key
                    )))
                }
            }
        }

        let entry = Utf8Path::new(&self.entry_point);
        if self.entry_point.is_empty() || entry.file_name() != Some(self.entry_point.as_str()) {
            return Err(Error::invalid_config(format!(
                "entry-point must be a plain file name, got '{}'",
                self.entry_point
            )));
        }

        if self.default_framework.trim().is_empty() {
            return Err(Error::invalid_config("default-framework must not be empty"));
        }

        if let Some((name, _)) = self.frameworks.iter().find(|(_, ids)| ids.is_empty()) {
            return Err(Error::invalid_config(format!(
                "framework '{}' lists no packages",
                name
            )));
        }

        Ok(())
    }

    /// Resolve the base projects directory to an absolute path
    ///
    /// A leading `~` expands to the home directory and relative paths are
    /// taken relative to it. Without a configured value, `$HOME/projects`.
    pub fn resolve_projects_dir(&self) -> Result<Utf8PathBuf> {
        let home = to_utf8(get_home_dir()?)?;

        let Some(configured) = &self.projects_dir else {
            return Ok(home.join("projects"));
        };

        let expanded = match configured.as_str().strip_prefix('~') {
            Some("") => home,
            Some(rest) if rest.starts_with('/') => home.join(rest.trim_start_matches('/')),
            _ if configured.is_absolute() => configured.clone(),
            _ => home.join(configured),
        };

        Ok(expanded)
    }
}

fn default_entry_point() -> String {
    "main.go".to_string()
}

fn default_framework() -> String {
    "flag".to_string()
}

fn default_manifest_init() -> Vec<String> {
    vec!["go".to_string(), "mod".to_string(), "init".to_string()]
}

fn default_vcs_init() -> Vec<String> {
    vec!["git".to_string(), "init".to_string()]
}

fn default_dependency_fetch() -> Vec<String> {
    vec!["go".to_string(), "get".to_string()]
}

fn default_frameworks() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (
            "cobra".to_string(),
            vec!["github.com/spf13/cobra".to_string()],
        ),
        (
            "cli".to_string(),
            vec!["github.com/urfave/cli/v2".to_string()],
        ),
    ])
}
