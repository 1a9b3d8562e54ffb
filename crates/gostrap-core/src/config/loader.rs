//! Layered configuration loader
//!
//! Loads configuration from multiple sources with the following precedence
//! (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (`~/.gostrap/config.yaml`, or `$GOSTRAP_HOME/config.yaml`)
//! 3. Environment variables (`GOSTRAP_PROJECTS_DIR`)
//! 4. CLI flags (handled by caller)

use super::GostrapConfig;
use crate::error::{Error, Result};
use crate::utils::{get_home_dir, to_utf8};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use std::env;
use std::fs;
use tracing::debug;

/// Environment variable overriding the gostrap configuration directory
pub const GOSTRAP_HOME_ENV: &str = "GOSTRAP_HOME";

/// Environment variable overriding the base projects directory
pub const GOSTRAP_PROJECTS_DIR_ENV: &str = "GOSTRAP_PROJECTS_DIR";

const DEFAULTS_FILE: &str = "defaults.yaml";
const USER_CONFIG_FILE: &str = "config.yaml";

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
struct EmbeddedConfigs;

/// Configuration hierarchy loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a loader rooted at `$GOSTRAP_HOME` or `~/.gostrap`
    pub fn new() -> Result<Self> {
        let config_dir = match env::var(GOSTRAP_HOME_ENV) {
            Ok(dir) if !dir.is_empty() => Utf8PathBuf::from(dir),
            _ => to_utf8(get_home_dir()?)?.join(".gostrap"),
        };
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Directory holding `config.yaml` and template overrides
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Directory scanned for user starter template overrides
    pub fn templates_dir(&self) -> Utf8PathBuf {
        self.config_dir.join("templates")
    }

    /// Load the effective configuration
    pub fn load(&self) -> Result<GostrapConfig> {
        let mut config = Self::embedded_defaults()?;

        let user_config_path = self.config_dir.join(USER_CONFIG_FILE);
        if user_config_path.is_file() {
            debug!("Loading user config from {}", user_config_path);
            let overlay = Self::load_yaml_file(&user_config_path)?;
            config = Self::merge(config, overlay);
        }

        let config = Self::apply_env_overrides(config);
        config.validate()?;
        Ok(config)
    }

    /// Parse the configuration compiled into the binary
    pub fn embedded_defaults() -> Result<GostrapConfig> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE)
            .ok_or_else(|| Error::config_not_found(format!("embedded {}", DEFAULTS_FILE)))?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                DEFAULTS_FILE, e
            ))
        })
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<GostrapConfig> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(GostrapConfig::default());
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Merge two configs (base is overridden by overlay, frameworks merged by name)
    fn merge(mut base: GostrapConfig, overlay: GostrapConfig) -> GostrapConfig {
        for (name, packages) in overlay.frameworks {
            base.frameworks.insert(name, packages);
        }

        GostrapConfig {
            projects_dir: overlay.projects_dir.or(base.projects_dir),
            entry_point: overlay.entry_point,
            default_framework: overlay.default_framework,
            toolchain: overlay.toolchain,
            frameworks: base.frameworks,
        }
    }

    fn apply_env_overrides(mut config: GostrapConfig) -> GostrapConfig {
        if let Ok(dir) = env::var(GOSTRAP_PROJECTS_DIR_ENV) {
            if !dir.is_empty() {
                config.projects_dir = Some(Utf8PathBuf::from(dir));
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (ConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        (ConfigLoader::with_dir(config_dir), temp_dir)
    }

    #[test]
    fn test_embedded_defaults_match_builtin() {
        let embedded = ConfigLoader::embedded_defaults().unwrap();
        assert_eq!(embedded, GostrapConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_without_user_file() {
        let (loader, _temp) = create_temp_loader();
        env::remove_var(GOSTRAP_PROJECTS_DIR_ENV);

        let config = loader.load().unwrap();
        assert_eq!(config.projects_dir, None);
        assert_eq!(
            config.frameworks.get("cobra"),
            Some(&vec!["github.com/spf13/cobra".to_string()])
        );
    }

    #[test]
    #[serial]
    fn test_load_user_file_overlays_defaults() {
        let (loader, _temp) = create_temp_loader();
        env::remove_var(GOSTRAP_PROJECTS_DIR_ENV);

        let content = r#"
projects-dir: /srv/go
toolchain:
  vcs-init: [jj, git, init]
frameworks:
  kong: [github.com/alecthomas/kong]
"#;
        fs::write(loader.config_dir().join("config.yaml"), content).unwrap();

        let config = loader.load().unwrap();
        assert_eq!(config.projects_dir, Some(Utf8PathBuf::from("/srv/go")));
        assert_eq!(config.toolchain.vcs_init, vec!["jj", "git", "init"]);
        assert_eq!(config.toolchain.manifest_init, vec!["go", "mod", "init"]);
        assert!(config.frameworks.contains_key("kong"));
        assert!(config.frameworks.contains_key("cobra"));
    }

    #[test]
    #[serial]
    fn test_empty_user_file_is_ignored() {
        let (loader, _temp) = create_temp_loader();
        env::remove_var(GOSTRAP_PROJECTS_DIR_ENV);
        fs::write(loader.config_dir().join("config.yaml"), "\n").unwrap();

        assert_eq!(loader.load().unwrap(), GostrapConfig::default());
    }

    #[test]
    fn test_invalid_user_file_is_reported() {
        let (loader, _temp) = create_temp_loader();
        fs::write(loader.config_dir().join("config.yaml"), "toolchain: [oops").unwrap();

        let err = loader.load().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    #[serial]
    fn test_env_overrides_projects_dir() {
        let (loader, _temp) = create_temp_loader();
        fs::write(loader.config_dir().join("config.yaml"), "projects-dir: /srv/go\n").unwrap();

        env::set_var(GOSTRAP_PROJECTS_DIR_ENV, "/tmp/elsewhere");
        let config = loader.load().unwrap();
        env::remove_var(GOSTRAP_PROJECTS_DIR_ENV);

        assert_eq!(config.projects_dir, Some(Utf8PathBuf::from("/tmp/elsewhere")));
    }

    #[test]
    fn test_templates_dir_is_under_config_dir() {
        let loader = ConfigLoader::with_dir(Utf8PathBuf::from("/home/u/.gostrap"));
        assert_eq!(
            loader.templates_dir(),
            Utf8PathBuf::from("/home/u/.gostrap/templates")
        );
    }
}
