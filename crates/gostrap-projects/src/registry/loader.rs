//! Starter template loading from embedded files and user overrides.
//!
//! Loads starter templates from:
//! - `embedded/templates/main-<kind>.go` (compiled into binary)
//! - `<templates dir>/main-<kind>.go` (optional per-kind user overrides)

use super::TemplateRegistry;
use crate::error::{Error, Result};
use crate::types::ProjectKind;
use camino::Utf8Path;
use rust_embed::RustEmbed;
use tracing::{debug, info};

/// Starter templates compiled into the binary
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/templates/"]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    /// Embedded starter text for `kind`
    pub fn text(kind: ProjectKind) -> Result<String> {
        let file_name = kind.template_file();
        let file = Self::get(&file_name)
            .ok_or_else(|| Error::template_load(&file_name, "not embedded in this build"))?;

        String::from_utf8(file.data.into_owned())
            .map_err(|_| Error::template_load(&file_name, "not valid UTF-8"))
    }
}

impl TemplateRegistry {
    /// Registry holding the embedded template of every kind
    pub fn embedded() -> Result<Self> {
        let templates = ProjectKind::all()
            .into_iter()
            .map(|kind| EmbeddedTemplates::text(kind).map(|text| (kind, text)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(templates))
    }

    /// Embedded templates, replaced per kind by files found in `dir`
    ///
    /// A missing `dir` is not an error.
    pub fn with_overrides(dir: &Utf8Path) -> Result<Self> {
        let mut registry = Self::embedded()?;
        if !dir.is_dir() {
            debug!("No template overrides at {}", dir);
            return Ok(registry);
        }

        for kind in ProjectKind::all() {
            let path = dir.join(kind.template_file());
            if !path.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&path)
                .map_err(|e| Error::template_load(path.as_str(), e.to_string()))?;
            info!("Using {} template override from {}", kind, path);
            registry.templates.insert(kind, text);
        }

        Ok(registry)
    }
}
