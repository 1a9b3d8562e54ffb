//! Sandboxed workspaces

use camino::{Utf8Path, Utf8PathBuf};
use gostrap_core::GostrapConfig;
use gostrap_projects::{
    DependencyRegistry, OverwritePrompt, Provisioner, Registry, TemplateRegistry, Toolchain,
};
use tempfile::TempDir;

use super::mocks::FakeRunner;

/// Temporary directory with a base projects directory inside it
///
/// The base directory itself is not created, so tests can observe whether a
/// run created it.
pub struct TestWorkspace {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        Self { _temp: temp, root }
    }

    /// Workspace whose base projects directory already exists
    pub fn with_base_dir() -> Self {
        let workspace = Self::new();
        std::fs::create_dir_all(workspace.base_dir()).unwrap();
        workspace
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn base_dir(&self) -> Utf8PathBuf {
        self.root.join("projects")
    }

    pub fn project(&self, name: &str) -> Utf8PathBuf {
        self.base_dir().join(name)
    }

    /// Provisioner using the embedded templates, default config, and `runner`
    pub fn provisioner(&self, runner: &FakeRunner) -> Provisioner {
        let config = GostrapConfig::default();
        Provisioner::new(
            self.base_dir(),
            Registry::new(
                TemplateRegistry::embedded().unwrap(),
                DependencyRegistry::from_config(&config),
            ),
            Toolchain::from_config(&config),
        )
        .with_runner(runner.clone())
    }

    pub fn provisioner_with_prompt(
        &self,
        runner: &FakeRunner,
        prompt: impl OverwritePrompt + 'static,
    ) -> Provisioner {
        self.provisioner(runner).with_prompt(prompt)
    }
}
