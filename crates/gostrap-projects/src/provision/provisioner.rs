//! The provisioning pipeline

use super::guard::RollbackGuard;
use super::observer::{ProvisionObserver, TracingObserver};
use super::prompt::{AssumeNo, OverwritePrompt};
use super::state::ProvisioningState;
use crate::error::{Error, ProvisionError, Result};
use crate::path;
use crate::registry::Registry;
use crate::runner::{CommandError, CommandRunner, ProcessRunner};
use crate::types::{ProjectKind, ProjectPath, ProjectRequest, Step};
use camino::{Utf8Path, Utf8PathBuf};
use gostrap_core::GostrapConfig;
use std::fs;
use std::io;
use tracing::{debug, info, warn};

/// External command lines and the starter file name
///
/// Each command line is a program followed by its leading arguments; the
/// provisioner appends the module path or package identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub manifest_init: Vec<String>,
    pub vcs_init: Vec<String>,
    pub dependency_fetch: Vec<String>,
    pub entry_point: String,
}

impl Toolchain {
    pub fn from_config(config: &GostrapConfig) -> Self {
        Self {
            manifest_init: config.toolchain.manifest_init.clone(),
            vcs_init: config.toolchain.vcs_init.clone(),
            dependency_fetch: config.toolchain.dependency_fetch.clone(),
            entry_point: config.entry_point.clone(),
        }
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::from_config(&GostrapConfig::default())
    }
}

/// Everything `create_project` needs, checked before any mutation
#[derive(Debug)]
struct ProvisionPlan<'a> {
    path: ProjectPath,
    template: &'a str,
    dependencies: Option<(&'a str, &'a [String])>,
}

/// Creates projects under a base directory
///
/// Collaborators are injected: the registries and toolchain at construction,
/// and optionally the command runner, overwrite prompt, and observer. The
/// defaults spawn real processes, decline to reuse existing directories, and
/// log through `tracing`.
pub struct Provisioner {
    base_dir: Utf8PathBuf,
    registry: Registry,
    toolchain: Toolchain,
    runner: Box<dyn CommandRunner>,
    prompt: Box<dyn OverwritePrompt>,
    observer: Box<dyn ProvisionObserver>,
}

impl Provisioner {
    pub fn new(base_dir: Utf8PathBuf, registry: Registry, toolchain: Toolchain) -> Self {
        Self {
            base_dir,
            registry,
            toolchain,
            runner: Box::new(ProcessRunner::new()),
            prompt: Box::new(AssumeNo),
            observer: Box::new(TracingObserver),
        }
    }

    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_prompt(mut self, prompt: impl OverwritePrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn with_observer(mut self, observer: impl ProvisionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Provision the project described by `request`
    ///
    /// Either the project is complete when this returns `Ok`, or everything
    /// the run created has been removed (or the removal failure is reported
    /// in the returned error next to the cause).
    ///
    /// # Errors
    /// - [`Error::InvalidName`], [`Error::UnknownKind`],
    ///   [`Error::UnknownFramework`]: nothing was touched
    /// - [`Error::Aborted`]: the target exists and the prompt declined
    /// - [`Error::DirectoryCreation`]: nothing to undo
    /// - [`Error::ManifestInit`], [`Error::VcsInit`],
    ///   [`Error::DependencyFetch`], [`Error::FileWrite`]: rolled back
    pub fn create_project(
        &self,
        request: &ProjectRequest,
    ) -> std::result::Result<ProjectPath, ProvisionError> {
        let plan = self.plan(request)?;
        let path = plan.path.clone();
        info!(
            "Provisioning {} project '{}' at {}",
            request.kind(),
            request.name(),
            path
        );

        if path.as_path().exists() {
            if !self.prompt.confirm_overwrite(path.as_path()) {
                info!("Not touching existing {}", path);
                return Err(Error::aborted(path.to_string()).into());
            }
            warn!("Continuing in existing {}", path);
        }

        let mut state = ProvisioningState::new();
        self.observer
            .on_step_started(Step::CreateDirectory, path.as_path().as_str());
        match create_directory(path.as_path()) {
            Ok(guard) => state.directory_created(guard),
            Err(cause) => {
                self.observer.on_step_failed(cause.step(), &cause);
                return Err(cause.into());
            }
        }
        self.observer
            .on_step_completed(Step::CreateDirectory, path.as_path().as_str());

        match self.execute(request, &plan, &mut state) {
            Ok(()) => {
                state.commit();
                self.observer.on_committed(&path);
                Ok(path)
            }
            Err(cause) => {
                self.observer.on_step_failed(cause.step(), &cause);
                let rollback = state.rollback();
                self.observer.on_rollback(&path, &rollback);
                Err(ProvisionError::new(cause, rollback))
            }
        }
    }

    fn plan<'a>(&'a self, request: &'a ProjectRequest) -> Result<ProvisionPlan<'a>> {
        let path = path::resolve(&self.base_dir, request.name())?;

        let templates = self.registry.templates();
        let template = templates
            .template_for(request.kind())
            .ok_or_else(|| Error::unknown_kind(request.kind().as_str(), templates.available()))?;

        let registered = self.registry.dependencies();
        let framework = request
            .framework()
            .filter(|_| request.kind() == ProjectKind::Cli)
            .filter(|framework| !registered.is_sentinel(framework));
        let dependencies = match framework {
            Some(framework) => {
                let ids = registered.dependencies_for(framework).ok_or_else(|| {
                    Error::unknown_framework(framework, registered.available())
                })?;
                (!ids.is_empty()).then_some((framework, ids))
            }
            None => None,
        };

        debug!(
            "Plan for '{}': template {} bytes, dependencies {:?}",
            request.name(),
            template.len(),
            dependencies
        );
        Ok(ProvisionPlan {
            path,
            template,
            dependencies,
        })
    }

    fn execute(
        &self,
        request: &ProjectRequest,
        plan: &ProvisionPlan<'_>,
        state: &mut ProvisioningState,
    ) -> Result<()> {
        let dir = plan.path.as_path();

        let module = request.module_path();
        self.step(state, Step::InitManifest, module, || {
            self.run_tool(dir, &self.toolchain.manifest_init, &[module.to_string()])
                .map_err(|source| Error::ManifestInit {
                    module: module.to_string(),
                    source,
                })
        })?;

        if request.init_vcs() {
            self.step(state, Step::InitVcs, dir.as_str(), || {
                self.run_tool(dir, &self.toolchain.vcs_init, &[])
                    .map_err(|source| Error::VcsInit { source })
            })?;
        }

        if let Some((framework, ids)) = plan.dependencies {
            self.step(state, Step::FetchDependencies, framework, || {
                self.run_tool(dir, &self.toolchain.dependency_fetch, ids)
                    .map_err(|source| Error::DependencyFetch {
                        framework: framework.to_string(),
                        source,
                    })
            })?;
        }

        let entry_point = self.toolchain.entry_point.as_str();
        self.step(state, Step::WriteTemplate, entry_point, || {
            let file = dir.join(entry_point);
            fs::write(&file, plan.template).map_err(|source| Error::FileWrite {
                path: file.to_string(),
                source,
            })
        })
    }

    fn step(
        &self,
        state: &mut ProvisioningState,
        step: Step,
        subject: &str,
        action: impl FnOnce() -> Result<()>,
    ) -> Result<()> {
        self.observer.on_step_started(step, subject);
        action()?;
        state.mark_completed(step);
        self.observer.on_step_completed(step, subject);
        Ok(())
    }

    fn run_tool(
        &self,
        dir: &Utf8Path,
        command: &[String],
        extra: &[String],
    ) -> std::result::Result<(), CommandError> {
        let Some((program, leading)) = command.split_first() else {
            return Err(CommandError::Spawn {
                program: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty command line"),
            });
        };
        let args: Vec<String> = leading.iter().chain(extra).cloned().collect();
        self.runner.run(dir, program, &args)
    }
}

/// Create `path` and return the guard that owns what was created
///
/// A directory that already exists is guarded without removing it. When
/// creation fails partway, ancestors created on the way are removed again.
fn create_directory(path: &Utf8Path) -> Result<RollbackGuard> {
    let creation_error = |source: io::Error| Error::DirectoryCreation {
        path: path.to_string(),
        source,
    };

    if path.exists() {
        if !path.is_dir() {
            return Err(creation_error(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "a file with this name exists",
            )));
        }
        return RollbackGuard::existing_dir(path).map_err(creation_error);
    }

    let root = first_missing_ancestor(path);
    match fs::create_dir_all(path) {
        Ok(()) => {
            debug!("Created {} (new tree rooted at {})", path, root);
            Ok(RollbackGuard::new_tree(root))
        }
        Err(source) => {
            if root.exists() {
                if let Err(e) = fs::remove_dir_all(&root) {
                    warn!("Could not remove partially created {}: {}", root, e);
                }
            }
            Err(creation_error(source))
        }
    }
}

/// Topmost ancestor of `path` (or `path` itself) that does not exist yet
fn first_missing_ancestor(path: &Utf8Path) -> Utf8PathBuf {
    let mut root = path;
    for ancestor in path.ancestors().skip(1) {
        if ancestor.as_str().is_empty() || ancestor.exists() {
            break;
        }
        root = ancestor;
    }
    root.to_path_buf()
}
