//! Fake collaborators for the provisioner
//!
//! `FakeRunner` never spawns a process. It records each invocation and
//! mimics the side effects the real tools leave in the project directory,
//! so rollback is observable without Go or git installed.

use camino::{Utf8Path, Utf8PathBuf};
use gostrap_projects::runner::render_command;
use gostrap_projects::{
    CommandError, CommandRunner, Error, OverwritePrompt, ProjectPath, ProvisionObserver, Rollback,
    Step,
};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

/// Record of a command invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub working_dir: Utf8PathBuf,
}

/// Scripted outcome for commands starting with a prefix
#[derive(Clone, Debug)]
enum Script {
    Fail(i32),
    SpawnError,
    Panic,
}

/// Fake command runner with per-command failure scripting
#[derive(Clone, Default)]
pub struct FakeRunner {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    scripts: Arc<Mutex<HashMap<String, Script>>>,
    plants: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make commands starting with `prefix` exit with `code`
    pub fn fail_on(self, prefix: &str, code: i32) -> Self {
        self.script(prefix, Script::Fail(code))
    }

    /// Make commands starting with `prefix` fail to spawn
    pub fn missing(self, prefix: &str) -> Self {
        self.script(prefix, Script::SpawnError)
    }

    /// Make commands starting with `prefix` panic
    pub fn panic_on(self, prefix: &str) -> Self {
        self.script(prefix, Script::Panic)
    }

    /// After a successful command starting with `prefix`, create the
    /// directory `relative` inside its working directory
    pub fn plant_dir_on(self, prefix: &str, relative: &str) -> Self {
        self.plants
            .lock()
            .unwrap()
            .push((prefix.to_string(), relative.to_string()));
        self
    }

    fn script(self, prefix: &str, script: Script) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(prefix.to_string(), script);
        self
    }

    /// Recorded command lines in invocation order
    pub fn commands(&self) -> Vec<String> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.command.clone())
            .collect()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    fn scripted(&self, command: &str) -> Option<Script> {
        self.scripts
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map(|(_, script)| script.clone())
    }

    fn plant(&self, working_dir: &Utf8Path, command: &str) -> std::io::Result<()> {
        let plants = self.plants.lock().unwrap().clone();
        for (prefix, relative) in plants {
            if command.starts_with(prefix.as_str()) {
                fs::create_dir_all(working_dir.join(relative))?;
            }
        }
        Ok(())
    }

    fn simulate(working_dir: &Utf8Path, program: &str, args: &[String]) -> std::io::Result<()> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match (program, args.as_slice()) {
            ("go", ["mod", "init", module]) => {
                fs::write(working_dir.join("go.mod"), format!("module {}\n\ngo 1.22\n", module))
            }
            ("git", ["init"]) => fs::create_dir_all(working_dir.join(".git/objects")),
            ("go", ["get", packages @ ..]) => {
                let requires: String = packages
                    .iter()
                    .map(|p| format!("require {} v1.0.0\n", p))
                    .collect();
                let manifest = working_dir.join("go.mod");
                let current = fs::read_to_string(&manifest)?;
                fs::write(&manifest, current + &requires)?;
                fs::write(working_dir.join("go.sum"), requires)
            }
            _ => Ok(()),
        }
    }
}

impl CommandRunner for FakeRunner {
    fn run(
        &self,
        working_dir: &Utf8Path,
        program: &str,
        args: &[String],
    ) -> Result<(), CommandError> {
        let command = render_command(program, args);
        self.invocations.lock().unwrap().push(Invocation {
            command: command.clone(),
            working_dir: working_dir.to_path_buf(),
        });

        match self.scripted(&command) {
            Some(Script::Fail(code)) => {
                // Real tools often leave partial output behind
                let _ = fs::write(working_dir.join("partial.tmp"), &command);
                Err(CommandError::Failed {
                    command,
                    code: Some(code),
                })
            }
            Some(Script::SpawnError) => Err(CommandError::Spawn {
                program: program.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Some(Script::Panic) => panic!("simulated crash in '{}'", command),
            None => Self::simulate(working_dir, program, args)
                .and_then(|()| self.plant(working_dir, &command))
                .map_err(|source| CommandError::Spawn {
                    program: program.to_string(),
                    source,
                }),
        }
    }
}

/// Overwrite prompt with a fixed answer that records what it was asked
#[derive(Clone)]
pub struct ScriptedPrompt {
    answer: bool,
    asked: Arc<Mutex<Vec<Utf8PathBuf>>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn asked(&self) -> Vec<Utf8PathBuf> {
        self.asked.lock().unwrap().clone()
    }
}

impl OverwritePrompt for ScriptedPrompt {
    fn confirm_overwrite(&self, path: &Utf8Path) -> bool {
        self.asked.lock().unwrap().push(path.to_path_buf());
        self.answer
    }
}

/// Observer that records events as short strings
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProvisionObserver for RecordingObserver {
    fn on_step_started(&self, step: Step, _subject: &str) {
        self.push(format!("start {}", step));
    }

    fn on_step_completed(&self, step: Step, _subject: &str) {
        self.push(format!("done {}", step));
    }

    fn on_step_failed(&self, step: Option<Step>, _error: &Error) {
        match step {
            Some(step) => self.push(format!("failed {}", step)),
            None => self.push("failed".to_string()),
        }
    }

    fn on_rollback(&self, _path: &ProjectPath, outcome: &Rollback) {
        let outcome = match outcome {
            Rollback::NotNeeded => "not needed",
            Rollback::Completed => "completed",
            Rollback::Failed(_) => "failed",
        };
        self.push(format!("rollback {}", outcome));
    }

    fn on_committed(&self, _path: &ProjectPath) {
        self.push("committed".to_string());
    }
}
