//! Compensating rollback for a partially provisioned project

use crate::error::RollbackError;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
enum RollbackScope {
    /// The run created this directory; remove all of it
    WholeTree { root: Utf8PathBuf },
    /// The directory existed before the run; remove only entries it added
    NewEntries {
        dir: Utf8PathBuf,
        existing: BTreeSet<OsString>,
    },
}

/// Owns the project directory while a run is in flight
///
/// The guard starts armed. [`RollbackGuard::disarm`] keeps everything once
/// the run has succeeded; [`RollbackGuard::rollback`] undoes the run and
/// reports failures. Dropping an armed guard undoes the run as well, logging
/// any failure, so an early return or a panic never leaves a half-built
/// project behind.
#[derive(Debug)]
pub struct RollbackGuard {
    scope: RollbackScope,
    armed: bool,
}

impl RollbackGuard {
    /// Guard a directory tree created by this run
    ///
    /// `root` is the topmost directory the run created, which may be an
    /// ancestor of the project directory.
    pub fn new_tree(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            scope: RollbackScope::WholeTree { root: root.into() },
            armed: true,
        }
    }

    /// Guard a directory that already exists, recording its current entries
    pub fn existing_dir(dir: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        let existing = fs::read_dir(&dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<io::Result<BTreeSet<_>>>()?;
        debug!("Recorded {} existing entries in {}", existing.len(), dir);

        Ok(Self {
            scope: RollbackScope::NewEntries { dir, existing },
            armed: true,
        })
    }

    /// Directory this guard removes from (the tree root or the existing dir)
    pub fn path(&self) -> &Utf8Path {
        match &self.scope {
            RollbackScope::WholeTree { root } => root,
            RollbackScope::NewEntries { dir, .. } => dir,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Keep everything the run created
    pub fn disarm(mut self) {
        debug!("Keeping {}", self.path());
        self.armed = false;
    }

    /// Remove everything the run created
    ///
    /// Entries that are already gone count as removed. Every entry is
    /// attempted; the first failure is returned.
    pub fn rollback(mut self) -> Result<(), RollbackError> {
        self.armed = false;
        self.undo()
    }

    fn undo(&self) -> Result<(), RollbackError> {
        match &self.scope {
            RollbackScope::WholeTree { root } => {
                warn!("Removing {}", root);
                remove_entry(root)
            }
            RollbackScope::NewEntries { dir, existing } => {
                warn!("Removing entries added to {}", dir);
                let entries = match fs::read_dir(dir) {
                    Ok(entries) => entries,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
                    Err(source) => {
                        return Err(RollbackError {
                            path: dir.to_string(),
                            source,
                        })
                    }
                };

                let mut first_error = None;
                for entry in entries.flatten() {
                    if existing.contains(&entry.file_name()) {
                        continue;
                    }
                    let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
                        warn!("Skipping non UTF-8 entry in {}", dir);
                        continue;
                    };
                    if let Err(e) = remove_entry(&path) {
                        warn!("{}: {}", e, e.source);
                        if first_error.is_none() {
                            first_error = Some(e);
                        }
                    }
                }

                first_error.map_or(Ok(()), Err)
            }
        }
    }
}

impl Drop for RollbackGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("Provisioning did not finish, rolling back {}", self.path());
        if let Err(e) = self.undo() {
            warn!("Rollback failed: {}: {}", e, e.source);
        }
    }
}

fn remove_entry(path: &Utf8Path) -> Result<(), RollbackError> {
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RollbackError {
            path: path.to_string(),
            source,
        }),
    }
}
