//! Assertion helpers for provisioned projects

use camino::Utf8Path;
use gostrap_projects::{ProjectKind, TemplateRegistry};
use std::collections::BTreeSet;

pub fn assert_absent(path: &Utf8Path) {
    assert!(
        !path.exists(),
        "expected {} to be removed, found entries: {:?}",
        path,
        entries(path)
    );
}

/// `main.go` exists and equals the embedded template for `kind`
pub fn assert_starter_file(project: &Utf8Path, kind: ProjectKind) {
    let written = std::fs::read_to_string(project.join("main.go")).unwrap();
    let registry = TemplateRegistry::embedded().unwrap();
    assert_eq!(Some(written.as_str()), registry.template_for(kind));
}

/// Top-level entry names of `dir`, sorted
pub fn entries(dir: &Utf8Path) -> BTreeSet<String> {
    match dir.read_dir_utf8() {
        Ok(entries) => entries
            .map(|entry| entry.unwrap().file_name().to_string())
            .collect(),
        Err(_) => BTreeSet::new(),
    }
}

/// Owned, sorted copy of `names` for comparing against [`entries`]
pub fn names(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}
