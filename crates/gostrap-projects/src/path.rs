//! Project path resolution
//!
//! Turns a user-supplied project name into a normalized path directly under
//! the base projects directory. Purely lexical: the filesystem is never
//! consulted, so resolving has no side effects.

use crate::error::{Error, Result};
use crate::types::ProjectPath;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Resolve `name` under `base_dir`
///
/// # Errors
/// Returns [`Error::InvalidName`] if the name is empty, is `.` or `..`,
/// contains a path separator or NUL byte, or would normalize to a path
/// outside `base_dir`. A relative `base_dir` is a configuration error.
pub fn resolve(base_dir: &Utf8Path, name: &str) -> Result<ProjectPath> {
    validate_name(name)?;

    if !base_dir.is_absolute() {
        return Err(gostrap_core::Error::invalid_config(format!(
            "projects directory must be absolute, got '{}'",
            base_dir
        ))
        .into());
    }

    let base = normalize(base_dir);
    let candidate = normalize(&base.join(name));

    if candidate == base || !candidate.starts_with(&base) {
        return Err(Error::invalid_name(
            name,
            format!("resolves outside {}", base),
        ));
    }

    Ok(ProjectPath::new(candidate))
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_name(name, "name must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(Error::invalid_name(name, "name must not be a relative path"));
    }
    if name.contains(['/', '\\']) {
        return Err(Error::invalid_name(
            name,
            "name must not contain path separators",
        ));
    }
    if name.contains('\0') {
        return Err(Error::invalid_name(name, "name must not contain NUL bytes"));
    }
    Ok(())
}

/// Lexically normalize a path, folding `.` and `..` components
///
/// `..` never climbs above the root.
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalized = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => {
                normalized.push(component.as_str());
            }
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                let at_root = normalized
                    .components()
                    .last()
                    .map_or(true, |c| {
                        matches!(c, Utf8Component::RootDir | Utf8Component::Prefix(_))
                    });
                if !at_root {
                    normalized.pop();
                }
            }
            Utf8Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> &'static Utf8Path {
        Utf8Path::new("/home/user/projects")
    }

    #[test]
    fn test_resolve_simple_name() {
        let path = resolve(base(), "demo").unwrap();
        assert_eq!(path.as_path(), "/home/user/projects/demo");
    }

    #[test]
    fn test_resolve_normalizes_base() {
        let path = resolve(Utf8Path::new("/home/user/./work/../projects/"), "demo").unwrap();
        assert_eq!(path.as_path(), "/home/user/projects/demo");
    }

    #[test]
    fn test_resolve_rejects_empty_name() {
        for name in ["", "   "] {
            let err = resolve(base(), name).unwrap_err();
            assert!(matches!(err, Error::InvalidName { .. }), "{name:?}");
        }
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        for name in ["..", "../etc", "../../root", "a/../../b", "..\\windows", "."] {
            let err = resolve(base(), name).unwrap_err();
            assert!(matches!(err, Error::InvalidName { .. }), "{name:?}");
        }
    }

    #[test]
    fn test_resolve_rejects_nested_names() {
        let err = resolve(base(), "group/demo").unwrap_err();
        assert!(err.to_string().contains("path separators"));
    }

    #[test]
    fn test_resolve_rejects_nul() {
        assert!(resolve(base(), "de\0mo").is_err());
    }

    #[test]
    fn test_resolve_allows_dots_inside_name() {
        let path = resolve(base(), "my..project").unwrap();
        assert_eq!(path.as_path(), "/home/user/projects/my..project");
    }

    #[test]
    fn test_resolve_requires_absolute_base() {
        let err = resolve(Utf8Path::new("projects"), "demo").unwrap_err();
        assert!(matches!(err, Error::Core(_)));
    }

    #[test]
    fn test_normalize_never_climbs_above_root() {
        assert_eq!(normalize(Utf8Path::new("/../../a/./b/..")), "/a");
    }
}
