//! Shared utility functions for gostrap crates

use crate::error::{Error, Result};
use camino::Utf8PathBuf;
use std::path::PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over `dirs::home_dir()` so that an
/// overridden HOME (containers, test sandboxes) is respected.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::home_dir().ok_or(Error::HomeDirNotFound)
}

/// Convert a std path into a UTF-8 path
pub fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| Error::NonUtf8Path {
        path: p.to_string_lossy().into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_get_home_dir_from_env() {
        let previous = std::env::var("HOME").ok();
        std::env::set_var("HOME", "/tmp/gostrap-home");

        let home = get_home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/tmp/gostrap-home"));

        match previous {
            Some(value) => std::env::set_var("HOME", value),
            None => std::env::remove_var("HOME"),
        }
    }

    #[test]
    fn test_to_utf8_accepts_plain_path() {
        let path = to_utf8(PathBuf::from("/home/user/projects")).unwrap();
        assert_eq!(path.as_str(), "/home/user/projects");
    }
}
