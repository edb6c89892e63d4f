//! Addon archives and loading.

use crate::error::{AddonLoadError, AddonResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Magic bytes every addon archive must start with.
pub const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// A loadable addon archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addon {
    /// Addon name, derived from the archive's file stem.
    pub name: String,

    /// Path to the archive.
    pub path: PathBuf,

    /// Archive size in bytes.
    pub size: u64,
}

impl Addon {
    /// Load an addon from an archive path.
    ///
    /// Validates that `path` points at a readable, non-empty jar archive.
    /// Fails with an [`AddonLoadError`] describing the cause.
    pub fn load(path: &Path) -> AddonResult<Self> {
        if !path.exists() {
            return Err(AddonLoadError::new(format!(
                "addon file does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(AddonLoadError::new(format!(
                "addon is not a regular file: {}",
                path.display()
            )));
        }

        let metadata = path.metadata().map_err(|e| {
            AddonLoadError::new(format!("failed to stat addon {}: {}", path.display(), e))
        })?;

        if metadata.len() == 0 {
            return Err(AddonLoadError::new(format!(
                "addon archive is empty: {}",
                path.display()
            )));
        }

        let mut file = File::open(path).map_err(|e| {
            AddonLoadError::new(format!("failed to open addon {}: {}", path.display(), e))
        })?;

        let mut magic = [0u8; 4];
        file.read_exact(&mut magic).map_err(|e| {
            AddonLoadError::new(format!("failed to read addon {}: {}", path.display(), e))
        })?;

        if &magic != ZIP_MAGIC {
            return Err(AddonLoadError::new(format!(
                "not a jar archive: {}",
                path.display()
            )));
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                AddonLoadError::new(format!(
                    "addon file name is not valid UTF-8: {}",
                    path.display()
                ))
            })?;

        debug!("Loaded addon: {} ({} bytes)", name, metadata.len());

        Ok(Self {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    /// File name of the archive (`<name>.jar`).
    pub fn file_name(&self) -> String {
        format!("{}.jar", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_jar(dir: &Path, name: &str, payload: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut bytes = ZIP_MAGIC.to_vec();
        bytes.extend_from_slice(payload);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_load_addon() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_jar(temp_dir.path(), "chat-filter.jar", b"payload");

        let addon = Addon::load(&path).unwrap();
        assert_eq!(addon.name, "chat-filter");
        assert_eq!(addon.size, 11);
        assert_eq!(addon.path, path);
        assert_eq!(addon.file_name(), "chat-filter.jar");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.jar");

        let err = Addon::load(&path).unwrap_err();
        assert!(err.message().starts_with("addon file does not exist"));
    }

    #[test]
    fn test_load_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a-dir.jar");
        std::fs::create_dir(&path).unwrap();

        let err = Addon::load(&path).unwrap_err();
        assert!(err.message().starts_with("addon is not a regular file"));
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.jar");
        std::fs::write(&path, b"").unwrap();

        let err = Addon::load(&path).unwrap_err();
        assert!(err.message().starts_with("addon archive is empty"));
    }

    #[test]
    fn test_load_not_an_archive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("readme.jar");
        std::fs::write(&path, b"this is plain text").unwrap();

        let err = Addon::load(&path).unwrap_err();
        assert!(err.message().starts_with("not a jar archive"));
    }

    #[test]
    fn test_load_truncated_archive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tiny.jar");
        std::fs::write(&path, b"PK").unwrap();

        let err = Addon::load(&path).unwrap_err();
        assert!(err.message().starts_with("failed to read addon"));
    }

    #[test]
    fn test_load_unicode_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_jar(temp_dir.path(), "höhenkarte.jar", b"x");

        let addon = Addon::load(&path).unwrap();
        assert_eq!(addon.name, "höhenkarte");
    }
}
