//! Installer configuration and persisted state.
//!
//! The installer remembers the operator's previous choices in
//! `<home>/lumen-installer-state.json`. The file is loaded at startup
//! (falling back to defaults when missing or malformed) and written back
//! immediately before an installation starts.

use crate::manifest::VersionManifest;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the persisted state, placed in the home directory.
pub const STATE_FILE_NAME: &str = "lumen-installer-state.json";

/// Installer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstallerConfig {
    /// Target game directory. Platform default when unset.
    #[serde(default)]
    pub install_dir: Option<PathBuf>,

    /// Directory addon candidates are picked up from. `./addons` when unset.
    #[serde(default)]
    pub addons_dir: Option<PathBuf>,

    /// Memory the launcher profile is generated with, in megabytes.
    #[serde(default = "default_memory_mb")]
    pub memory_mb: u32,

    /// Names of the addons selected for install. Empty installs everything
    /// discovered.
    #[serde(default)]
    pub addons: Vec<String>,

    /// Selected release.
    #[serde(default)]
    pub version: Option<VersionManifest>,
}

fn default_memory_mb() -> u32 {
    2048
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            install_dir: None,
            addons_dir: None,
            memory_mb: default_memory_mb(),
            addons: Vec::new(),
            version: None,
        }
    }
}

impl InstallerConfig {
    /// Load the configuration from a state file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        let config: InstallerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

        Ok(config)
    }

    /// Save the configuration to a state file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize state")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write state file: {}", path.display()))?;
        Ok(())
    }

    /// Path of the state file in the home directory.
    pub fn state_path() -> Result<PathBuf> {
        let base = directories::BaseDirs::new().context("Failed to determine home directory")?;
        Ok(base.home_dir().join(STATE_FILE_NAME))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.memory_mb == 0 {
            anyhow::bail!("memory_mb must be greater than 0");
        }
        Ok(())
    }

    /// The install directory, falling back to the platform default.
    pub fn resolved_install_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.install_dir {
            return Ok(dir.clone());
        }
        default_install_dir()
    }

    /// The addons source directory, falling back to `./addons`.
    pub fn resolved_addons_dir(&self) -> PathBuf {
        match self.addons_dir {
            Some(ref dir) => dir.clone(),
            None => PathBuf::from("addons"),
        }
    }
}

/// Default game directory for the current platform.
pub fn default_install_dir() -> Result<PathBuf> {
    let base = directories::BaseDirs::new().context("Failed to determine home directory")?;

    let dir = if cfg!(target_os = "macos") {
        base.home_dir().join("Library/Application Support/minecraft")
    } else if cfg!(target_os = "windows") {
        base.data_dir().join(".minecraft")
    } else {
        base.home_dir().join(".minecraft")
    };

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = InstallerConfig::default();
        assert!(config.install_dir.is_none());
        assert!(config.addons_dir.is_none());
        assert_eq!(config.memory_mb, 2048);
        assert!(config.addons.is_empty());
        assert!(config.version.is_none());
    }

    #[test]
    fn test_load_valid_state() {
        let content = r#"
{
    "install_dir": "/games/minecraft",
    "memory_mb": 4096,
    "addons": ["zoom", "keystrokes"]
}
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = InstallerConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.install_dir, Some(PathBuf::from("/games/minecraft")));
        assert_eq!(config.memory_mb, 4096);
        assert_eq!(config.addons, vec!["zoom", "keystrokes"]);
        assert!(config.version.is_none());
    }

    #[test]
    fn test_load_minimal_state() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{}").unwrap();

        let config = InstallerConfig::load(temp_file.path()).unwrap();
        assert_eq!(config, InstallerConfig::default());
    }

    #[test]
    fn test_load_malformed_state() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ not json").unwrap();

        assert!(InstallerConfig::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut config = InstallerConfig::default();
        config.install_dir = Some(PathBuf::from("/tmp/mc"));
        config.memory_mb = 3072;
        config.addons = vec!["zoom".to_string()];
        config.version = Some(VersionManifest::local());

        let temp_file = NamedTempFile::new().unwrap();
        config.save(temp_file.path()).unwrap();

        let loaded = InstallerConfig::load(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_default() {
        assert!(InstallerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_memory() {
        let mut config = InstallerConfig::default();
        config.memory_mb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolved_addons_dir_default() {
        let config = InstallerConfig::default();
        assert_eq!(config.resolved_addons_dir(), PathBuf::from("addons"));
    }

    #[test]
    fn test_resolved_addons_dir_custom() {
        let mut config = InstallerConfig::default();
        config.addons_dir = Some(PathBuf::from("/srv/addons"));
        assert_eq!(config.resolved_addons_dir(), PathBuf::from("/srv/addons"));
    }

    #[test]
    fn test_resolved_install_dir_custom() {
        let mut config = InstallerConfig::default();
        config.install_dir = Some(PathBuf::from("/games/mc"));
        assert_eq!(
            config.resolved_install_dir().unwrap(),
            PathBuf::from("/games/mc")
        );
    }
}
