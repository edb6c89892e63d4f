//! The install engine.
//!
//! A single installation runs through fixed phases: prepare the target
//! directory layout, place the client jar, verify it against the manifest,
//! write the launcher profile, and install the selected addons. Progress
//! is reported through the caller's callback; the terminal outcome is also
//! available as an exit code via [`Installer::code`].

use crate::callbacks::{InstallEvent, Phase};
use crate::config::InstallerConfig;
use crate::manifest::VersionManifest;
use lumen_addons::{discover_addons, Addon, AddonLoadError};
use serde_json::json;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during installation.
#[derive(Error, Debug)]
pub enum InstallError {
    /// An addon failed to load. The message passes through unchanged.
    #[error(transparent)]
    AddonLoad(#[from] AddonLoadError),

    /// No version has been selected for install.
    #[error("No version selected for install")]
    NoVersion,

    /// The configuration is not usable by the engine.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The selected manifest is unusable.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// The client jar is not in place and the manifest has no download URL.
    #[error("Artifact missing and no download URL: {0}")]
    ArtifactMissing(String),

    /// The placed jar does not match the manifest.
    #[error("Artifact verification failed: {0}")]
    Verification(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for install operations.
pub type InstallResult<T> = std::result::Result<T, InstallError>;

/// The install engine.
pub struct Installer<F>
where
    F: Fn(&InstallEvent),
{
    config: InstallerConfig,
    callback: F,
    code: i32,
}

impl<F> Installer<F>
where
    F: Fn(&InstallEvent),
{
    /// Create an engine for one installation.
    pub fn new(config: InstallerConfig, callback: F) -> Self {
        Self {
            config,
            callback,
            code: 0,
        }
    }

    /// Exit code of the last install: 0 after success, 1 after failure.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Run the installation.
    ///
    /// On failure an `Error` event carrying the cause is reported before
    /// the error is returned.
    pub async fn install(&mut self) -> InstallResult<()> {
        match self.run().await {
            Ok(()) => {
                self.code = 0;
                Ok(())
            }
            Err(e) => {
                self.code = 1;
                self.emit(InstallEvent::error(e.to_string()));
                Err(e)
            }
        }
    }

    fn emit(&self, event: InstallEvent) {
        (self.callback)(&event);
    }

    fn status(&self, phase: Phase, message: impl Into<String>) {
        self.emit(InstallEvent::status(phase, message));
    }

    async fn run(&self) -> InstallResult<()> {
        let version = self
            .config
            .version
            .clone()
            .ok_or(InstallError::NoVersion)?;

        if version.path.is_empty() {
            return Err(InstallError::InvalidManifest(
                "manifest has no artifact path".to_string(),
            ));
        }

        let install_dir = self.config.install_dir.clone().ok_or_else(|| {
            InstallError::InvalidConfig("install directory not resolved".to_string())
        })?;

        self.status(
            Phase::Prepare,
            format!("Preparing {}", install_dir.display()),
        );
        let libraries_dir = install_dir.join("libraries");
        let versions_dir = install_dir.join("versions");
        let addons_dir = install_dir.join("addons");
        for dir in [&libraries_dir, &versions_dir, &addons_dir] {
            tokio::fs::create_dir_all(dir).await?;
        }

        let jar_path = libraries_dir.join(&version.path);
        if let Some(parent) = jar_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        if version.url.is_empty() {
            self.status(
                Phase::Download,
                format!("Using local build {}", version.name),
            );
            if !jar_path.exists() {
                return Err(InstallError::ArtifactMissing(version.path.clone()));
            }
        } else {
            self.status(
                Phase::Download,
                format!("Downloading {} build {}", version.name, version.build),
            );
            let bytes = reqwest::get(&version.url)
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            tokio::fs::write(&jar_path, &bytes).await?;
            info!("Downloaded {} bytes to {:?}", bytes.len(), jar_path);
        }

        self.status(Phase::Verify, format!("Verifying {}", version.name));
        verify_artifact(&jar_path, &version).await?;

        self.status(
            Phase::Profile,
            format!("Writing launcher profile {}", version.profile_id()),
        );
        write_profile(&versions_dir, &version, self.config.memory_mb).await?;

        self.install_addons(&addons_dir).await?;

        self.status(Phase::Done, "Installation finished");
        Ok(())
    }

    /// Load the selected addons and copy them into the target addons
    /// directory. A load failure aborts the install.
    async fn install_addons(&self, target: &Path) -> InstallResult<()> {
        let source = self.config.resolved_addons_dir();
        let discovered = discover_addons(&source)?;
        let selected = select_addons(discovered, &self.config.addons)?;

        if selected.is_empty() {
            self.status(Phase::Addons, "No addons to install");
            return Ok(());
        }

        for addon in &selected {
            self.status(Phase::Addons, format!("Installing addon {}", addon.name));
            // Re-validate: the archive may have changed since discovery.
            let addon = Addon::load(&addon.path)?;
            let destination = target.join(addon.file_name());
            tokio::fs::copy(&addon.path, &destination).await?;
            debug!("Copied {:?} to {:?}", addon.path, destination);
        }

        info!("Installed {} addon(s)", selected.len());
        Ok(())
    }
}

/// Resolve the configured addon selection against the discovered set.
///
/// An empty selection means everything discovered. A selected name with no
/// discovered addon is a load failure (the addon could not be located).
fn select_addons(
    discovered: Vec<Addon>,
    names: &[String],
) -> Result<Vec<Addon>, AddonLoadError> {
    if names.is_empty() {
        return Ok(discovered);
    }

    let mut selected = Vec::new();
    for name in names {
        match discovered.iter().find(|a| &a.name == name) {
            Some(addon) => selected.push(addon.clone()),
            None => {
                return Err(AddonLoadError::new(format!("addon not found: {name}")));
            }
        }
    }
    Ok(selected)
}

/// Check the placed jar against the manifest's size and checksum.
async fn verify_artifact(jar_path: &Path, version: &VersionManifest) -> InstallResult<()> {
    if version.size == 0 && version.checksum.is_empty() {
        debug!("Verification disabled for {}", version.name);
        return Ok(());
    }

    let bytes = tokio::fs::read(jar_path).await?;

    if version.size != 0 && bytes.len() as u64 != version.size {
        return Err(InstallError::Verification(format!(
            "size mismatch for {}: expected {} bytes, got {}",
            version.name,
            version.size,
            bytes.len()
        )));
    }

    if !version.checksum.is_empty() {
        let actual = blake3::hash(&bytes).to_hex().to_string();
        if !actual.eq_ignore_ascii_case(&version.checksum) {
            return Err(InstallError::Verification(format!(
                "checksum mismatch for {}: expected {}, got {}",
                version.name, version.checksum, actual
            )));
        }
    }

    Ok(())
}

/// Write the launcher profile for the installed version.
async fn write_profile(
    versions_dir: &Path,
    version: &VersionManifest,
    memory_mb: u32,
) -> InstallResult<()> {
    let profile_id = version.profile_id();
    let profile_dir = versions_dir.join(&profile_id);
    tokio::fs::create_dir_all(&profile_dir).await?;

    let profile = json!({
        "id": profile_id,
        "mainClass": "net.minecraft.launchwrapper.Launch",
        "minecraftArguments": format!("--tweakClass {}", version.tweaker),
        "jvmArguments": format!("-Xmx{}M", memory_mb),
        "libraries": [
            { "name": version.artifact }
        ],
        "apiVersion": version.api_version,
    });

    let profile_path = profile_dir.join(format!("{profile_id}.json"));
    tokio::fs::write(&profile_path, serde_json::to_vec_pretty(&profile)?).await?;
    info!("Wrote launcher profile to {:?}", profile_path);
    Ok(())
}
