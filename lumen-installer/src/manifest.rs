//! Launcher version manifests.
//!
//! The release feed is a JSON document listing every published client
//! version. It is fetched asynchronously at startup so the pipeline can
//! keep loading configuration while the request is in flight.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Default release feed endpoint.
pub const DEFAULT_RELEASES_URL: &str = "https://releases.lumenclient.dev/versions.json";

/// A published client version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionManifest {
    /// Version name shown to the operator.
    pub name: String,

    /// Build number; the highest build is the latest release.
    pub build: u32,

    /// Artifact coordinates (`group:name:version`).
    pub artifact: String,

    /// Download URL for the client jar; empty for local builds.
    #[serde(default)]
    pub url: String,

    /// blake3 hex digest of the jar; empty disables verification.
    #[serde(default)]
    pub checksum: String,

    /// Release notes.
    #[serde(default)]
    pub changelog: String,

    /// Jar size in bytes; 0 disables the size check.
    #[serde(default)]
    pub size: u64,

    /// Jar path relative to the libraries root.
    pub path: String,

    /// Tweak class recorded in the launcher profile.
    pub tweaker: String,

    /// Addon API level this build exposes.
    pub api_version: u32,
}

impl VersionManifest {
    /// Placeholder manifest for locally built clients.
    ///
    /// Carries no download URL, checksum, or size, so the jar is expected
    /// in place and verification is skipped.
    pub fn local() -> Self {
        Self {
            name: "LOCAL".to_string(),
            build: 0,
            artifact: "dev.lumenclient:Lumen:LOCAL".to_string(),
            url: String::new(),
            checksum: String::new(),
            changelog: String::new(),
            size: 0,
            path: "dev/lumenclient/Lumen/LOCAL/Lumen-LOCAL.jar".to_string(),
            tweaker: "dev.lumenclient.launch.LumenTweaker".to_string(),
            api_version: 1,
        }
    }

    /// Launcher profile id for this version.
    pub fn profile_id(&self) -> String {
        format!("Lumen-{}", self.name)
    }
}

/// Release feed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseFeed {
    pub versions: Vec<VersionManifest>,
}

/// Fetch the published versions from the release feed.
pub async fn fetch_versions(url: &str) -> Result<Vec<VersionManifest>, reqwest::Error> {
    info!("Fetching release feed from {}", url);
    let feed: ReleaseFeed = reqwest::get(url)
        .await?
        .error_for_status()?
        .json()
        .await?;
    info!("Release feed lists {} version(s)", feed.versions.len());
    Ok(feed.versions)
}

/// Pick the version to install.
///
/// The previously selected version wins when it is still published;
/// otherwise the highest build is chosen. Returns `None` when nothing is
/// published.
pub fn select_version(
    published: &[VersionManifest],
    previous: Option<&VersionManifest>,
) -> Option<VersionManifest> {
    if let Some(prev) = previous {
        if let Some(found) = published.iter().find(|v| v.name == prev.name) {
            return Some(found.clone());
        }
    }

    published.iter().max_by_key(|v| v.build).cloned()
}
