//! Addon discovery from the addons directory.
//!
//! Candidates are `*.jar` files directly inside the directory. Entries that
//! fail to load are skipped so one broken archive cannot block an install.

use crate::addon::Addon;
use crate::error::{AddonLoadError, AddonResult};
use std::path::Path;
use tracing::{debug, info, warn};

/// Discover addon archives in a directory.
///
/// Each `*.jar` entry is loaded via [`Addon::load`]; candidates that fail to
/// load are logged and skipped. A missing directory yields an empty list.
/// The result is sorted by addon name.
pub fn discover_addons(dir: &Path) -> AddonResult<Vec<Addon>> {
    if !dir.exists() {
        debug!("Addons directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| {
        AddonLoadError::new(format!(
            "failed to read addons directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut addons = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) != Some("jar") {
            debug!("Skipping {:?}: not a jar", path);
            continue;
        }

        match Addon::load(&path) {
            Ok(addon) => {
                info!("Discovered addon: {} ({} bytes)", addon.name, addon.size);
                addons.push(addon);
            }
            Err(e) => {
                warn!("Skipping addon {:?}: {}", path, e);
            }
        }
    }

    addons.sort_by(|a, b| a.name.cmp(&b.name));
    info!("Discovered {} addon(s)", addons.len());
    Ok(addons)
}
