//! Integration tests for the addon runtime.
//!
//! These tests cover:
//! - Addon discovery from a directory
//! - Archive validation during load
//! - Load failure messages surviving propagation

use lumen_addons::addon::ZIP_MAGIC;
use lumen_addons::{discover_addons, Addon, AddonLoadError, AddonResult};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ==============================================================================
// Test Fixture Helpers
// ==============================================================================

/// Create a valid addon archive in `dir`.
fn create_addon(dir: &Path, name: &str, payload: &[u8]) -> PathBuf {
    let path = dir.join(format!("{name}.jar"));
    let mut bytes = ZIP_MAGIC.to_vec();
    bytes.extend_from_slice(payload);
    std::fs::write(&path, bytes).unwrap();
    path
}

// ==============================================================================
// Discovery Tests
// ==============================================================================

#[test]
fn test_discover_and_load() {
    let temp_dir = TempDir::new().unwrap();
    create_addon(temp_dir.path(), "keystrokes", b"aaaa");
    create_addon(temp_dir.path(), "perspective", b"bbbbbb");

    let discovered = discover_addons(temp_dir.path()).unwrap();
    assert_eq!(discovered.len(), 2);
    assert_eq!(discovered[0].name, "keystrokes");
    assert_eq!(discovered[1].name, "perspective");

    // Every discovered addon can be re-loaded from its recorded path.
    for addon in &discovered {
        let reloaded = Addon::load(&addon.path).unwrap();
        assert_eq!(reloaded.name, addon.name);
        assert_eq!(reloaded.size, addon.size);
    }
}

#[test]
fn test_discovery_survives_one_bad_archive() {
    let temp_dir = TempDir::new().unwrap();
    create_addon(temp_dir.path(), "fine", b"data");
    std::fs::write(temp_dir.path().join("corrupt.jar"), b"garbage").unwrap();

    let discovered = discover_addons(temp_dir.path()).unwrap();
    assert_eq!(discovered.len(), 1);
    assert_eq!(discovered[0].name, "fine");
}

// ==============================================================================
// Failure Propagation Tests
// ==============================================================================

fn load_through_boundary(path: &Path) -> AddonResult<Addon> {
    // An intermediate frame, as a caller deeper in an install pipeline
    // would have.
    let addon = Addon::load(path)?;
    Ok(addon)
}

#[test]
fn test_load_failure_message_survives_propagation() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("ghost.jar");

    let direct = Addon::load(&missing).unwrap_err();
    let propagated = load_through_boundary(&missing).unwrap_err();
    assert_eq!(direct.message(), propagated.message());
    assert_eq!(propagated.to_string(), propagated.message());
}

#[test]
fn test_constructed_error_round_trip() {
    let err = AddonLoadError::new("missing manifest file");
    assert_eq!(err.message(), "missing manifest file");

    let err = AddonLoadError::new("");
    assert_eq!(err.message(), "");

    let msg = "line one\nline two — café";
    let err = AddonLoadError::new(msg);
    assert_eq!(err.message(), msg);
}
