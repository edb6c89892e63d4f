//! # lumen-installer
//!
//! Command-line installer for the Lumen client.
//!
//! The installer is responsible for:
//! - Fetching the release feed and selecting a version
//! - Placing and verifying the client jar
//! - Writing the launcher profile
//! - Discovering and installing addons
//! - Remembering the operator's choices between runs
//!
//! ## Running
//!
//! ```bash
//! # Install the latest published release
//! cargo run --bin lumen-installer
//!
//! # Install a locally built client (jar already in place)
//! cargo run --bin lumen-installer -- local
//!
//! # With debug logging
//! RUST_LOG=debug cargo run --bin lumen-installer
//! ```

use anyhow::Result;
use lumen_installer::config::InstallerConfig;
use lumen_installer::log_buffer::LogBuffer;
use lumen_installer::manifest::{self, VersionManifest};
use lumen_installer::steps::{self, StepContext};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// File name of the crash log, placed next to the state file.
const CRASH_LOG_NAME: &str = "lumen-installer.log";

#[tokio::main]
async fn main() -> Result<()> {
    let log_buffer = LogBuffer::new();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_buffer.clone())
        .init();

    let local = std::env::args().nth(1).is_some_and(|arg| arg == "local");

    info!("Starting lumen-installer v{}", env!("CARGO_PKG_VERSION"));
    info!("Local = {}", local);

    let manifest_fetch = if local {
        None
    } else {
        info!("Loading release feed asynchronously...");
        Some(tokio::spawn(manifest::fetch_versions(
            manifest::DEFAULT_RELEASES_URL,
        )))
    };

    info!("Loading previous settings...");
    let mut config = load_previous_config();

    if local {
        config.version = Some(VersionManifest::local());
    }

    info!("Starting installer...");
    let mut ctx = StepContext::new(config);
    ctx.manifest_fetch = manifest_fetch;

    let pipeline = steps::build_pipeline(local);
    if let Err(e) = steps::run_pipeline(pipeline, &mut ctx).await {
        error!("Installer failed: {e:#}");
        flush_crash_log(&log_buffer);
        std::process::exit(if ctx.code != 0 { ctx.code } else { 1 });
    }

    Ok(())
}

/// Load the previous run's state, falling back to defaults.
fn load_previous_config() -> InstallerConfig {
    let path = match InstallerConfig::state_path() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to locate previous installer config: {e:#}");
            return InstallerConfig::default();
        }
    };

    if !path.exists() {
        return InstallerConfig::default();
    }

    match InstallerConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load previous installer config: {e:#}");
            InstallerConfig::default()
        }
    }
}

/// Write the captured log next to the state file so the operator can
/// attach it to a report.
fn flush_crash_log(buffer: &LogBuffer) {
    let Some(base) = directories::BaseDirs::new() else {
        return;
    };
    let path = base.home_dir().join(CRASH_LOG_NAME);
    match std::fs::write(&path, buffer.contents()) {
        Ok(()) => info!("Full installer log written to {}", path.display()),
        Err(e) => error!("Failed to write installer log: {}", e),
    }
}
