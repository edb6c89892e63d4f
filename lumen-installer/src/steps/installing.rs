//! The installation step.

use super::{InstallerStep, StepContext};
use crate::callbacks::InstallEvent;
use crate::config::InstallerConfig;
use crate::install::Installer;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{error, info};

/// Persists the state and runs the install engine.
pub struct InstallingStep;

#[async_trait]
impl InstallerStep for InstallingStep {
    fn name(&self) -> &'static str {
        "installing"
    }

    async fn run(&self, ctx: &mut StepContext) -> Result<()> {
        // State is written before the install so a failed run still
        // remembers the operator's choices.
        match InstallerConfig::state_path() {
            Ok(path) => {
                if let Err(e) = ctx.config.save(&path) {
                    error!("Failed to save current configuration: {e:#}");
                }
            }
            Err(e) => error!("Failed to save current configuration: {e:#}"),
        }

        for addon in &ctx.discovered {
            info!("Addon candidate: {} ({} bytes)", addon.name, addon.size);
        }

        info!("Starting installation...");
        let mut installer = Installer::new(ctx.config.clone(), |event: &InstallEvent| {
            match event {
                InstallEvent::Status { phase, .. } => {
                    println!("[{}] {}", phase.as_str(), event.message());
                }
                InstallEvent::Error { .. } => error!(
                    "Unexpected error occurred during installation: {}",
                    event.message()
                ),
            }
        });

        let result = installer.install().await;
        ctx.code = installer.code();

        match result {
            Ok(()) => {
                info!("Installation finished with code {}", installer.code());
                println!("Installation success");
                Ok(())
            }
            Err(e) => Err(e).context("Installation failed"),
        }
    }
}
