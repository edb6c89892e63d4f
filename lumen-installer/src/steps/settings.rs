//! Configuration validation and directory resolution.

use super::{InstallerStep, StepContext};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Validates the configuration and pins the target directories.
pub struct SettingsStep;

#[async_trait]
impl InstallerStep for SettingsStep {
    fn name(&self) -> &'static str {
        "settings"
    }

    async fn run(&self, ctx: &mut StepContext) -> Result<()> {
        ctx.config.validate()?;

        let install_dir = ctx.config.resolved_install_dir()?;
        info!("Installing into {}", install_dir.display());
        ctx.config.install_dir = Some(install_dir);

        let addons_dir = ctx.config.resolved_addons_dir();
        info!("Addon candidates from {}", addons_dir.display());
        ctx.config.addons_dir = Some(addons_dir);

        Ok(())
    }
}
