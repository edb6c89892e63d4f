//! Release selection.

use super::{InstallerStep, StepContext};
use crate::manifest::select_version;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

/// Selects the release to install from the published versions.
pub struct VersionStep;

#[async_trait]
impl InstallerStep for VersionStep {
    fn name(&self) -> &'static str {
        "version"
    }

    async fn run(&self, ctx: &mut StepContext) -> Result<()> {
        let selected = select_version(&ctx.published, ctx.config.version.as_ref())
            .context("No installable version published")?;

        info!("Selected {} build {}", selected.name, selected.build);
        ctx.config.version = Some(selected);
        Ok(())
    }
}
