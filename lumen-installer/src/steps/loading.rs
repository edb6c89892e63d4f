//! Release feed loading.

use super::{InstallerStep, StepContext};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::info;

/// Joins the release feed prefetch started at launch.
pub struct LoadingStep;

#[async_trait]
impl InstallerStep for LoadingStep {
    fn name(&self) -> &'static str {
        "loading"
    }

    async fn run(&self, ctx: &mut StepContext) -> Result<()> {
        let handle = match ctx.manifest_fetch.take() {
            Some(handle) => handle,
            None => bail!("release feed fetch was not started"),
        };

        let published = handle
            .await
            .context("Release feed task failed")?
            .context("Failed to fetch the release feed")?;

        if published.is_empty() {
            bail!("release feed lists no versions");
        }

        info!("Loaded {} published version(s)", published.len());
        ctx.published = published;
        Ok(())
    }
}
