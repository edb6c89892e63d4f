//! Addon discovery and selection.

use super::{InstallerStep, StepContext};
use anyhow::Result;
use async_trait::async_trait;
use lumen_addons::discover_addons;
use tracing::{info, warn};

/// Discovers addon candidates and prunes stale selections.
pub struct AddonsStep;

#[async_trait]
impl InstallerStep for AddonsStep {
    fn name(&self) -> &'static str {
        "addons"
    }

    async fn run(&self, ctx: &mut StepContext) -> Result<()> {
        let dir = ctx.config.resolved_addons_dir();
        let discovered = discover_addons(&dir)?;

        if discovered.is_empty() {
            info!("No addons discovered in {}", dir.display());
        }

        // Drop previously selected addons that are no longer present.
        for name in &ctx.config.addons {
            if !discovered.iter().any(|a| &a.name == name) {
                warn!("Previously selected addon is missing: {}", name);
            }
        }
        ctx.config
            .addons
            .retain(|name| discovered.iter().any(|a| &a.name == name));

        ctx.discovered = discovered;
        Ok(())
    }
}
