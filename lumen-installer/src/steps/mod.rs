//! The installer step pipeline.
//!
//! An install run is a fixed sequence of steps, each consuming and
//! enriching a shared [`StepContext`]. Steps run in order; the first
//! failure stops the pipeline.

use crate::config::InstallerConfig;
use crate::manifest::VersionManifest;
use anyhow::Result;
use async_trait::async_trait;
use lumen_addons::Addon;
use std::collections::VecDeque;
use tokio::task::JoinHandle;
use tracing::info;

pub mod addons;
pub mod installing;
pub mod loading;
pub mod settings;
pub mod version;

pub use addons::AddonsStep;
pub use installing::InstallingStep;
pub use loading::LoadingStep;
pub use settings::SettingsStep;
pub use version::VersionStep;

/// Shared state threaded through the pipeline.
pub struct StepContext {
    /// Installer configuration, updated as steps run.
    pub config: InstallerConfig,

    /// Release feed prefetch started at launch; joined by the loading step.
    pub manifest_fetch: Option<JoinHandle<Result<Vec<VersionManifest>, reqwest::Error>>>,

    /// Versions published on the release feed.
    pub published: Vec<VersionManifest>,

    /// Addons discovered in the addons directory.
    pub discovered: Vec<Addon>,

    /// Exit code reported by the install engine.
    pub code: i32,
}

impl StepContext {
    /// Create a context for a run.
    pub fn new(config: InstallerConfig) -> Self {
        Self {
            config,
            manifest_fetch: None,
            published: Vec::new(),
            discovered: Vec::new(),
            code: 0,
        }
    }
}

/// A single stage of the install pipeline.
#[async_trait]
pub trait InstallerStep: Send {
    /// Step name used in progress output.
    fn name(&self) -> &'static str;

    /// Run the step against the shared context.
    async fn run(&self, ctx: &mut StepContext) -> Result<()>;
}

/// Build the pipeline for a run.
///
/// Local builds skip the release feed entirely: the loading and version
/// steps are not queued, and the LOCAL manifest is pinned before the
/// pipeline starts.
pub fn build_pipeline(local: bool) -> VecDeque<Box<dyn InstallerStep>> {
    let mut steps: VecDeque<Box<dyn InstallerStep>> = VecDeque::new();
    if !local {
        steps.push_back(Box::new(LoadingStep));
    }
    steps.push_back(Box::new(SettingsStep));
    if !local {
        steps.push_back(Box::new(VersionStep));
    }
    steps.push_back(Box::new(AddonsStep));
    steps.push_back(Box::new(InstallingStep));
    steps
}

/// Run the pipeline to completion.
pub async fn run_pipeline(
    mut steps: VecDeque<Box<dyn InstallerStep>>,
    ctx: &mut StepContext,
) -> Result<()> {
    while let Some(step) = steps.pop_front() {
        info!("Step: {}", step.name());
        step.run(ctx).await?;
    }
    Ok(())
}
