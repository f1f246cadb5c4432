//! The deploy step runner.
//!
//! Each factory deployment is a named, tagged step with a stable id whose
//! numeric prefix establishes execution order. Steps run strictly
//! sequentially; a step whose id is already recorded in the registry is
//! skipped, so re-running the scripts never repeats a completed deployment.

use std::fmt::{self, Display};

use tracing::info;

use crate::{
    commands::{deploy_fixed_loot_shaman_summoner, deploy_nft_curator_shaman_summoner},
    deployments::Deployments,
    errors::ScriptError,
    types::DeployContext,
};

/// The deploy steps, one per summoner factory
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeployStep {
    /// Deploy the fixed loot shaman summoner factory
    FixedLootShamanSummoner,
    /// Deploy the NFT curator shaman summoner factory
    NftCuratorShamanSummoner,
}

impl DeployStep {
    /// The step's stable id; recorded in the registry to prevent
    /// re-execution, with the numeric prefix establishing run order
    pub const fn id(self) -> &'static str {
        match self {
            DeployStep::FixedLootShamanSummoner => "001_deploy_Summoner",
            DeployStep::NftCuratorShamanSummoner => "012_deploy_NFTCurratorSummoner",
        }
    }

    /// The tags the step is selectable by
    pub const fn tags(self) -> &'static [&'static str] {
        match self {
            DeployStep::FixedLootShamanSummoner => &["Factories", "FixedLootShamanSummoner"],
            DeployStep::NftCuratorShamanSummoner => &["Factories", "NFTCurratorSummoner"],
        }
    }

    /// Run the step
    pub async fn run<D: Deployments>(
        self,
        ctx: &mut DeployContext<'_, D>,
    ) -> Result<(), ScriptError> {
        match self {
            DeployStep::FixedLootShamanSummoner => deploy_fixed_loot_shaman_summoner(ctx).await,
            DeployStep::NftCuratorShamanSummoner => deploy_nft_curator_shaman_summoner(ctx).await,
        }
    }
}

impl Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// All deploy steps, in execution order
pub fn all_steps() -> Vec<DeployStep> {
    let mut steps = vec![
        DeployStep::FixedLootShamanSummoner,
        DeployStep::NftCuratorShamanSummoner,
    ];
    steps.sort_by_key(|step| step.id());
    steps
}

/// Run every step matching one of the given tags, in id order.
///
/// An empty tag list selects every step. Steps already recorded as executed
/// are skipped; each completed step is marked executed before the next one
/// starts.
pub async fn run_steps<D: Deployments>(
    ctx: &mut DeployContext<'_, D>,
    tags: &[String],
) -> Result<(), ScriptError> {
    for step in all_steps() {
        let selected = tags.is_empty()
            || step
                .tags()
                .iter()
                .any(|tag| tags.iter().any(|requested| requested == tag));
        if !selected {
            continue;
        }

        if ctx.deployments.is_executed(step.id()) {
            info!("Skipping {} (already executed)", step);
            continue;
        }

        step.run(ctx).await?;
        ctx.deployments.mark_executed(step.id())?;
    }

    Ok(())
}
