//! Merge candidate selection
//!
//! Two-phase pattern:
//! 1. Gather - fetch PR details, CODEOWNERS, reviews and checks, score each
//!    eligible PR (effectful)
//! 2. Rank - keep the PRs sharing the best score and pick one uniformly at
//!    random (pure, testable)

mod gather;
mod rank;

pub use gather::{SelectOptions, gather_candidates, score_pull_request};
pub use rank::{SCORE_FLOOR, choose_candidate, composite_score, rank_candidates};

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{PullRequestCandidate, SelectionResult};
use tracing::info;

/// Score every eligible open PR and keep the best-scoring ones
pub async fn rank_open_prs(
    platform: &dyn PlatformService,
    options: &SelectOptions,
) -> Result<SelectionResult> {
    let scored = gather_candidates(platform, options).await?;
    let result = rank_candidates(scored);
    info!(
        best_score = result.best_score,
        tied = result.candidates.len(),
        "ranked merge candidates"
    );
    Ok(result)
}

/// Pick the PR to merge next, or `None` if no eligible PR reached the floor
pub async fn select_candidate(
    platform: &dyn PlatformService,
    options: &SelectOptions,
) -> Result<Option<PullRequestCandidate>> {
    let result = rank_open_prs(platform, options).await?;
    let picked = choose_candidate(&result, &mut rand::thread_rng()).cloned();
    match &picked {
        Some(candidate) => info!(pr_number = candidate.number, "selected merge candidate"),
        None => info!("no merge candidate"),
    }
    Ok(picked)
}
