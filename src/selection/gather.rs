//! Gathering - host calls and per-PR scoring

use crate::approval::{is_approved, last_submitted_at};
use crate::checks::{merge_check_results, score_checks};
use crate::codeowners::{Codeowners, resolve_codeowners};
use crate::error::Result;
use crate::platform::PlatformService;
use crate::selection::rank::composite_score;
use crate::types::{PullRequestCandidate, PullRequestDetails};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

/// Options for a selection run
#[derive(Debug, Clone)]
pub struct SelectOptions {
    /// Maximum number of PRs fetched at once
    pub concurrency: usize,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

/// Fetch reviews and checks for one eligible PR and compute its score
///
/// The four fetches run concurrently; the first failure cancels the rest.
pub async fn score_pull_request(
    platform: &dyn PlatformService,
    details: &PullRequestDetails,
    codeowners: &Codeowners,
) -> Result<PullRequestCandidate> {
    let (reviews, required, statuses, check_runs) = tokio::try_join!(
        platform.list_reviews(details.number),
        platform.required_status_checks(&details.base_ref),
        platform.combined_status(&details.head_sha),
        platform.list_check_runs(&details.head_sha),
    )?;

    let approved = is_approved(&reviews, codeowners);
    let found = merge_check_results(statuses, check_runs);
    let check_score = score_checks(&required, &found);
    let score = composite_score(approved, check_score);

    debug!(
        pr_number = details.number,
        approved,
        check_score,
        score,
        last_review_at = ?last_submitted_at(&reviews),
        "scored PR"
    );
    Ok(PullRequestCandidate::from_details(details, score))
}

/// Score every eligible open PR, in listing order
///
/// Any failed fetch aborts the run; no partial candidate set is returned.
/// CODEOWNERS is resolved once, after details and before any scoring.
pub async fn gather_candidates(
    platform: &dyn PlatformService,
    options: &SelectOptions,
) -> Result<Vec<PullRequestCandidate>> {
    let concurrency = options.concurrency.max(1);

    let numbers = platform.list_open_prs().await?;
    info!(count = numbers.len(), "listed open pull requests");

    let details: Vec<PullRequestDetails> = stream::iter(numbers)
        .map(|number| platform.get_pr_details(number))
        .buffered(concurrency)
        .try_collect()
        .await?;

    let codeowners = resolve_codeowners(platform).await?;

    let eligible: Vec<PullRequestDetails> = details
        .into_iter()
        .filter(|d| {
            let eligible = d.is_eligible();
            if !eligible {
                debug!(
                    pr_number = d.number,
                    rebaseable = d.rebaseable,
                    same_repo = d.is_same_repo_head(),
                    "skipping ineligible PR"
                );
            }
            eligible
        })
        .collect();
    info!(
        eligible = eligible.len(),
        owners = codeowners.len(),
        "scoring eligible pull requests"
    );

    stream::iter(&eligible)
        .map(|d| score_pull_request(platform, d, &codeowners))
        .buffered(concurrency)
        .try_collect()
        .await
}
