//! Ranking - pure functions over already-scored candidates

use crate::types::{PullRequestCandidate, PullRequestDetails, SelectionResult};
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;

/// Initial best score; candidates below it are never selected
pub const SCORE_FLOOR: i64 = 0;

/// Combine approval and check score: approval doubles the check score
pub const fn composite_score(approved: bool, check_score: i64) -> i64 {
    if approved { check_score * 2 } else { check_score }
}

impl PullRequestCandidate {
    /// Candidate for an eligible PR with its composite score
    pub fn from_details(details: &PullRequestDetails, score: i64) -> Self {
        Self {
            number: details.number,
            head_sha: details.head_sha.clone(),
            base_ref: details.base_ref.clone(),
            rebaseable: details.rebaseable,
            is_same_repo_head: details.is_same_repo_head(),
            score,
        }
    }
}

/// Keep the candidates that share the highest score
///
/// Starts from [`SCORE_FLOOR`]: a candidate equal to the running best joins
/// the tie, a higher one replaces it. Input order is kept among ties.
pub fn rank_candidates(
    scored: impl IntoIterator<Item = PullRequestCandidate>,
) -> SelectionResult {
    let mut best_score = SCORE_FLOOR;
    let mut candidates = Vec::new();

    for candidate in scored {
        match candidate.score.cmp(&best_score) {
            Ordering::Equal => candidates.push(candidate),
            Ordering::Greater => {
                best_score = candidate.score;
                candidates = vec![candidate];
            }
            Ordering::Less => {}
        }
    }

    SelectionResult {
        best_score,
        candidates,
    }
}

/// Uniform pick among the tied candidates
pub fn choose_candidate<'a, R: Rng + ?Sized>(
    result: &'a SelectionResult,
    rng: &mut R,
) -> Option<&'a PullRequestCandidate> {
    result.candidates.choose(rng)
}
