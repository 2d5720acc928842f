//! Required status check scoring
//!
//! GitHub reports CI results through two APIs: commit statuses (external
//! CI services) and check runs (GitHub Actions and apps). Both are folded
//! into [`CheckResult`]s and scored against the branch's required contexts.

use crate::types::{CheckResult, CheckState};
use std::collections::HashSet;

/// Normalize a commit status `state` (`success`, `pending`, `failure`, `error`)
pub fn status_state(state: &str) -> CheckState {
    match state {
        "success" => CheckState::Success,
        "pending" => CheckState::Pending,
        "failure" | "error" => CheckState::Failure,
        _ => CheckState::Missing,
    }
}

/// Normalize a check run: its `conclusion` becomes the state
///
/// Runs that have not concluded yet are pending. Every terminal conclusion
/// other than `success` (including `neutral` and `skipped`) is a failure.
pub fn check_run_state(status: &str, conclusion: Option<&str>) -> CheckState {
    match conclusion {
        Some("success") => CheckState::Success,
        Some(_) => CheckState::Failure,
        None if status == "completed" => CheckState::Missing,
        None => CheckState::Pending,
    }
}

/// Union of commit status entries and check run entries
///
/// Statuses come first, so a status wins over a check run with the same
/// context name during lookup.
pub fn merge_check_results(
    statuses: Vec<CheckResult>,
    check_runs: Vec<CheckResult>,
) -> Vec<CheckResult> {
    statuses.into_iter().chain(check_runs).collect()
}

/// Score value of a single required context
pub const fn state_score(state: Option<CheckState>) -> i64 {
    match state {
        Some(CheckState::Success) => 1,
        Some(CheckState::Pending) => 0,
        Some(CheckState::Failure | CheckState::Missing) | None => -1,
    }
}

/// Score `found` against the required contexts.
///
/// Each distinct required context contributes +1 on success, 0 while
/// pending, and -1 when failed or absent. Contexts that are not required
/// are ignored.
pub fn score_checks<S: AsRef<str>>(required: &[S], found: &[CheckResult]) -> i64 {
    let mut seen = HashSet::new();
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|context| seen.insert(*context))
        .map(|context| {
            let state = found
                .iter()
                .find(|result| result.context == context)
                .map(|result| result.state);
            state_score(state)
        })
        .sum()
}
