//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::MockPlatformService;

use merge_candidate::types::{
    CheckResult, CheckState, Commit, PlatformConfig, PullRequestDetails, Review, ReviewState,
};

/// Platform config for `test/repo`
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        api_url: None,
    }
}

/// Mock bound to `test/repo`
pub fn mock_platform() -> MockPlatformService {
    MockPlatformService::with_config(github_config())
}

/// Details of an eligible PR targeting `main` with head SHA `sha-{number}`
pub fn make_pr(number: u64) -> PullRequestDetails {
    PullRequestDetails {
        number,
        head_sha: format!("sha-{number}"),
        base_ref: "main".to_string(),
        rebaseable: true,
        head_repo_full_name: Some("test/repo".to_string()),
        base_repo_full_name: Some("test/repo".to_string()),
    }
}

/// Details of a PR opened from a fork
pub fn make_fork_pr(number: u64) -> PullRequestDetails {
    PullRequestDetails {
        head_repo_full_name: Some(format!("contributor{number}/repo")),
        ..make_pr(number)
    }
}

/// Build reviews in listing order from `(login, state)` pairs
pub fn make_reviews(entries: &[(&str, ReviewState)]) -> Vec<Review> {
    entries
        .iter()
        .enumerate()
        .map(|(order, (login, state))| Review {
            author_login: (*login).to_string(),
            state: *state,
            submitted_order: order,
            submitted_at: None,
        })
        .collect()
}

/// A commit with `parents` parents
pub fn make_commit(sha: &str, parents: usize, message: &str) -> Commit {
    Commit {
        sha: sha.to_string(),
        parent_count: parents,
        message: message.to_string(),
    }
}

/// Shorthand for a successful check
pub fn success(context: &str) -> CheckResult {
    CheckResult::new(context, CheckState::Success)
}

/// Shorthand for a pending check
pub fn pending(context: &str) -> CheckResult {
    CheckResult::new(context, CheckState::Pending)
}

/// Shorthand for a failed check
pub fn failure(context: &str) -> CheckResult {
    CheckResult::new(context, CheckState::Failure)
}
