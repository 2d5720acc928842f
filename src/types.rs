//! Core types for merge-candidate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit on a pull request, as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit SHA (hex)
    pub sha: String,
    /// Number of parents; more than one means a merge commit
    pub parent_count: usize,
    /// Full commit message
    pub message: String,
}

impl Commit {
    /// Whether this commit merges two or more lines of history
    pub const fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

/// A footer line such as `Change-type: patch` or `Closes #12`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// Footer token (`Change-type`, `BREAKING CHANGE`, ...)
    pub token: String,
    /// Footer value, continuation lines joined with `\n`
    pub value: String,
}

/// Structured decomposition of a commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// First line of the message
    pub header: String,
    /// Change type (`feat`, `fix`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional scope in parentheses
    pub scope: Option<String>,
    /// Text after the colon in the header
    pub subject: String,
    /// Free-form paragraphs between header and footers
    pub body: Option<String>,
    /// Trailing `token: value` lines
    pub footers: Vec<Footer>,
    /// Marked as a breaking change via `!` or a footer
    pub breaking: bool,
}

/// State of a submitted review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    /// Reviewer approved the changes
    Approved,
    /// Reviewer asked for changes
    ChangesRequested,
    /// Reviewer left comments only
    Commented,
    /// Review was dismissed
    Dismissed,
    /// Review not yet submitted
    Pending,
    /// Any state the host adds later
    Other,
}

/// A review on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Login of the reviewer
    pub author_login: String,
    /// Review state
    pub state: ReviewState,
    /// Position in the host's listing (0 = oldest)
    pub submitted_order: usize,
    /// Submission time, when the host reports one
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Normalized state of one check context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// Passed
    Success,
    /// Still running or queued
    Pending,
    /// Finished without success
    Failure,
    /// Reported without any usable state
    Missing,
}

/// One check context result, from either a commit status or a check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Status context or check run name
    pub context: String,
    /// Normalized state
    pub state: CheckState,
}

impl CheckResult {
    /// Build a result for `context`
    pub fn new(context: impl Into<String>, state: CheckState) -> Self {
        Self {
            context: context.into(),
            state,
        }
    }
}

/// Full pull request detail needed for eligibility and scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// Head commit SHA
    pub head_sha: String,
    /// Base branch name
    pub base_ref: String,
    /// Host says the PR can be rebased cleanly (`false` while unknown)
    pub rebaseable: bool,
    /// `owner/name` of the head repository, `None` if it was deleted
    pub head_repo_full_name: Option<String>,
    /// `owner/name` of the base repository
    pub base_repo_full_name: Option<String>,
}

impl PullRequestDetails {
    /// Whether head and base live in the same repository (i.e. not a fork)
    pub fn is_same_repo_head(&self) -> bool {
        match (&self.head_repo_full_name, &self.base_repo_full_name) {
            (Some(head), Some(base)) => head.eq_ignore_ascii_case(base),
            _ => false,
        }
    }

    /// Whether the PR may enter the ranking at all
    pub fn is_eligible(&self) -> bool {
        self.rebaseable && self.is_same_repo_head()
    }
}

/// A scored, eligible pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestCandidate {
    /// PR number
    pub number: u64,
    /// Head commit SHA
    pub head_sha: String,
    /// Base branch name
    pub base_ref: String,
    /// Always `true` for candidates
    pub rebaseable: bool,
    /// Always `true` for candidates
    pub is_same_repo_head: bool,
    /// Composite score
    pub score: i64,
}

/// All candidates sharing the best composite score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Highest composite score seen (0 when nothing reached the floor)
    pub best_score: i64,
    /// Candidates with `score == best_score`, in listing order
    pub candidates: Vec<PullRequestCandidate>,
}

/// Repository the service is bound to
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// API base URL (None for api.github.com)
    pub api_url: Option<String>,
}
