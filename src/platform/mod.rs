//! Platform service for GitHub
//!
//! Abstracts every host call the decision engine needs so that the engine
//! can be driven by a real GitHub client or an in-memory mock.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{CheckResult, Commit, PlatformConfig, PullRequestDetails, Review};
use async_trait::async_trait;

/// Host operations used by the extractor, resolver and selection engine
///
/// Every list-returning method exhausts all pages before returning; callers
/// never see a partial listing.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Numbers of all open pull requests, in the host's listing order
    async fn list_open_prs(&self) -> Result<Vec<u64>>;

    /// Head/base refs, SHAs, rebaseable flag and repository names of a PR
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails>;

    /// Commits of a PR, oldest first
    async fn list_pr_commits(&self, pr_number: u64) -> Result<Vec<Commit>>;

    /// Reviews of a PR in submission order
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>>;

    /// Status contexts required by the protection rule on `branch`
    async fn required_status_checks(&self, branch: &str) -> Result<Vec<String>>;

    /// Entries of the combined commit status for `sha`
    async fn combined_status(&self, sha: &str) -> Result<Vec<CheckResult>>;

    /// Check runs for `sha`, conclusion already normalized into a state
    async fn list_check_runs(&self, sha: &str) -> Result<Vec<CheckResult>>;

    /// Raw content of a file on the default branch
    ///
    /// Returns [`Error::NotFound`](crate::error::Error::NotFound) when the
    /// file does not exist; any other failure is a host error.
    async fn get_file_content(&self, path: &str) -> Result<Vec<u8>>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
