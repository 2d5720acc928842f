//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use merge_candidate::error::{Error, Result};
use merge_candidate::platform::PlatformService;
use merge_candidate::types::{CheckResult, Commit, PlatformConfig, PullRequestDetails, Review};
use std::collections::HashMap;
use std::sync::Mutex;

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall,
/// keeping canned responses in mutex-guarded maps.
///
/// Features:
/// - Configurable responses per PR, branch, SHA and file path
/// - Call tracking for verification
/// - Error injection for failure path testing
///
/// Unconfigured list endpoints return empty lists; unconfigured files are
/// reported as not found; unconfigured PR details are a host error.
pub struct MockPlatformService {
    config: PlatformConfig,
    open_prs: Mutex<Vec<u64>>,
    pr_details: Mutex<HashMap<u64, PullRequestDetails>>,
    commits: Mutex<HashMap<u64, Vec<Commit>>>,
    reviews: Mutex<HashMap<u64, Vec<Review>>>,
    required_checks: Mutex<HashMap<String, Vec<String>>>,
    statuses: Mutex<HashMap<String, Vec<CheckResult>>>,
    check_runs: Mutex<HashMap<String, Vec<CheckResult>>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    // Call tracking
    get_pr_details_calls: Mutex<Vec<u64>>,
    list_reviews_calls: Mutex<Vec<u64>>,
    get_file_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_details: Mutex<Option<u64>>,
    error_on_reviews: Mutex<Option<u64>>,
    error_on_check_runs: Mutex<Option<String>>,
    error_on_file: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            open_prs: Mutex::new(Vec::new()),
            pr_details: Mutex::new(HashMap::new()),
            commits: Mutex::new(HashMap::new()),
            reviews: Mutex::new(HashMap::new()),
            required_checks: Mutex::new(HashMap::new()),
            statuses: Mutex::new(HashMap::new()),
            check_runs: Mutex::new(HashMap::new()),
            files: Mutex::new(HashMap::new()),
            get_pr_details_calls: Mutex::new(Vec::new()),
            list_reviews_calls: Mutex::new(Vec::new()),
            get_file_calls: Mutex::new(Vec::new()),
            error_on_details: Mutex::new(None),
            error_on_reviews: Mutex::new(None),
            error_on_check_runs: Mutex::new(None),
            error_on_file: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `get_pr_details` fail for one PR
    pub fn fail_details(&self, pr_number: u64) {
        *self.error_on_details.lock().unwrap() = Some(pr_number);
    }

    /// Make `list_reviews` fail for one PR
    pub fn fail_reviews(&self, pr_number: u64) {
        *self.error_on_reviews.lock().unwrap() = Some(pr_number);
    }

    /// Make `list_check_runs` fail for one SHA
    pub fn fail_check_runs(&self, sha: &str) {
        *self.error_on_check_runs.lock().unwrap() = Some(sha.to_string());
    }

    /// Make `get_file_content` fail (not 404) for one path
    pub fn fail_file(&self, path: &str) {
        *self.error_on_file.lock().unwrap() = Some(path.to_string());
    }

    // === Response setup ===

    /// Register an open PR with its details
    pub fn add_open_pr(&self, details: PullRequestDetails) {
        self.open_prs.lock().unwrap().push(details.number);
        self.pr_details
            .lock()
            .unwrap()
            .insert(details.number, details);
    }

    /// Set the commits returned for a PR
    pub fn set_commits(&self, pr_number: u64, commits: Vec<Commit>) {
        self.commits.lock().unwrap().insert(pr_number, commits);
    }

    /// Set the reviews returned for a PR
    pub fn set_reviews(&self, pr_number: u64, reviews: Vec<Review>) {
        self.reviews.lock().unwrap().insert(pr_number, reviews);
    }

    /// Set the required contexts of a branch
    pub fn set_required_checks(&self, branch: &str, contexts: &[&str]) {
        self.required_checks.lock().unwrap().insert(
            branch.to_string(),
            contexts.iter().map(ToString::to_string).collect(),
        );
    }

    /// Set the combined status entries of a SHA
    pub fn set_statuses(&self, sha: &str, statuses: Vec<CheckResult>) {
        self.statuses
            .lock()
            .unwrap()
            .insert(sha.to_string(), statuses);
    }

    /// Set the check runs of a SHA
    pub fn set_check_runs(&self, sha: &str, runs: Vec<CheckResult>) {
        self.check_runs
            .lock()
            .unwrap()
            .insert(sha.to_string(), runs);
    }

    /// Put a file in the repository
    pub fn set_file(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.as_bytes().to_vec());
    }

    /// Put raw bytes in the repository
    pub fn set_file_bytes(&self, path: &str, content: Vec<u8>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content);
    }

    // === Call tracking accessors ===

    /// PR numbers passed to `get_pr_details`
    pub fn get_pr_details_calls(&self) -> Vec<u64> {
        self.get_pr_details_calls.lock().unwrap().clone()
    }

    /// PR numbers passed to `list_reviews`
    pub fn list_reviews_calls(&self) -> Vec<u64> {
        self.list_reviews_calls.lock().unwrap().clone()
    }

    /// Paths passed to `get_file_content`
    pub fn get_file_calls(&self) -> Vec<String> {
        self.get_file_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self) -> Result<Vec<u64>> {
        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        self.get_pr_details_calls.lock().unwrap().push(pr_number);
        if *self.error_on_details.lock().unwrap() == Some(pr_number) {
            return Err(Error::GitHubApi(format!("details for #{pr_number} failed")));
        }
        self.pr_details
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("no PR #{pr_number}")))
    }

    async fn list_pr_commits(&self, pr_number: u64) -> Result<Vec<Commit>> {
        Ok(self
            .commits
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        self.list_reviews_calls.lock().unwrap().push(pr_number);
        if *self.error_on_reviews.lock().unwrap() == Some(pr_number) {
            return Err(Error::GitHubApi(format!("reviews for #{pr_number} failed")));
        }
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn required_status_checks(&self, branch: &str) -> Result<Vec<String>> {
        Ok(self
            .required_checks
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .unwrap_or_default())
    }

    async fn combined_status(&self, sha: &str) -> Result<Vec<CheckResult>> {
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_check_runs(&self, sha: &str) -> Result<Vec<CheckResult>> {
        if self.error_on_check_runs.lock().unwrap().as_deref() == Some(sha) {
            return Err(Error::GitHubApi(format!("check runs for {sha} failed")));
        }
        Ok(self
            .check_runs
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_file_content(&self, path: &str) -> Result<Vec<u8>> {
        self.get_file_calls.lock().unwrap().push(path.to_string());
        if self.error_on_file.lock().unwrap().as_deref() == Some(path) {
            return Err(Error::GitHubApi(format!("HTTP 500 for {path}")));
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
