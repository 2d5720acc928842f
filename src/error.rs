//! Error types for merge-candidate

use thiserror::Error;

/// Errors raised while talking to GitHub or interpreting its data
#[derive(Debug, Error)]
pub enum Error {
    /// Any failure reported by the GitHub API (auth, rate limit, 5xx, bad payload)
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// A file or resource lookup returned 404
    #[error("not found: {0}")]
    NotFound(String),

    /// A request did not complete within the configured timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A commit message the parser could not decompose
    #[error("failed to parse commit message: {0}")]
    CommitParse(String),

    /// A CODEOWNERS file that could not be read as text
    #[error("invalid CODEOWNERS file {path}: {reason}")]
    Codeowners {
        /// Repository path of the offending file
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// No usable GitHub token
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid or unreadable settings
    #[error("configuration error: {0}")]
    Config(String),

    /// Invariant violation inside this crate
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
