//! merge-candidate: pick a mergeable pull request from a GitHub repository
//!
//! The library holds the decision engine: CODEOWNERS resolution, approval
//! evaluation, required-check scoring and the tie-breaking candidate pick.
//! It also extracts the linear (merge-free) commit history of a pull request.

pub mod approval;
pub mod auth;
pub mod checks;
pub mod codeowners;
pub mod commits;
pub mod config;
pub mod error;
pub mod parser;
pub mod platform;
pub mod selection;
pub mod types;
