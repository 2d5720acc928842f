//! Shared command context for CLI commands

use merge_candidate::auth::get_github_auth;
use merge_candidate::config::Settings;
use merge_candidate::error::Result;
use merge_candidate::platform::{GitHubService, PlatformService};
use tracing::debug;

/// Shared context for CLI commands that talk to GitHub
///
/// Resolves the token and builds the service once; every command receives
/// the client explicitly through this struct.
pub struct CommandContext {
    /// Platform service bound to the target repository
    pub platform: Box<dyn PlatformService>,
    /// Effective settings
    pub settings: Settings,
}

impl CommandContext {
    /// Resolve auth and create the GitHub service for `owner/repo`
    pub async fn new(settings: &Settings, owner: String, repo: String) -> Result<Self> {
        let auth = get_github_auth().await?;
        debug!(source = ?auth.source, %owner, %repo, "creating GitHub service");

        let platform = GitHubService::new(&auth.token, owner, repo, settings)?;

        Ok(Self {
            platform: Box::new(platform),
            settings: settings.clone(),
        })
    }
}
