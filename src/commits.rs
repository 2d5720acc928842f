//! Linear commit history of a pull request

use crate::error::Result;
use crate::parser::MessageParser;
use crate::platform::PlatformService;
use crate::types::{Commit, ParsedCommit};
use tracing::debug;

/// Drop merge commits, keeping the remaining commits in order
pub fn filter_linear(commits: Vec<Commit>) -> Vec<Commit> {
    commits.into_iter().filter(|c| !c.is_merge()).collect()
}

/// All non-merge commits of a pull request, oldest first
pub async fn list_linear_commits(
    platform: &dyn PlatformService,
    pr_number: u64,
) -> Result<Vec<Commit>> {
    let commits = platform.list_pr_commits(pr_number).await?;
    let total = commits.len();
    let linear = filter_linear(commits);
    debug!(
        pr_number,
        total,
        merges = total - linear.len(),
        "filtered merge commits"
    );
    Ok(linear)
}

/// Parse every commit message; the first failure aborts the whole batch
pub fn parse_messages(
    commits: &[Commit],
    parser: &dyn MessageParser,
) -> Result<Vec<ParsedCommit>> {
    commits.iter().map(|c| parser.parse(&c.message)).collect()
}
