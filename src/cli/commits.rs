//! `sha` and `parsed` commands

use crate::cli::context::CommandContext;
use merge_candidate::commits::{list_linear_commits, parse_messages};
use merge_candidate::error::{Error, Result};
use merge_candidate::parser::ConventionalParser;

/// Print one linear commit SHA per line
pub async fn run_sha(ctx: &CommandContext, pr_number: u64) -> Result<()> {
    let commits = list_linear_commits(ctx.platform.as_ref(), pr_number).await?;
    for commit in &commits {
        println!("{}", commit.sha);
    }
    Ok(())
}

/// Print the parsed linear commits as a JSON array
pub async fn run_parsed(ctx: &CommandContext, pr_number: u64) -> Result<()> {
    let commits = list_linear_commits(ctx.platform.as_ref(), pr_number).await?;
    let parsed = parse_messages(&commits, &ConventionalParser)?;
    let json = serde_json::to_string_pretty(&parsed)
        .map_err(|e| Error::Internal(format!("failed to serialize commits: {e}")))?;
    println!("{json}");
    Ok(())
}
