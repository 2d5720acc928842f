//! `select` command

use crate::cli::context::CommandContext;
use merge_candidate::error::{Error, Result};
use merge_candidate::selection::{SelectOptions, rank_open_prs, select_candidate};

/// Print the chosen candidate (or `null`), or the whole tie with `all`
pub async fn run_select(ctx: &CommandContext, all: bool) -> Result<()> {
    let options = SelectOptions {
        concurrency: ctx.settings.concurrency,
    };

    let rendered = if all {
        let result = rank_open_prs(ctx.platform.as_ref(), &options).await?;
        serde_json::to_string_pretty(&result)
    } else {
        let picked = select_candidate(ctx.platform.as_ref(), &options).await?;
        serde_json::to_string_pretty(&picked)
    };
    let json =
        rendered.map_err(|e| Error::Internal(format!("failed to serialize selection: {e}")))?;

    println!("{json}");
    Ok(())
}
