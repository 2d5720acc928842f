//! merge-candidate - pick a mergeable pull request and inspect linear history

mod cli;

use anstream::eprintln;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use merge_candidate::config::load_settings;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "merge-candidate")]
#[command(version)]
#[command(about = "Pick a mergeable pull request and inspect linear commit history", long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/merge-candidate/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub API base URL, for GitHub Enterprise
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RepoArgs {
    /// Repository owner
    #[arg(short, long)]
    owner: String,

    /// Repository name
    #[arg(short, long)]
    repo: String,
}

#[derive(Args)]
struct PrArgs {
    #[command(flatten)]
    repo: RepoArgs,

    /// Pull request number
    #[arg(short, long)]
    number: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SHA of every non-merge commit in a pull request
    Sha(PrArgs),

    /// Print the parsed message of every non-merge commit as JSON
    Parsed(PrArgs),

    /// Print the pull request to merge next as JSON (null if none)
    Select {
        #[command(flatten)]
        repo: RepoArgs,

        /// Print the best score and every tied candidate instead of one pick
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    cli::init_logging(args.verbose, args.log_json);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(api_url) = args.api_url {
        settings.api_url = Some(api_url);
    }

    match args.command {
        Commands::Sha(pr) => {
            let ctx = cli::CommandContext::new(&settings, pr.repo.owner, pr.repo.repo).await?;
            cli::run_sha(&ctx, pr.number)
                .await
                .with_context(|| format!("failed to list commits of PR #{}", pr.number))?;
        }
        Commands::Parsed(pr) => {
            let ctx = cli::CommandContext::new(&settings, pr.repo.owner, pr.repo.repo).await?;
            cli::run_parsed(&ctx, pr.number)
                .await
                .with_context(|| format!("failed to parse commits of PR #{}", pr.number))?;
        }
        Commands::Select { repo, all } => {
            let ctx = cli::CommandContext::new(&settings, repo.owner, repo.repo).await?;
            cli::run_select(&ctx, all)
                .await
                .context("failed to select a merge candidate")?;
        }
    }

    Ok(())
}
