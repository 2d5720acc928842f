//! GitHub platform service implementation

use crate::checks::{check_run_state, status_state};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CheckResult, Commit, PlatformConfig, PullRequestDetails, Review, ReviewState,
};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use octocrab::{Octocrab, Page};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Login GitHub shows for reviews whose author account was deleted
const GHOST_LOGIN: &str = "ghost";

// Raw REST payloads for the endpoints fetched with reqwest

#[derive(Deserialize)]
struct RawCommit {
    sha: String,
    #[serde(default)]
    parents: Vec<IgnoredAny>,
    commit: RawCommitBody,
}

#[derive(Deserialize)]
struct RawCommitBody {
    message: String,
}

#[derive(Deserialize)]
struct CombinedStatus {
    #[serde(default)]
    statuses: Vec<RawStatus>,
}

#[derive(Deserialize)]
struct RawStatus {
    context: String,
    state: String,
}

#[derive(Deserialize)]
struct CheckRunsPage {
    #[serde(default)]
    check_runs: Vec<RawCheckRun>,
}

#[derive(Deserialize)]
struct RawCheckRun {
    name: String,
    status: String,
    conclusion: Option<String>,
}

#[derive(Deserialize)]
struct RequiredStatusChecks {
    #[serde(default)]
    contexts: Vec<String>,
    #[serde(default)]
    checks: Vec<RequiredCheck>,
}

#[derive(Deserialize)]
struct RequiredCheck {
    context: String,
}

#[derive(Deserialize)]
struct FileContent {
    content: String,
    encoding: String,
}

/// GitHub service using octocrab and raw REST calls
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL without trailing slash
    api_base: String,
    timeout: Duration,
    per_page: u8,
}

impl GitHubService {
    /// Create a new GitHub service bound to `owner/repo`
    pub fn new(token: &str, owner: String, repo: String, settings: &Settings) -> Result<Self> {
        let raw_url = settings.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        let parsed = Url::parse(raw_url)
            .map_err(|e| Error::Config(format!("invalid api_url {raw_url:?}: {e}")))?;
        let api_base = parsed.as_str().trim_end_matches('/').to_string();

        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if settings.api_url.is_some() {
            builder = builder
                .base_uri(api_base.as_str())
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }
        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("merge-candidate")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                owner,
                repo,
                api_url: settings.api_url.clone(),
            },
            token: token.to_string(),
            http_client,
            api_base,
            timeout: settings.timeout(),
            per_page: settings.page_size(),
        })
    }

    /// Run one host request under the per-request timeout
    async fn timed<T, F>(&self, what: &str, request: F) -> Result<T>
    where
        T: Send,
        F: Future<Output = Result<T>> + Send,
    {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| Error::Timeout(format!("{what} after {:?}", self.timeout)))?
    }

    fn repo_path(&self, rest: &str) -> String {
        format!("/repos/{}/{}/{rest}", self.config.owner, self.config.repo)
    }

    /// GET a REST path and decode its JSON body; `Ok(None)` on 404
    async fn get_json<B: DeserializeOwned + Send>(
        &self,
        what: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<B>> {
        let url = format!("{}{path}", self.api_base);
        debug!(%url, "GET");

        self.timed(what, async {
            let response = self
                .http_client
                .get(&url)
                .query(query)
                .header("Authorization", format!("Bearer {}", self.token))
                .header("Accept", "application/vnd.github+json")
                .header("X-GitHub-Api-Version", "2022-11-28")
                .send()
                .await
                .map_err(|e| Error::GitHubApi(format!("Failed to fetch {what}: {e}")))?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                debug!(%url, "not found");
                return Ok(None);
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::GitHubApi(format!(
                    "Failed to fetch {what}: HTTP {status}: {body}"
                )));
            }

            response
                .json::<B>()
                .await
                .map(Some)
                .map_err(|e| Error::GitHubApi(format!("Failed to parse {what}: {e}")))
        })
        .await
    }

    /// Like [`get_json`](Self::get_json) but a 404 is a host error
    async fn get_required_json<B: DeserializeOwned + Send>(
        &self,
        what: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<B> {
        self.get_json(what, path, query)
            .await?
            .ok_or_else(|| Error::GitHubApi(format!("Failed to fetch {what}: HTTP 404")))
    }

    /// Fetch every page of a page-numbered REST listing
    ///
    /// Requests `page=1, 2, ...` and stops after the first short page, so the
    /// returned sequence is complete and in host order.
    async fn get_all_pages<B, T>(
        &self,
        what: &str,
        path: &str,
        into_items: fn(B) -> Vec<T>,
    ) -> Result<Vec<T>>
    where
        B: DeserializeOwned + Send,
        T: Send,
    {
        let page_size = usize::from(self.per_page);
        let mut items = Vec::new();

        for page in 1u32.. {
            let query = [
                ("per_page", self.per_page.to_string()),
                ("page", page.to_string()),
            ];
            let batch = into_items(self.get_required_json(what, path, &query).await?);
            let is_last = batch.len() < page_size;
            items.extend(batch);
            if is_last {
                break;
            }
        }

        debug!(what, count = items.len(), "fetched all pages");
        Ok(items)
    }

    /// Follow octocrab `next` links until the listing is exhausted
    async fn collect_pages<T>(&self, what: &str, first: Page<T>) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let mut page = first;
        let mut items = Vec::new();

        loop {
            items.append(&mut page.items);
            let next = self
                .timed(what, async {
                    self.client
                        .get_page::<T>(&page.next)
                        .await
                        .map_err(Error::from)
                })
                .await?;
            match next {
                Some(next_page) => page = next_page,
                None => break,
            }
        }

        debug!(what, count = items.len(), "fetched all pages");
        Ok(items)
    }
}

/// Helper to convert an octocrab PR to our `PullRequestDetails` type
fn details_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequestDetails {
    PullRequestDetails {
        number: pr.number,
        head_sha: pr.head.sha.clone(),
        base_ref: pr.base.ref_field.clone(),
        rebaseable: pr.rebaseable.unwrap_or(false),
        head_repo_full_name: pr.head.repo.as_ref().and_then(|r| r.full_name.clone()),
        base_repo_full_name: pr.base.repo.as_ref().and_then(|r| r.full_name.clone()),
    }
}

/// Helper to convert an octocrab review, keeping its listing position
fn review_from_octocrab(order: usize, review: &octocrab::models::pulls::Review) -> Review {
    use octocrab::models::pulls::ReviewState as Remote;

    let state = match review.state {
        Some(Remote::Approved) => ReviewState::Approved,
        Some(Remote::ChangesRequested) => ReviewState::ChangesRequested,
        Some(Remote::Commented) => ReviewState::Commented,
        Some(Remote::Dismissed) => ReviewState::Dismissed,
        Some(Remote::Pending) => ReviewState::Pending,
        // ReviewState is non-exhaustive
        Some(_) | None => ReviewState::Other,
    };

    Review {
        author_login: review
            .user
            .as_ref()
            .map_or_else(|| GHOST_LOGIN.to_string(), |u| u.login.clone()),
        state,
        submitted_order: order,
        submitted_at: review.submitted_at,
    }
}

fn commits_from_raw(raw: Vec<RawCommit>) -> Vec<Commit> {
    raw.into_iter()
        .map(|c| Commit {
            sha: c.sha,
            parent_count: c.parents.len(),
            message: c.commit.message,
        })
        .collect()
}

fn statuses_from_raw(status: CombinedStatus) -> Vec<CheckResult> {
    status
        .statuses
        .into_iter()
        .map(|s| CheckResult::new(s.context, status_state(&s.state)))
        .collect()
}

fn check_runs_from_raw(page: CheckRunsPage) -> Vec<CheckResult> {
    page.check_runs
        .into_iter()
        .map(|run| {
            let state = check_run_state(&run.status, run.conclusion.as_deref());
            CheckResult::new(run.name, state)
        })
        .collect()
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self) -> Result<Vec<u64>> {
        debug!("listing open PRs");
        let first = self
            .timed("open pull requests", async {
                self.client
                    .pulls(&self.config.owner, &self.config.repo)
                    .list()
                    .state(octocrab::params::State::Open)
                    .per_page(self.per_page)
                    .send()
                    .await
                    .map_err(Error::from)
            })
            .await?;

        let prs = self.collect_pages("open pull requests", first).await?;
        let numbers: Vec<u64> = prs.iter().map(|pr| pr.number).collect();
        debug!(count = numbers.len(), "listed open PRs");
        Ok(numbers)
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(pr_number, "getting PR details");
        let pr = self
            .timed("pull request details", async {
                self.client
                    .pulls(&self.config.owner, &self.config.repo)
                    .get(pr_number)
                    .await
                    .map_err(Error::from)
            })
            .await?;

        let details = details_from_octocrab(&pr);
        debug!(
            pr_number,
            rebaseable = details.rebaseable,
            same_repo = details.is_same_repo_head(),
            "got PR details"
        );
        Ok(details)
    }

    async fn list_pr_commits(&self, pr_number: u64) -> Result<Vec<Commit>> {
        debug!(pr_number, "listing PR commits");
        let path = self.repo_path(&format!("pulls/{pr_number}/commits"));
        self.get_all_pages("pull request commits", &path, commits_from_raw)
            .await
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        debug!(pr_number, "listing reviews");
        let first = self
            .timed("pull request reviews", async {
                self.client
                    .pulls(&self.config.owner, &self.config.repo)
                    .list_reviews(pr_number)
                    .per_page(self.per_page)
                    .send()
                    .await
                    .map_err(Error::from)
            })
            .await?;

        let reviews = self.collect_pages("pull request reviews", first).await?;
        Ok(reviews
            .iter()
            .enumerate()
            .map(|(order, r)| review_from_octocrab(order, r))
            .collect())
    }

    async fn required_status_checks(&self, branch: &str) -> Result<Vec<String>> {
        debug!(branch, "getting required status checks");
        let path = self.repo_path(&format!(
            "branches/{}/protection/required_status_checks",
            urlencoding::encode(branch)
        ));
        let required: RequiredStatusChecks = self
            .get_required_json("branch protection", &path, &[])
            .await?;

        let mut contexts: Vec<String> = Vec::new();
        for context in required
            .contexts
            .into_iter()
            .chain(required.checks.into_iter().map(|c| c.context))
        {
            if !contexts.contains(&context) {
                contexts.push(context);
            }
        }

        debug!(branch, count = contexts.len(), "got required status checks");
        Ok(contexts)
    }

    async fn combined_status(&self, sha: &str) -> Result<Vec<CheckResult>> {
        debug!(sha, "getting combined status");
        let path = self.repo_path(&format!("commits/{sha}/status"));
        self.get_all_pages("combined status", &path, statuses_from_raw)
            .await
    }

    async fn list_check_runs(&self, sha: &str) -> Result<Vec<CheckResult>> {
        debug!(sha, "listing check runs");
        let path = self.repo_path(&format!("commits/{sha}/check-runs"));
        self.get_all_pages("check runs", &path, check_runs_from_raw)
            .await
    }

    async fn get_file_content(&self, path: &str) -> Result<Vec<u8>> {
        debug!(path, "getting file content");
        let api_path = self.repo_path(&format!("contents/{path}"));
        let file: FileContent = self
            .get_json("file content", &api_path, &[])
            .await?
            .ok_or_else(|| Error::NotFound(path.to_string()))?;

        if file.encoding != "base64" {
            return Err(Error::GitHubApi(format!(
                "unsupported content encoding {:?} for {path}",
                file.encoding
            )));
        }

        // GitHub wraps base64 content at 60 columns
        let compact: String = file
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        STANDARD
            .decode(compact)
            .map_err(|e| Error::GitHubApi(format!("invalid base64 content for {path}: {e}")))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
