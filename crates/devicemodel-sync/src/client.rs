//! GitHub access for the sync job.

use crate::error::{Result, SyncError};
use devicemodel_core::SyncConfig;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// HTTP client for the upstream repository's API and raw files.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: String,
    raw_base: String,
    repo: String,
    token: Option<String>,
    retries: u32,
    initial_backoff: Duration,
}

#[derive(Deserialize)]
struct Release {
    #[serde(default)]
    tag_name: String,
}

#[derive(Deserialize)]
struct Tag {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct Commit {
    #[serde(default)]
    sha: String,
}

impl GithubClient {
    /// Build a client from sync settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &SyncConfig, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.max_time_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|source| SyncError::Http {
                url: config.api_base.clone(),
                source,
            })?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            raw_base: config.raw_base.trim_end_matches('/').to_string(),
            repo: config.upstream_repo.clone(),
            token: token.filter(|t| !t.trim().is_empty()),
            retries: config.retries.max(1),
            initial_backoff: Duration::from_secs(1),
        })
    }

    /// Override the first retry delay.
    #[must_use]
    pub fn with_initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = delay;
        self
    }

    /// The upstream repository, `owner/name`.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Tag of the latest published release, if any.
    pub async fn latest_release_tag(&self) -> Result<Option<String>> {
        let release: Release = self
            .api_json(&format!("/repos/{}/releases/latest", self.repo))
            .await?;
        Ok(non_empty(release.tag_name))
    }

    /// The most recent tag, if any.
    pub async fn first_tag(&self) -> Result<Option<String>> {
        let tags: Vec<Tag> = self
            .api_json(&format!("/repos/{}/tags?per_page=1", self.repo))
            .await?;
        Ok(tags.into_iter().next().and_then(|tag| non_empty(tag.name)))
    }

    /// Commit SHA a branch, tag or SHA points to.
    pub async fn resolve_commit(&self, reference: &str) -> Result<String> {
        let commit: Commit = self
            .api_json(&format!(
                "/repos/{}/commits/{}",
                self.repo,
                urlencoding::encode(reference)
            ))
            .await?;

        non_empty(commit.sha).ok_or_else(|| {
            SyncError::RefResolution(format!("no commit SHA for ref={reference}"))
        })
    }

    /// Download a file from the repository at a ref.
    pub async fn download_raw(&self, reference: &str, path: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/{}/{}/{}",
            self.raw_base,
            self.repo,
            urlencoding::encode(reference),
            path
        );
        self.get_with_retry(&url, false).await
    }

    async fn api_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_base, path);
        let body = self.get_with_retry(&url, true).await?;
        serde_json::from_slice(&body).map_err(|source| SyncError::Json { url, source })
    }

    /// GET with exponential backoff. Transport errors, 429 and 5xx are
    /// retried; other statuses fail at once.
    async fn get_with_retry(&self, url: &str, api: bool) -> Result<Vec<u8>> {
        let mut delay = self.initial_backoff;
        let mut attempt = 1;

        loop {
            match self.get_once(url, api).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retries && is_retryable(&e) => {
                    warn!(url, attempt, error = %e, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_BACKOFF);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &str, api: bool) -> Result<Vec<u8>> {
        debug!(url, "GET");
        let mut request = self.http.get(url);
        if api {
            request = request.header(reqwest::header::ACCEPT, "application/vnd.github+json");
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }
        }

        let response = request.send().await.map_err(|source| SyncError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| SyncError::Http {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}

fn is_retryable(error: &SyncError) -> bool {
    match error {
        SyncError::Http { .. } => true,
        SyncError::Status { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
        }
        _ => false,
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
