//! Choosing which upstream commit to sync from.

use crate::client::GithubClient;
use crate::error::{Result, SyncError};
use std::fmt;
use tracing::{debug, info};

/// Branch used when neither a release nor a tag can be found.
pub const DEFAULT_BRANCH: &str = "main";

/// What the operator asked to sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefSelector {
    /// An exact commit
    Sha(String),
    /// A release tag
    Tag(String),
    /// A branch, tag or other ref
    Ref(String),
    /// Latest release, else newest tag, else the default branch
    Latest,
}

impl RefSelector {
    /// Pick a selector from optional flags. `sha` wins over `tag`, which
    /// wins over `reference`. Empty flags count as absent.
    ///
    /// # Errors
    /// Returns error if a chosen flag holds only whitespace.
    pub fn from_flags(
        sha: Option<&str>,
        tag: Option<&str>,
        reference: Option<&str>,
    ) -> Result<Self> {
        let candidates: [(&str, Option<&str>, fn(String) -> Self); 3] = [
            ("--sha", sha, Self::Sha),
            ("--tag", tag, Self::Tag),
            ("--ref", reference, Self::Ref),
        ];

        for (flag, value, build) in candidates {
            let Some(value) = value.filter(|v| !v.is_empty()) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                return Err(SyncError::InvalidArgument(format!("{flag} cannot be blank")));
            }
            return Ok(build(value.to_string()));
        }

        Ok(Self::Latest)
    }
}

/// How a resolved ref was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// Commit SHA
    Sha,
    /// Tag
    Tag,
    /// Branch or other ref
    Ref,
}

impl RefKind {
    /// Label used in metadata and reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha => "sha",
            Self::Tag => "tag",
            Self::Ref => "ref",
        }
    }
}

/// An upstream ref pinned to a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    /// The ref as selected
    pub name: String,
    /// How it was selected
    pub kind: RefKind,
    /// Commit it points to
    pub sha: String,
}

impl ResolvedRef {
    /// `kind:name`, as stored in `UPSTREAM.json`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.name)
    }
}

impl fmt::Display for ResolvedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.sha)
    }
}

/// Pin a selector to a commit.
pub async fn resolve(client: &GithubClient, selector: &RefSelector) -> Result<ResolvedRef> {
    let resolved = match selector {
        RefSelector::Sha(sha) => ResolvedRef {
            name: sha.clone(),
            kind: RefKind::Sha,
            sha: sha.clone(),
        },
        RefSelector::Tag(tag) => pinned(client, tag, RefKind::Tag).await?,
        RefSelector::Ref(reference) => pinned(client, reference, RefKind::Ref).await?,
        RefSelector::Latest => resolve_latest(client).await?,
    };

    info!(upstream_ref = %resolved.label(), sha = %resolved.sha, "resolved upstream ref");
    Ok(resolved)
}

async fn pinned(client: &GithubClient, name: &str, kind: RefKind) -> Result<ResolvedRef> {
    let sha = client.resolve_commit(name).await?;
    Ok(ResolvedRef {
        name: name.to_string(),
        kind,
        sha,
    })
}

async fn resolve_latest(client: &GithubClient) -> Result<ResolvedRef> {
    match latest_release(client).await {
        Ok(Some(resolved)) => return Ok(resolved),
        Ok(None) => {}
        Err(e) if e.is_not_found_or_forbidden() => {
            debug!(error = %e, "no latest release, trying tags");
        }
        Err(e) => return Err(e),
    }

    match newest_tag(client).await {
        Ok(Some(resolved)) => return Ok(resolved),
        Ok(None) => {}
        Err(e) if e.is_not_found_or_forbidden() => {
            debug!(error = %e, "no tags, falling back to {DEFAULT_BRANCH}");
        }
        Err(e) => return Err(e),
    }

    pinned(client, DEFAULT_BRANCH, RefKind::Ref).await
}

async fn latest_release(client: &GithubClient) -> Result<Option<ResolvedRef>> {
    match client.latest_release_tag().await? {
        Some(tag) => pinned(client, &tag, RefKind::Tag).await.map(Some),
        None => Ok(None),
    }
}

async fn newest_tag(client: &GithubClient) -> Result<Option<ResolvedRef>> {
    match client.first_tag().await? {
        Some(tag) => pinned(client, &tag, RefKind::Tag).await.map(Some),
        None => Ok(None),
    }
}
