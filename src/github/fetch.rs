// src/github/fetch.rs
// =============================================================================
// Fetches repository metadata and the top-level file listing.
//
// Strategy:
// - RepositoryFetcher is the seam the workflow talks to, so tests can swap
//   in a mock instead of hitting the network
// - GitHubClient implements it against the REST API:
//     GET {api_base}/repos/{owner}/{name}           -> RepositoryDescriptor
//     GET {api_base}/repos/{owner}/{name}/contents  -> Vec<FileEntry>
//
// Status codes are translated into FetchError variants with messages that can
// be shown to the user as-is.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::automock;

use super::identifier::RepoId;
use super::types::{FileEntry, RepositoryDescriptor};
use crate::config::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Repository not found. Please check the URL and make sure the repository is public.")]
    NotFound,
    #[error("API rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("Failed to fetch repository: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Transport("request timed out".to_string())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

/// Where repository data comes from.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    /// Fetches the repository metadata.
    async fn fetch_descriptor(&self, repo: &RepoId) -> Result<RepositoryDescriptor, FetchError>;

    /// Fetches the top-level file listing. Callers decide what a failure
    /// means; the workflow treats it as an empty listing.
    async fn fetch_listing(&self, repo: &RepoId) -> Result<Vec<FileEntry>, FetchError>;
}

/// RepositoryFetcher backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    // Builds the reqwest client once; every request reuses its connection pool
    //
    // Parameters:
    //   settings: API base, optional token, timeout and user agent
    //
    // Returns: the client, or an error if the token is not a valid header value
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Headers sent with every request
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        if let Some(token) = &settings.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            // Keeps the token out of Debug output and logs
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repo: &RepoId) -> String {
        format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.name)
    }

    // GETs a URL and decodes the body as JSON once the status says success
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;

        if let Some(error) = classify_status(response.status()) {
            return Err(error);
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl RepositoryFetcher for GitHubClient {
    async fn fetch_descriptor(&self, repo: &RepoId) -> Result<RepositoryDescriptor, FetchError> {
        info!(%repo, "Fetching repository metadata");
        let body = self.get_json(&self.repo_url(repo)).await?;
        let descriptor: RepositoryDescriptor = serde_json::from_value(body)
            .map_err(|e| FetchError::Transport(format!("unexpected response: {}", e)))?;
        info!(repo = %descriptor.qualified_name, stars = descriptor.star_count, "Repository metadata fetched");
        Ok(descriptor)
    }

    async fn fetch_listing(&self, repo: &RepoId) -> Result<Vec<FileEntry>, FetchError> {
        info!(%repo, "Fetching repository contents");
        let url = format!("{}/contents", self.repo_url(repo));
        let body = self.get_json(&url).await?;
        let entries = listing_from_json(body);
        info!(%repo, count = entries.len(), "Repository contents fetched");
        Ok(entries)
    }
}

// Maps an HTTP status onto our error taxonomy.
// Returns None for success codes.
fn classify_status(status: StatusCode) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }
    let error = match status {
        StatusCode::NOT_FOUND => FetchError::NotFound,
        // GitHub answers an exhausted rate limit with 403
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
        other => FetchError::Transport(format!(
            "{} {}",
            other.as_u16(),
            other.canonical_reason().unwrap_or("Unknown")
        )),
    };
    Some(error)
}

// The contents endpoint returns an object instead of an array when the path
// is a single file. Anything that isn't an array counts as no entries.
fn listing_from_json(body: Value) -> Vec<FileEntry> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<FileEntry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed listing entry");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(StatusCode::OK), None);
        assert_eq!(classify_status(StatusCode::NOT_FOUND), Some(FetchError::NotFound));
        assert_eq!(classify_status(StatusCode::FORBIDDEN), Some(FetchError::RateLimited));
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            Some(FetchError::RateLimited)
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Some(FetchError::Transport("500 Internal Server Error".to_string()))
        );
    }

    #[test]
    fn test_listing_from_array() {
        let body = json!([
            { "name": "package.json", "type": "file" },
            { "name": "src", "type": "dir" },
            { "type": "file" }
        ]);
        let names: Vec<String> = listing_from_json(body).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["package.json", "src"]);
    }

    #[test]
    fn test_listing_from_non_array_is_empty() {
        assert!(listing_from_json(json!({ "message": "This repository is empty." })).is_empty());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::RateLimited.to_string(),
            "API rate limit exceeded. Please try again later."
        );
        assert_eq!(
            FetchError::Transport("502 Bad Gateway".into()).to_string(),
            "Failed to fetch repository: 502 Bad Gateway"
        );
    }

    #[test]
    fn test_client_builds_with_token() {
        let settings = Settings {
            token: Some("abc123".to_string()),
            ..Settings::default()
        };
        let client = GitHubClient::new(&settings).unwrap();
        assert_eq!(
            client.repo_url(&RepoId::new("alice", "demo")),
            "https://api.github.com/repos/alice/demo"
        );
    }
}
