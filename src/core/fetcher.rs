use crate::domain::model::{RepositoryRecord, SearchQuery, SearchResult, PER_PAGE};
use crate::domain::ports::{ConfigProvider, RepositorySource};
use crate::utils::error::{FetchError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub const DEFAULT_GITHUB_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = concat!("repo-popularity/", env!("CARGO_PKG_VERSION"));

const GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct GitHubSearchResponse {
    total_count: u64,
    #[serde(default)]
    items: Vec<GitHubRepositoryItem>,
}

#[derive(Debug, Deserialize)]
struct GitHubRepositoryItem {
    full_name: String,
    stargazers_count: u64,
    forks_count: u64,
    updated_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    html_url: String,
}

impl GitHubRepositoryItem {
    fn into_record(self, status: StatusCode) -> std::result::Result<RepositoryRecord, FetchError> {
        if self.full_name.trim().is_empty() {
            return Err(FetchError::MalformedBody {
                status,
                message: format!("repository at {} has an empty full_name", self.html_url),
            });
        }

        Ok(RepositoryRecord {
            full_name: self.full_name,
            stars: self.stargazers_count,
            forks: self.forks_count,
            last_updated: self.updated_at,
            created_at: self.created_at,
            repository_url: self.html_url,
        })
    }
}

/// Client for the GitHub repository search endpoint.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.github_api_base_url(), config.user_agent())
    }

    /// Builds the search URL: repositories created after the date, in the language,
    /// most-starred first, one fixed-size page.
    pub fn search_url(&self, query: &SearchQuery) -> String {
        let language: String =
            url::form_urlencoded::byte_serialize(query.language.trim().as_bytes()).collect();

        format!(
            "{}/search/repositories?q=created:>{}+language:{}&sort=stars&order=desc&per_page={}&page={}",
            self.base_url,
            query.earliest_date.format("%Y-%m-%d"),
            language,
            PER_PAGE,
            query.page
        )
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch(
        &self,
        query: &SearchQuery,
    ) -> std::result::Result<SearchResult<RepositoryRecord>, FetchError> {
        tracing::info!(
            "Fetching repositories - Language: {}, Created After: {}, Page: {}",
            query.language,
            query.earliest_date,
            query.page
        );

        let url = self.search_url(query);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|source| {
                tracing::error!("Error calling GitHub API: {}", source);
                FetchError::Transport {
                    status: None,
                    source,
                }
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            tracing::error!("GitHub API request failed - Status: {}, URL: {}", status, url);
            return Err(FetchError::Status { status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| {
                tracing::error!("Error reading GitHub response body - Status: {}: {}", status, source);
                FetchError::Transport {
                    status: Some(status),
                    source,
                }
            })?;

        if body.is_empty() {
            tracing::error!("GitHub API returned an empty body - Status: {}, URL: {}", status, url);
            return Err(FetchError::EmptyBody { status });
        }

        let parsed: GitHubSearchResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::MalformedBody {
                status,
                message: e.to_string(),
            })?;

        if parsed.total_count == 0 {
            tracing::info!(
                "No repositories found for Language: {} after {}",
                query.language,
                query.earliest_date
            );
            return Ok(SearchResult::empty());
        }

        let mut items = parsed.items;
        if items.len() > PER_PAGE {
            tracing::warn!(
                "GitHub returned {} items for a page of {}; truncating",
                items.len(),
                PER_PAGE
            );
            items.truncate(PER_PAGE);
        }

        let repositories = items
            .into_iter()
            .map(|item| item.into_record(status))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::info!(
            "Fetched {} repositories from GitHub for page {}",
            repositories.len(),
            query.page
        );

        Ok(SearchResult::new(parsed.total_count, repositories))
    }
}
