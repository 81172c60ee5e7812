use crate::domain::model::{RepositoryRecord, ScoredRepository, SearchQuery, SearchResult};
use crate::utils::error::{FetchError, ScoringError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    Sequential,
    #[default]
    Parallel,
}

pub trait ConfigProvider: Send + Sync {
    fn github_api_base_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn bind_address(&self) -> &str;
    fn scoring_mode(&self) -> ScoringMode;
}

/// Source of one page of repository search results.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<SearchResult<RepositoryRecord>, FetchError>;
}

pub trait Scorer: Send + Sync {
    /// Scores every record, preserving order and length.
    fn score(&self, records: Vec<RepositoryRecord>) -> Result<Vec<ScoredRepository>, ScoringError>;
}
