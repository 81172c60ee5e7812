use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fixed page size requested from the search API.
pub const PER_PAGE: usize = 100;

/// A repository as returned by the upstream search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub full_name: String,
    pub stars: u64,
    pub forks: u64,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(rename = "createdDate")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "repositoryURL")]
    pub repository_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRepository {
    #[serde(flatten)]
    pub repository: RepositoryRecord,
    pub popularity_score: f64,
}

impl ScoredRepository {
    pub fn new(repository: RepositoryRecord, popularity_score: f64) -> Self {
        Self {
            repository,
            popularity_score,
        }
    }
}

/// One page of search results plus the upstream's total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    #[serde(rename = "totalNumberOfRepositories")]
    pub total_count: u64,
    #[serde(rename = "repositoriesPopularityScoreDTO")]
    pub items: Vec<T>,
}

impl<T> SearchResult<T> {
    pub fn new(total_count: u64, items: Vec<T>) -> Self {
        Self { total_count, items }
    }

    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub language: String,
    pub earliest_date: NaiveDate,
    pub page: u32,
}

impl SearchQuery {
    pub fn new(language: impl Into<String>, earliest_date: NaiveDate, page: u32) -> Self {
        Self {
            language: language.into(),
            earliest_date,
            page,
        }
    }
}
