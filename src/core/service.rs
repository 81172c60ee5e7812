use crate::core::fetcher::GitHubClient;
use crate::core::scorer::PopularityScorer;
use crate::domain::model::{ScoredRepository, SearchQuery, SearchResult};
use crate::domain::ports::{ConfigProvider, RepositorySource, Scorer};
use crate::utils::error::{Result, ServiceError};

/// Fetches one page of repositories and annotates each with a popularity score.
pub struct ScoreService<S: RepositorySource, R: Scorer> {
    source: S,
    scorer: R,
}

/// The production wiring: GitHub search plus the popularity scorer.
pub type PopularityService = ScoreService<GitHubClient, PopularityScorer>;

impl PopularityService {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = GitHubClient::from_config(config)?;
        let scorer = PopularityScorer::new(config.scoring_mode());
        Ok(ScoreService::new(client, scorer))
    }
}

impl<S: RepositorySource, R: Scorer> ScoreService<S, R> {
    pub fn new(source: S, scorer: R) -> Self {
        Self { source, scorer }
    }

    pub async fn fetch_and_score(
        &self,
        query: &SearchQuery,
    ) -> std::result::Result<SearchResult<ScoredRepository>, ServiceError> {
        tracing::info!(
            "Fetching repositories for language: {}, earliestDate: {}, pageNumber: {}",
            query.language,
            query.earliest_date,
            query.page
        );

        let fetched = self.source.fetch(query).await.map_err(|e| {
            tracing::error!(
                "Error fetching repositories for language: {}, earliestDate: {}, pageNumber: {}: {}",
                query.language,
                query.earliest_date,
                query.page,
                e
            );
            ServiceError::from(e)
        })?;

        if fetched.is_empty() {
            tracing::warn!(
                "No repositories found for language: {} with earliestDate: {}",
                query.language,
                query.earliest_date
            );
            return Ok(SearchResult::new(fetched.total_count, Vec::new()));
        }

        let total_count = fetched.total_count;
        let scored = self.scorer.score(fetched.items).map_err(|e| {
            tracing::error!("Error calculating repository scores: {}", e);
            ServiceError::from(e)
        })?;

        tracing::info!("Successfully calculated scores for {} repositories", scored.len());
        Ok(SearchResult::new(total_count, scored))
    }
}
