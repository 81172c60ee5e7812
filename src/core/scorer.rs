//! Popularity scoring.
//!
//! A repository's score is
//! `log10(stars + 1) * 50 + log10(forks + 1) * 30 + 20 / (1 + days_since_update)`.
//! Repositories without a last-updated timestamp score a flat `0.0`.

use crate::domain::model::{RepositoryRecord, ScoredRepository};
use crate::domain::ports::{Scorer, ScoringMode};
use crate::utils::error::ScoringError;
use chrono::{DateTime, Utc};
use rayon::prelude::*;

pub const STARS_WEIGHT: f64 = 50.0;
pub const FORKS_WEIGHT: f64 = 30.0;
pub const RECENCY_WEIGHT: f64 = 20.0;

/// Score for known counts and a whole number of days since the last update.
pub fn popularity_score(stars: u64, forks: u64, days_since_update: u64) -> f64 {
    let stars_score = ((stars as f64) + 1.0).log10() * STARS_WEIGHT;
    let forks_score = ((forks as f64) + 1.0).log10() * FORKS_WEIGHT;
    let recency_score = (1.0 / (1.0 + days_since_update as f64)) * RECENCY_WEIGHT;

    stars_score + forks_score + recency_score
}

/// Scores a single repository against `now`.
pub fn score_repository(
    repository: &RepositoryRecord,
    now: DateTime<Utc>,
) -> Result<f64, ScoringError> {
    let Some(last_updated) = repository.last_updated else {
        tracing::warn!(
            "Repository {} has no last updated date. Assigning minimum score.",
            repository.full_name
        );
        return Ok(0.0);
    };

    // num_days truncates toward zero, so anything less than a day ahead counts as today.
    let days = (now - last_updated).num_days();
    if days < 0 {
        return Err(ScoringError::UpdateInFuture {
            full_name: repository.full_name.clone(),
            days_ahead: -days,
        });
    }

    let score = popularity_score(repository.stars, repository.forks, days as u64);
    if !score.is_finite() {
        return Err(ScoringError::NonFiniteScore {
            full_name: repository.full_name.clone(),
        });
    }

    Ok(score)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PopularityScorer {
    mode: ScoringMode,
}

impl PopularityScorer {
    pub fn new(mode: ScoringMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Scores the batch against a fixed instant. Every record sees the same `now`.
    pub fn score_at(
        &self,
        records: Vec<RepositoryRecord>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoredRepository>, ScoringError> {
        if records.is_empty() {
            tracing::warn!("Received empty repository list for score calculation.");
            return Ok(Vec::new());
        }

        tracing::info!(
            "Calculating popularity scores for {} repositories ({:?})",
            records.len(),
            self.mode
        );

        let score_one = |record: RepositoryRecord| -> Result<ScoredRepository, ScoringError> {
            let score = score_repository(&record, now)?;
            Ok(ScoredRepository::new(record, score))
        };

        let scored: Result<Vec<_>, ScoringError> = match self.mode {
            ScoringMode::Sequential => records.into_iter().map(score_one).collect(),
            // Indexed collect keeps input order regardless of completion order.
            ScoringMode::Parallel => records.into_par_iter().map(score_one).collect(),
        };

        scored.inspect_err(|e| tracing::error!("Failed to calculate popularity scores: {}", e))
    }
}

impl Scorer for PopularityScorer {
    fn score(&self, records: Vec<RepositoryRecord>) -> Result<Vec<ScoredRepository>, ScoringError> {
        self.score_at(records, Utc::now())
    }
}
