pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use crate::config::ServerConfig;

pub use crate::config::TomlConfig;
pub use crate::core::{
    fetcher::GitHubClient,
    scorer::PopularityScorer,
    service::{PopularityService, ScoreService},
};
pub use crate::domain::model::{RepositoryRecord, ScoredRepository, SearchQuery, SearchResult};
pub use crate::utils::error::{AppError, FetchError, Result, ScoringError, ServiceError};
