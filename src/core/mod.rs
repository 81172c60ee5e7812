pub mod fetcher;
pub mod scorer;
pub mod service;

pub use crate::domain::model::{RepositoryRecord, ScoredRepository, SearchQuery, SearchResult};
pub use crate::domain::ports::{ConfigProvider, RepositorySource, Scorer, ScoringMode};
pub use crate::utils::error::Result;
