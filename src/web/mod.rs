pub mod handlers;

use crate::core::service::PopularityService;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const SCORE_ROUTE: &str = "/api/v1/calculateGithubRepositoryPopularityScore";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PopularityService>,
}

impl AppState {
    pub fn new(service: PopularityService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SCORE_ROUTE, get(handlers::calculate_popularity_score))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
