use crate::domain::model::{ScoredRepository, SearchQuery, SearchResult};
use crate::utils::error::ServiceError;
use crate::utils::validation::{validate_non_empty_string, validate_past_or_present, validate_range};
use crate::web::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

pub const MIN_PAGE: i64 = 1;
pub const MAX_PAGE: i64 = 10;
const SEARCH_DOCS_URL: &str = "https://docs.github.com/v3/search/";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{field}: {message}")]
    InvalidParameter { field: &'static str, message: String },

    #[error("Invalid format for parameter: {field}. Expected type: {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Page number must be between {} and {}", MIN_PAGE, MAX_PAGE)]
    PageLimitExceeded,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidParameter { field, ref message } => {
                tracing::warn!("Rejected request: {}", self);
                let mut body = serde_json::Map::new();
                body.insert(field.to_string(), json!(message));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::TypeMismatch { .. } => {
                tracing::warn!("Rejected request: {}", self);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": self.to_string() })),
                )
                    .into_response()
            }
            ApiError::PageLimitExceeded => {
                tracing::error!("Page limit exceeded: {}", self);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "message": self.to_string(),
                        "documentation_url": SEARCH_DOCS_URL,
                    })),
                )
                    .into_response()
            }
            ApiError::Service(ref source) => {
                tracing::error!("Repository service error: {}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "timestamp": Utc::now().to_rfc3339(),
                        "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        "error": "Repository Service Error",
                        "message": source.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Raw query parameters. Everything arrives as text so malformed values get
/// the same JSON error bodies as missing ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreParams {
    pub language: Option<String>,
    pub earliest_date: Option<String>,
    pub page_number: Option<String>,
}

impl ScoreParams {
    pub fn into_query(self, today: NaiveDate) -> Result<SearchQuery, ApiError> {
        let language = self.language.unwrap_or_default();
        validate_non_empty_string("language", &language).map_err(|_| {
            ApiError::InvalidParameter {
                field: "language",
                message: "Language parameter is required".to_string(),
            }
        })?;

        let raw_date = self
            .earliest_date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidParameter {
                field: "earliestDate",
                message: "Earliest date parameter is required".to_string(),
            })?;
        let earliest_date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|_| {
            ApiError::TypeMismatch {
                field: "earliestDate",
                expected: "date (YYYY-MM-DD)",
            }
        })?;
        validate_past_or_present("earliestDate", earliest_date, today).map_err(|_| {
            ApiError::InvalidParameter {
                field: "earliestDate",
                message: "Earliest date must be in the past or present".to_string(),
            }
        })?;

        let page = match self.page_number.filter(|p| !p.trim().is_empty()) {
            None => MIN_PAGE,
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| ApiError::TypeMismatch {
                field: "pageNumber",
                expected: "integer",
            })?,
        };
        validate_range("pageNumber", page, MIN_PAGE, MAX_PAGE).map_err(|_| {
            tracing::error!("Invalid page number: {}. Must be between {} and {}", page, MIN_PAGE, MAX_PAGE);
            ApiError::PageLimitExceeded
        })?;

        Ok(SearchQuery::new(language.trim(), earliest_date, page as u32))
    }
}

pub async fn calculate_popularity_score(
    State(state): State<AppState>,
    Query(params): Query<ScoreParams>,
) -> Result<Json<SearchResult<ScoredRepository>>, ApiError> {
    let query = params.into_query(Utc::now().date_naive())?;
    let result = state.service.fetch_and_score(&query).await?;
    Ok(Json(result))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
