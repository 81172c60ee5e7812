use anyhow::Result;
use chrono::{Duration, Utc};
use httpmock::prelude::*;
use repo_popularity::core::fetcher::DEFAULT_USER_AGENT;
use repo_popularity::domain::ports::ScoringMode;
use repo_popularity::web::{self, AppState, SCORE_ROUTE};
use repo_popularity::{GitHubClient, PopularityScorer, ScoreService};
use serde_json::Value;

/// Starts the API on an ephemeral port, backed by the given upstream, and returns its base URL.
async fn spawn_app(upstream: &str) -> Result<String> {
    let client = GitHubClient::new(upstream, DEFAULT_USER_AGENT)?;
    let service = ScoreService::new(client, PopularityScorer::new(ScoringMode::Parallel));
    let app = web::router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn test_scores_repositories_over_http() -> Result<()> {
    let server = MockServer::start();
    let updated = (Utc::now() - Duration::days(5)).to_rfc3339();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search/repositories")
            .query_param("page", "2");
        then.status(200).json_body(serde_json::json!({
            "total_count": 321,
            "items": [{
                "full_name": "test/repo",
                "stargazers_count": 100,
                "forks_count": 50,
                "updated_at": updated,
                "created_at": "2023-02-01T00:00:00Z",
                "html_url": "https://github.com/test/repo"
            }]
        }));
    });

    let base = spawn_app(&server.base_url()).await?;
    let response = reqwest::get(format!(
        "{}{}?language=java&earliestDate=2023-01-01&pageNumber=2",
        base, SCORE_ROUTE
    ))
    .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    api_mock.assert();

    assert_eq!(body["totalNumberOfRepositories"], 321);
    let repo = &body["repositoriesPopularityScoreDTO"][0];
    assert_eq!(repo["fullName"], "test/repo");
    assert_eq!(repo["stars"], 100);
    assert_eq!(repo["forks"], 50);
    assert_eq!(repo["repositoryURL"], "https://github.com/test/repo");
    assert!(repo["createdDate"].is_string());
    assert!(repo["lastUpdated"].is_string());
    let score = repo["popularityScore"].as_f64().unwrap();
    assert!((score - 154.77650730540356).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn test_page_limit_exceeded() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/search/repositories");
        then.status(200)
            .json_body(serde_json::json!({ "total_count": 0, "items": [] }));
    });

    let base = spawn_app(&server.base_url()).await?;
    let response = reqwest::get(format!(
        "{}{}?language=java&earliestDate=2023-01-01&pageNumber=11",
        base, SCORE_ROUTE
    ))
    .await?;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["message"], "Page number must be between 1 and 10");
    assert_eq!(body["documentation_url"], "https://docs.github.com/v3/search/");
    api_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_missing_parameters_are_rejected() -> Result<()> {
    let base = spawn_app("http://127.0.0.1:1").await?;

    let response = reqwest::get(format!("{}{}?earliestDate=2023-01-01", base, SCORE_ROUTE)).await?;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["language"], "Language parameter is required");

    let response = reqwest::get(format!("{}{}?language=java", base, SCORE_ROUTE)).await?;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(body["earliestDate"], "Earliest date parameter is required");

    let tomorrow = (Utc::now() + Duration::days(2)).date_naive();
    let response = reqwest::get(format!(
        "{}{}?language=java&earliestDate={}",
        base, SCORE_ROUTE, tomorrow
    ))
    .await?;
    assert_eq!(response.status(), 400);

    let response = reqwest::get(format!(
        "{}{}?language=java&earliestDate=2023-01-01&pageNumber=abc",
        base, SCORE_ROUTE
    ))
    .await?;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert_eq!(
        body["error"],
        "Invalid format for parameter: pageNumber. Expected type: integer"
    );

    Ok(())
}

#[tokio::test]
async fn test_upstream_failure_maps_to_500() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search/repositories");
        then.status(503);
    });

    let base = spawn_app(&server.base_url()).await?;
    let response = reqwest::get(format!(
        "{}{}?language=java&earliestDate=2023-01-01",
        base, SCORE_ROUTE
    ))
    .await?;

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await?;
    assert_eq!(body["status"], 500);
    assert_eq!(body["error"], "Repository Service Error");
    assert!(body["message"].as_str().unwrap().contains("503"));
    assert!(body["timestamp"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let base = spawn_app("http://127.0.0.1:1").await?;

    let body: Value = reqwest::get(format!("{}/health", base)).await?.json().await?;
    assert_eq!(body["status"], "ok");

    Ok(())
}
