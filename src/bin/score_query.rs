use clap::Parser;
use repo_popularity::core::fetcher::{DEFAULT_GITHUB_API_BASE_URL, DEFAULT_USER_AGENT};
use repo_popularity::domain::ports::ScoringMode;
use repo_popularity::utils::{logger, validation::validate_url};
use repo_popularity::web::handlers::ScoreParams;
use repo_popularity::{GitHubClient, PopularityScorer, ScoreService};

/// Runs a single search-and-score against GitHub and prints the JSON result.
#[derive(Debug, Parser)]
#[command(name = "score-query")]
struct Args {
    #[arg(long)]
    language: String,

    #[arg(long, help = "Only repositories created after this date (YYYY-MM-DD)")]
    earliest_date: String,

    #[arg(long, default_value = "1")]
    page: String,

    #[arg(long, default_value = DEFAULT_GITHUB_API_BASE_URL)]
    github_api_base_url: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    #[arg(long, value_enum, default_value_t = ScoringMode::Parallel)]
    scoring_mode: ScoringMode,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    validate_url("--github-api-base-url", &args.github_api_base_url)?;

    let params = ScoreParams {
        language: Some(args.language),
        earliest_date: Some(args.earliest_date),
        page_number: Some(args.page),
    };
    let query = match params.into_query(chrono::Utc::now().date_naive()) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };

    let client = GitHubClient::new(args.github_api_base_url, &args.user_agent)?;
    let service = ScoreService::new(client, PopularityScorer::new(args.scoring_mode));

    match service.fetch_and_score(&query).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scoring run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
