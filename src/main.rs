use anyhow::Context;
use clap::Parser;
use repo_popularity::domain::ports::ConfigProvider;
use repo_popularity::utils::{
    logger,
    validation::{validate_socket_addr, Validate},
};
use repo_popularity::web::{self, AppState};
use repo_popularity::{PopularityService, ServerConfig, TomlConfig};
use std::fmt::Debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ServerConfig::parse();

    match cli.config.clone() {
        Some(path) => {
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            init_logging(cli.verbose || config.verbose(), cli.json_logs || config.json_logs());
            tracing::info!("Loaded configuration from {}", path.display());
            serve(config).await
        }
        None => {
            init_logging(cli.verbose, cli.json_logs);
            serve(cli).await
        }
    }
}

fn init_logging(verbose: bool, json: bool) {
    if json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
}

async fn serve<C: ConfigProvider + Validate + Debug>(config: C) -> anyhow::Result<()> {
    tracing::info!("Starting repo-popularity server");
    tracing::debug!("Server config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        return Err(e.into());
    }

    let service = PopularityService::from_config(&config)?;
    tracing::info!(
        "Scoring mode: {:?}, upstream: {}",
        config.scoring_mode(),
        config.github_api_base_url()
    );

    let addr = validate_socket_addr("bind", config.bind_address())?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("Server running on addr: {}", addr);

    axum::serve(listener, web::router(AppState::new(service)))
        .await
        .context("serving HTTP")?;

    Ok(())
}
