pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::core::fetcher::{DEFAULT_GITHUB_API_BASE_URL, DEFAULT_USER_AGENT};
use crate::domain::ports::{ConfigProvider, ScoringMode};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Shared checks for any configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C, prefix: &str) -> Result<()> {
    validation::validate_url(
        &format!("{prefix}github_api_base_url"),
        config.github_api_base_url(),
    )?;
    validation::validate_non_empty_string(&format!("{prefix}user_agent"), config.user_agent())?;
    validation::validate_socket_addr(&format!("{prefix}bind"), config.bind_address())?;
    Ok(())
}

#[cfg(feature = "cli")]
pub use cli::ServerConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "repo-popularity")]
    #[command(about = "Scores GitHub repositories by stars, forks and update recency")]
    pub struct ServerConfig {
        #[arg(long, default_value = DEFAULT_GITHUB_API_BASE_URL)]
        pub github_api_base_url: String,

        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        pub user_agent: String,

        #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
        pub bind: String,

        #[arg(long, value_enum, default_value_t = ScoringMode::Parallel)]
        pub scoring_mode: ScoringMode,

        #[arg(long, help = "Load settings from a TOML file instead of the flags above")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl ConfigProvider for ServerConfig {
        fn github_api_base_url(&self) -> &str {
            &self.github_api_base_url
        }

        fn user_agent(&self) -> &str {
            &self.user_agent
        }

        fn bind_address(&self) -> &str {
            &self.bind
        }

        fn scoring_mode(&self) -> ScoringMode {
            self.scoring_mode
        }
    }

    impl Validate for ServerConfig {
        fn validate(&self) -> Result<()> {
            validate_provider(self, "--")
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = ServerConfig::parse_from(["repo-popularity"]);

            assert_eq!(config.github_api_base_url(), "https://api.github.com");
            assert_eq!(config.bind_address(), DEFAULT_BIND_ADDRESS);
            assert_eq!(config.scoring_mode(), ScoringMode::Parallel);
            assert!(config.config.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_flags() {
            let config = ServerConfig::parse_from([
                "repo-popularity",
                "--github-api-base-url",
                "http://127.0.0.1:9000",
                "--scoring-mode",
                "sequential",
                "--bind",
                "127.0.0.1:3000",
                "--verbose",
            ]);

            assert_eq!(config.github_api_base_url(), "http://127.0.0.1:9000");
            assert_eq!(config.scoring_mode(), ScoringMode::Sequential);
            assert_eq!(config.bind_address(), "127.0.0.1:3000");
            assert!(config.verbose);
        }

        #[test]
        fn test_invalid_base_url_fails_validation() {
            let config = ServerConfig::parse_from([
                "repo-popularity",
                "--github-api-base-url",
                "not a url",
            ]);

            assert!(config.validate().is_err());
        }
    }
}
