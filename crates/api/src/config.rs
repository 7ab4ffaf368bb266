use std::time::Duration;

use akira_scraper::ScraperConfig;

/// Settings that are individually valid but inconsistent with each other.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "SCRAPER_TIMEOUT_SECS ({scraper_secs}s) must be below REQUEST_TIMEOUT_SECS ({request_secs}s)"
    )]
    ScraperBudgetExceedsRequestTimeout { scraper_secs: u64, request_secs: u64 },
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4173`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Extra startup attempts to reach the database (default: `5`).
    pub db_connect_retries: u32,
    /// Delay between database connection attempts in seconds (default: `2`).
    pub db_connect_retry_delay_secs: u64,
    /// AniList GraphQL endpoint.
    pub anilist_url: String,
    /// Scraping webhook settings; `None` disables scraping.
    pub scraper: Option<ScraperConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                      |
    /// |-------------------------------|------------------------------|
    /// | `HOST`                        | `0.0.0.0`                    |
    /// | `PORT`                        | `4173`                       |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                         |
    /// | `DB_CONNECT_RETRIES`          | `5`                          |
    /// | `DB_CONNECT_RETRY_DELAY_SECS` | `2`                          |
    /// | `ANILIST_URL`                 | `https://graphql.anilist.co` |
    ///
    /// `SCRAPER_*` variables are read by [`ScraperConfig::from_env`].
    /// Panics on malformed or inconsistent values (see [`Self::validate`]).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4173".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_connect_retries: u32 = std::env::var("DB_CONNECT_RETRIES")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DB_CONNECT_RETRIES must be a valid u32");

        let db_connect_retry_delay_secs: u64 = std::env::var("DB_CONNECT_RETRY_DELAY_SECS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("DB_CONNECT_RETRY_DELAY_SECS must be a valid u64");

        let anilist_url = std::env::var("ANILIST_URL")
            .unwrap_or_else(|_| akira_anilist::client::DEFAULT_API_URL.into());

        let scraper = ScraperConfig::from_env()
            .unwrap_or_else(|e| panic!("Invalid SCRAPER_* configuration: {e}"));

        let config = Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_connect_retries,
            db_connect_retry_delay_secs,
            anilist_url,
            scraper,
        };
        config
            .validate()
            .unwrap_or_else(|e| panic!("Invalid configuration: {e}"));
        config
    }

    /// Cross-field checks.
    ///
    /// The scraper's transport budget must end before the request timeout,
    /// otherwise the timeout layer aborts the handler before the proxy
    /// transport is tried or a connection report is written.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(scraper) = &self.scraper else {
            return Ok(());
        };
        if scraper.timeout >= Duration::from_secs(self.request_timeout_secs) {
            return Err(ConfigError::ScraperBudgetExceedsRequestTimeout {
                scraper_secs: scraper.timeout.as_secs(),
                request_secs: self.request_timeout_secs,
            });
        }
        Ok(())
    }
}
