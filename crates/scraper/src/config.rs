use std::time::Duration;

use validator::{Validate, ValidationErrors};

/// Public CORS proxy used when the webhook cannot be reached directly.
pub const DEFAULT_PROXY_URL: &str = "https://cors-anywhere.herokuapp.com/";

/// Name of the JSON body field carrying the manga name.
pub const DEFAULT_PARAM_NAME: &str = "anime";

/// Shared budget for all transports. Kept below the API's default request
/// timeout of 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Connection settings for the scraping webhook.
#[derive(Debug, Clone, Validate)]
pub struct ScraperConfig {
    /// Webhook endpoint.
    #[validate(url)]
    pub url: String,
    /// Basic-auth credentials sent with every request.
    pub username: String,
    pub password: String,
    /// JSON body field that carries the manga name.
    #[validate(length(min = 1))]
    pub param_name: String,
    /// Prefix prepended to the webhook URL for the proxy fallback.
    #[validate(url)]
    pub proxy_url: String,
    /// Total time budget for one fetch, across all transports.
    pub timeout: Duration,
}

impl ScraperConfig {
    /// Config for `url` with every other setting at its default.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: String::new(),
            password: String::new(),
            param_name: DEFAULT_PARAM_NAME.into(),
            proxy_url: DEFAULT_PROXY_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load from environment variables. Returns `Ok(None)` when
    /// `SCRAPER_URL` is unset, which disables scraping.
    ///
    /// | Env Var                | Default                                  |
    /// |------------------------|------------------------------------------|
    /// | `SCRAPER_URL`          | (unset)                                  |
    /// | `SCRAPER_USERNAME`     | empty                                    |
    /// | `SCRAPER_PASSWORD`     | empty                                    |
    /// | `SCRAPER_PARAM_NAME`   | `anime`                                  |
    /// | `SCRAPER_PROXY_URL`    | `https://cors-anywhere.herokuapp.com/`   |
    /// | `SCRAPER_TIMEOUT_SECS` | `25`                                     |
    pub fn from_env() -> Result<Option<Self>, ValidationErrors> {
        let Ok(url) = std::env::var("SCRAPER_URL") else {
            return Ok(None);
        };

        let timeout_secs: u64 = std::env::var("SCRAPER_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("SCRAPER_TIMEOUT_SECS must be a valid u64");

        let config = Self {
            url,
            username: std::env::var("SCRAPER_USERNAME").unwrap_or_default(),
            password: std::env::var("SCRAPER_PASSWORD").unwrap_or_default(),
            param_name: std::env::var("SCRAPER_PARAM_NAME")
                .unwrap_or_else(|_| DEFAULT_PARAM_NAME.into()),
            proxy_url: std::env::var("SCRAPER_PROXY_URL")
                .unwrap_or_else(|_| DEFAULT_PROXY_URL.into()),
            timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_is_valid() {
        assert!(ScraperConfig::new("https://hooks.example.com/scrape")
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_bad_urls_and_empty_param_name() {
        let mut config = ScraperConfig::new("not a url");
        config.param_name.clear();

        let errors = config.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("url"));
        assert!(fields.contains_key("param_name"));
        assert!(!fields.contains_key("proxy_url"));
    }
}
