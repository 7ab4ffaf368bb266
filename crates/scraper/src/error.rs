/// Errors from the scraping webhook client.
#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The webhook returned a non-2xx status code.
    #[error("Scraper webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a chapter list or search page.
    #[error("Invalid webhook response: {0}")]
    Decode(String),

    /// Every transport failed with a network error.
    #[error(
        "Network error: unable to reach the scraper webhook after {attempts} attempt(s): {message}"
    )]
    Network { attempts: usize, message: String },

    /// The shared time budget ran out.
    #[error("Scraper webhook did not answer within {0:?}")]
    Timeout(std::time::Duration),

    /// The configured webhook URL cannot be parsed.
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No webhook is configured.
    #[error("Scraping is not configured")]
    NotConfigured,
}

impl ScraperError {
    /// Whether the failure happened before the webhook answered. Only these
    /// advance to the next transport.
    pub fn is_network(&self) -> bool {
        match self {
            ScraperError::Request(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            ScraperError::Network { .. } | ScraperError::Timeout(_) => true,
            _ => false,
        }
    }
}
