//! Webhook client with a direct-then-proxy transport chain.
//!
//! [`ScraperClient`] POSTs `{<paramName>: name, search: bool}` with basic
//! auth. Transports are tried in order under one time budget; only network
//! failures move on to the next transport.

use serde::Serialize;
use tokio::time::Instant;
use url::Url;

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::parse::{filter_selected, parse_entries, ScrapedChapter};
use crate::search::{SearchResult, WebhookPayload};
use crate::transport::{Transport, PROXY_MARKER_HEADER};

/// Number of chapter titles included in a connection report.
const SAMPLE_CHAPTERS: usize = 5;

/// A decoded response and the transport that produced it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub payload: WebhookPayload,
    pub transport: Transport,
}

/// Result of probing the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReport {
    pub success: bool,
    pub chapters_found: usize,
    pub sample_chapters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub api_url: String,
    /// The webhook was only reachable through the proxy, or not at all.
    pub cors_issue: bool,
}

pub struct ScraperClient {
    http: reqwest::Client,
    config: ScraperConfig,
    webhook: Url,
    transports: Vec<Transport>,
}

impl ScraperClient {
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let webhook = Url::parse(&config.url)?;
        let transports = Transport::chain(&config.proxy_url);
        Ok(Self {
            http,
            config,
            webhook,
            transports,
        })
    }

    /// Replace the transport chain.
    pub fn with_transports(mut self, transports: Vec<Transport>) -> Self {
        self.transports = transports;
        self
    }

    pub fn webhook_url(&self) -> &str {
        self.webhook.as_str()
    }

    /// POST the manga name to the webhook, trying each transport in turn.
    pub async fn fetch(
        &self,
        manga_name: &str,
        is_search: bool,
    ) -> Result<FetchOutcome, ScraperError> {
        let body = self.request_body(manga_name, is_search);
        let deadline = Instant::now() + self.config.timeout;
        let mut attempts = 0;
        let mut last_err: Option<ScraperError> = None;

        for transport in &self.transports {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ScraperError::Timeout(self.config.timeout));
            }
            attempts += 1;

            match tokio::time::timeout(remaining, self.try_send(transport, &body)).await {
                Err(_) => {
                    tracing::error!(
                        transport = transport.label(),
                        manga_name,
                        "Scraper webhook time budget exhausted"
                    );
                    return Err(ScraperError::Timeout(self.config.timeout));
                }
                Ok(Ok(payload)) => {
                    tracing::debug!(
                        transport = transport.label(),
                        manga_name,
                        "Scraper webhook answered"
                    );
                    return Ok(FetchOutcome {
                        payload,
                        transport: transport.clone(),
                    });
                }
                Ok(Err(e)) if e.is_network() => {
                    tracing::warn!(
                        attempt = attempts,
                        transport = transport.label(),
                        error = %e,
                        "Scraper webhook unreachable, trying next transport"
                    );
                    last_err = Some(e);
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        transport = transport.label(),
                        error = %e,
                        "Scraper webhook request failed"
                    );
                    return Err(e);
                }
            }
        }

        Err(ScraperError::Network {
            attempts,
            message: last_err
                .map_or_else(|| "no transports configured".into(), |e| e.to_string()),
        })
    }

    /// Fetch the full chapter list for `manga_name`, keeping only
    /// `selected` chapters when that list is non-empty.
    pub async fn scrape_chapters(
        &self,
        manga_name: &str,
        selected: &[String],
    ) -> Result<Vec<ScrapedChapter>, ScraperError> {
        let outcome = self.fetch(manga_name, false).await?;
        let chapters = parse_entries(&outcome.payload.into_entries()?)?;
        Ok(filter_selected(chapters, selected))
    }

    /// Probe the webhook in search mode. Never fails; failures are reported.
    pub async fn test_connection(&self, manga_name: &str) -> ConnectionReport {
        let api_url = self.config.url.clone();

        let result = async {
            let outcome = self.fetch(manga_name, true).await?;
            let chapters = parse_entries(&outcome.payload.into_entries()?)?;
            Ok::<_, ScraperError>((chapters, outcome.transport.is_proxy()))
        }
        .await;

        match result {
            Ok((chapters, used_proxy)) => ConnectionReport {
                success: true,
                chapters_found: chapters.len(),
                sample_chapters: chapters
                    .into_iter()
                    .take(SAMPLE_CHAPTERS)
                    .map(|c| c.title)
                    .collect(),
                error: None,
                api_url,
                cors_issue: used_proxy,
            },
            Err(e) => ConnectionReport {
                success: false,
                chapters_found: 0,
                sample_chapters: Vec::new(),
                cors_issue: e.is_network(),
                error: Some(e.to_string()),
                api_url,
            },
        }
    }

    /// Search the webhook for manga matching `manga_name`. Failures are
    /// logged and yield no results.
    pub async fn search_manga(&self, manga_name: &str) -> Vec<SearchResult> {
        match self.fetch(manga_name, true).await {
            Ok(outcome) => outcome.payload.into_search_results(),
            Err(e) => {
                tracing::warn!(manga_name, error = %e, "Scraper search failed");
                Vec::new()
            }
        }
    }

    fn request_body(&self, manga_name: &str, is_search: bool) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(self.config.param_name.clone(), manga_name.into());
        body.insert("search".into(), is_search.into());
        serde_json::Value::Object(body)
    }

    /// Execute a single POST and decode the response.
    async fn try_send(
        &self,
        transport: &Transport,
        body: &serde_json::Value,
    ) -> Result<WebhookPayload, ScraperError> {
        let mut request = self
            .http
            .post(transport.target_url(&self.webhook))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(body);
        if transport.is_proxy() {
            let (name, value) = PROXY_MARKER_HEADER;
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScraperError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await?;
        WebhookPayload::decode(content_type.as_deref(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ScraperClient {
        let mut config = ScraperConfig::new("https://hooks.example.com/scrape");
        config.param_name = "manga".into();
        ScraperClient::new(config).unwrap()
    }

    #[test]
    fn body_uses_configured_param_name() {
        let body = client().request_body("one piece", true);
        assert_eq!(
            body,
            serde_json::json!({ "manga": "one piece", "search": true })
        );
    }

    #[test]
    fn invalid_webhook_url_is_rejected() {
        let result = ScraperClient::new(ScraperConfig::new("::not-a-url::"));
        assert!(matches!(result, Err(ScraperError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn empty_chain_is_a_network_error() {
        let err = client()
            .with_transports(Vec::new())
            .fetch("akira", false)
            .await
            .unwrap_err();
        assert!(matches!(err, ScraperError::Network { attempts: 0, .. }));
    }
}
