//! Ways of reaching the webhook, tried in order.

use url::Url;

/// Header the CORS proxy requires on proxied requests.
pub const PROXY_MARKER_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// POST straight to the webhook.
    Direct,
    /// POST to `{base}{webhook}`.
    CorsProxy { base: String },
}

impl Transport {
    /// Direct first, then the proxy.
    pub fn chain(proxy_base: &str) -> Vec<Transport> {
        vec![
            Transport::Direct,
            Transport::CorsProxy {
                base: proxy_base.to_string(),
            },
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transport::Direct => "direct",
            Transport::CorsProxy { .. } => "cors-proxy",
        }
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self, Transport::CorsProxy { .. })
    }

    /// URL to POST to for this transport.
    pub fn target_url(&self, webhook: &Url) -> String {
        match self {
            Transport::Direct => webhook.to_string(),
            Transport::CorsProxy { base } => format!("{base}{webhook}"),
        }
    }
}
