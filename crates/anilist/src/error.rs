/// Errors from the AniList client.
#[derive(Debug, thiserror::Error)]
pub enum AniListError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// AniList returned a non-2xx status code.
    #[error("AniList API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response carried a GraphQL `errors` array; holds the first message.
    #[error("AniList GraphQL error: {0}")]
    GraphQl(String),

    /// The body could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The query succeeded but returned no media.
    #[error("no manga found on AniList")]
    NotFound,
}
