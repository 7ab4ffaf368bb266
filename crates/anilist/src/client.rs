use reqwest::Client;

use crate::error::AniListError;
use crate::types::{AniListMedia, GraphQLResponse, MediaResponse, PageResponse, SearchPage};

/// Public AniList GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://graphql.anilist.co";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;

const MEDIA_FIELDS: &str = r#"
    id
    title { romaji english native }
    description
    coverImage { large medium }
    bannerImage
    genres
    status
    chapters
    volumes
    averageScore
    popularity
    staff(perPage: 10) {
        nodes {
            name { full }
            primaryOccupations
        }
    }
    startDate { year month day }
"#;

fn media_query() -> String {
    format!(
        "query ($search: String, $id: Int) {{
            Media(search: $search, id: $id, type: MANGA) {{ {MEDIA_FIELDS} }}
        }}"
    )
}

fn search_query() -> String {
    format!(
        "query ($search: String, $page: Int, $perPage: Int) {{
            Page(page: $page, perPage: $perPage) {{
                pageInfo {{ total currentPage lastPage hasNextPage }}
                media(search: $search, type: MANGA, sort: POPULARITY_DESC) {{ {MEDIA_FIELDS} }}
            }}
        }}"
    )
}

/// Anonymous, read-only AniList client.
#[derive(Debug, Clone)]
pub struct AniListClient {
    api_url: String,
    http: Client,
}

impl AniListClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    /// Build a client around an existing `reqwest::Client` (shared pools,
    /// custom timeouts).
    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            http,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Search manga by title, most popular first.
    pub async fn search(
        &self,
        term: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, AniListError> {
        let data: PageResponse = self
            .graphql_request(
                "SearchManga",
                &search_query(),
                serde_json::json!({ "search": term, "page": page, "perPage": per_page }),
            )
            .await?;

        Ok(SearchPage {
            manga: data.page.media,
            page_info: data.page.page_info,
        })
    }

    /// Fetch a single manga by its AniList ID.
    pub async fn get_by_id(&self, id: i32) -> Result<AniListMedia, AniListError> {
        let data: MediaResponse = self
            .graphql_request("Media", &media_query(), serde_json::json!({ "id": id }))
            .await?;
        data.media.ok_or(AniListError::NotFound)
    }

    /// Fetch the best match for a search term.
    pub async fn get_by_search(&self, term: &str) -> Result<AniListMedia, AniListError> {
        let data: MediaResponse = self
            .graphql_request("Media", &media_query(), serde_json::json!({ "search": term }))
            .await?;
        data.media.ok_or(AniListError::NotFound)
    }

    async fn graphql_request<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AniListError> {
        tracing::debug!(operation, "AniList GraphQL request");

        let resp = self
            .http
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(operation, status = status_code, "AniList API error");
            return Err(AniListError::Api {
                status: status_code,
                message: body,
            });
        }

        tracing::debug!(operation, status = %status, "AniList response received");
        let envelope = resp
            .json::<GraphQLResponse<T>>()
            .await
            .map_err(|e| AniListError::Parse(e.to_string()))?;

        envelope.into_data().inspect_err(|e| {
            tracing::warn!(operation, error = %e, "AniList query returned errors");
        })
    }
}
