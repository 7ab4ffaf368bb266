//! Wire types for the AniList GraphQL responses.
//!
//! Every field AniList may return as `null` is optional here.

use serde::{Deserialize, Serialize};

use crate::error::AniListError;

// ── GraphQL envelope ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl<T> GraphQLResponse<T> {
    /// Unwrap `data`, turning a GraphQL `errors` array into an error that
    /// carries the first message.
    pub fn into_data(self) -> Result<T, AniListError> {
        if let Some(first) = self.errors.and_then(|errs| errs.into_iter().next()) {
            return Err(AniListError::GraphQl(first.message));
        }
        self.data
            .ok_or_else(|| AniListError::Parse("response has no data".into()))
    }
}

#[derive(Debug, Deserialize)]
pub struct PageResponse {
    #[serde(rename = "Page")]
    pub page: Page,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_info: PageInfo,
    #[serde(default)]
    pub media: Vec<AniListMedia>,
}

#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    #[serde(rename = "Media")]
    pub media: Option<AniListMedia>,
}

// ── Media ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub total: i32,
    #[serde(default)]
    pub current_page: i32,
    #[serde(default)]
    pub last_page: i32,
    #[serde(default)]
    pub has_next_page: bool,
}

/// A manga as returned by the `Media` / `Page.media` queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListMedia {
    pub id: i32,
    #[serde(default)]
    pub title: MediaTitle,
    pub description: Option<String>,
    pub cover_image: Option<CoverImage>,
    pub banner_image: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub average_score: Option<i32>,
    pub popularity: Option<i32>,
    pub staff: Option<StaffConnection>,
    pub start_date: Option<FuzzyDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverImage {
    pub large: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffConnection {
    #[serde(default)]
    pub nodes: Vec<StaffNode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffNode {
    #[serde(default)]
    pub name: StaffName,
    #[serde(default)]
    pub primary_occupations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffName {
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub manga: Vec<AniListMedia>,
    pub page_info: PageInfo,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn graphql_errors_take_precedence_over_data() {
        let resp: GraphQLResponse<MediaResponse> = serde_json::from_value(serde_json::json!({
            "data": { "Media": null },
            "errors": [{ "message": "Not Found." }, { "message": "second" }]
        }))
        .unwrap();

        assert_matches!(resp.into_data(), Err(AniListError::GraphQl(msg)) if msg == "Not Found.");
    }

    #[test]
    fn missing_data_is_a_parse_error() {
        let resp: GraphQLResponse<MediaResponse> =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert_matches!(resp.into_data(), Err(AniListError::Parse(_)));
    }

    #[test]
    fn page_response_decodes_media_and_page_info() {
        let resp: GraphQLResponse<PageResponse> = serde_json::from_value(serde_json::json!({
            "data": {
                "Page": {
                    "pageInfo": { "total": 42, "currentPage": 1, "lastPage": 3, "hasNextPage": true },
                    "media": [{
                        "id": 30013,
                        "title": { "romaji": "One Piece", "english": "One Piece", "native": null },
                        "genres": ["Action", "Adventure"],
                        "status": "RELEASING",
                        "chapters": null,
                        "staff": { "nodes": [{ "name": { "full": "Eiichiro Oda" },
                                               "primaryOccupations": ["Mangaka"] }] }
                    }]
                }
            }
        }))
        .unwrap();

        let page = resp.into_data().unwrap().page;
        assert_eq!(page.page_info.total, 42);
        assert!(page.page_info.has_next_page);
        assert_eq!(page.media.len(), 1);
        assert_eq!(page.media[0].id, 30013);
        assert_eq!(page.media[0].chapters, None);
        assert_eq!(
            page.media[0].staff.as_ref().unwrap().nodes[0].primary_occupations,
            vec!["Mangaka".to_string()]
        );
    }
}
