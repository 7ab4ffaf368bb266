use std::collections::BTreeMap;

use akira_core::settings::merge_with_defaults;
use akira_db::models::setting::UpsertSettings;
use akira_db::repositories::SettingRepo;
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// GET /api/settings
///
/// Stored settings merged over the built-in defaults.
pub async fn get(State(state): State<AppState>) -> AppResult<Json<BTreeMap<String, String>>> {
    Ok(Json(merged(&state).await?))
}

/// POST /api/settings
///
/// Upserts every pair in one transaction and returns the merged map.
pub async fn upsert(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpsertSettings>,
) -> AppResult<Json<BTreeMap<String, String>>> {
    SettingRepo::upsert_many(&state.pool, &input.settings).await?;
    tracing::info!(count = input.settings.len(), "Settings updated");
    Ok(Json(merged(&state).await?))
}

async fn merged(state: &AppState) -> AppResult<BTreeMap<String, String>> {
    let stored = SettingRepo::list(&state.pool).await?;
    Ok(merge_with_defaults(
        stored.into_iter().map(|s| (s.key, s.value)),
    ))
}
