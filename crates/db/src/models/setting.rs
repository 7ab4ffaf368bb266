//! Site setting model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `settings` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Request body for `POST /api/settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSettings {
    pub settings: Vec<Setting>,
}
