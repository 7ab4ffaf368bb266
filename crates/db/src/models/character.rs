//! Character entity model and DTOs.

use akira_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: DbId,
    pub manga_id: DbId,
    pub name: String,
    pub image: String,
    pub description: String,
}

/// DTO for a character written as part of a manga create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}
