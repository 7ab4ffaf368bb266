//! Repository for the `characters` table.

use akira_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::character::{Character, NewCharacter};

const COLUMNS: &str = "id, manga_id, name, image, description";

pub struct CharacterRepo;

impl CharacterRepo {
    /// List the characters of several manga at once, in insertion order.
    pub async fn list_by_manga_ids<'e>(
        executor: impl PgExecutor<'e>,
        manga_ids: &[DbId],
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE manga_id = ANY($1)
             ORDER BY manga_id ASC, id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(manga_ids)
            .fetch_all(executor)
            .await
    }

    /// Replace every character of a manga. Runs inside the caller's transaction.
    pub async fn replace_for_manga(
        conn: &mut PgConnection,
        manga_id: DbId,
        characters: &[NewCharacter],
    ) -> Result<Vec<Character>, sqlx::Error> {
        sqlx::query("DELETE FROM characters WHERE manga_id = $1")
            .bind(manga_id)
            .execute(&mut *conn)
            .await?;

        let query = format!(
            "INSERT INTO characters (manga_id, name, image, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(characters.len());
        for input in characters {
            let row = sqlx::query_as::<_, Character>(&query)
                .bind(manga_id)
                .bind(&input.name)
                .bind(&input.image)
                .bind(&input.description)
                .fetch_one(&mut *conn)
                .await?;
            inserted.push(row);
        }
        Ok(inserted)
    }
}
