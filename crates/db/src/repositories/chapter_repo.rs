//! Repository for the `chapters` table.

use akira_core::chapter;
use akira_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::chapter::{Chapter, NewChapter};

const COLUMNS: &str = "id, manga_id, title, chapter_number, release_date, pages, views, is_new";

/// Chapter queries. Every list is ordered by `chapter_number` ascending.
pub struct ChapterRepo;

impl ChapterRepo {
    /// List the chapters of one manga.
    pub async fn list_by_manga<'e>(
        executor: impl PgExecutor<'e>,
        manga_id: DbId,
    ) -> Result<Vec<Chapter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chapters
             WHERE manga_id = $1
             ORDER BY chapter_number ASC"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(manga_id)
            .fetch_all(executor)
            .await
    }

    /// List the chapters of several manga at once, grouped by manga.
    pub async fn list_by_manga_ids<'e>(
        executor: impl PgExecutor<'e>,
        manga_ids: &[DbId],
    ) -> Result<Vec<Chapter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chapters
             WHERE manga_id = ANY($1)
             ORDER BY manga_id ASC, chapter_number ASC"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(manga_ids)
            .fetch_all(executor)
            .await
    }

    /// Find a chapter by its number within a manga.
    pub async fn find_by_number(
        pool: &PgPool,
        manga_id: DbId,
        chapter_number: i32,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chapters WHERE manga_id = $1 AND chapter_number = $2"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(manga_id)
            .bind(chapter_number)
            .fetch_optional(pool)
            .await
    }

    /// Replace every chapter of a manga with `chapters`.
    ///
    /// Must run inside the caller's transaction. `is_new` is set on the
    /// highest-numbered chapters of the new set.
    pub async fn replace_for_manga(
        conn: &mut PgConnection,
        manga_id: DbId,
        chapters: &[NewChapter],
    ) -> Result<Vec<Chapter>, sqlx::Error> {
        sqlx::query("DELETE FROM chapters WHERE manga_id = $1")
            .bind(manga_id)
            .execute(&mut *conn)
            .await?;

        let numbers: Vec<i32> = chapters.iter().map(|c| c.chapter_number).collect();
        let query = format!(
            "INSERT INTO chapters (manga_id, title, chapter_number, release_date, pages, views, is_new)
             VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), $5, COALESCE($6, 0), $7)
             RETURNING {COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(chapters.len());
        for input in chapters {
            let row = sqlx::query_as::<_, Chapter>(&query)
                .bind(manga_id)
                .bind(&input.title)
                .bind(input.chapter_number)
                .bind(input.release_date)
                .bind(&input.pages)
                .bind(input.views)
                .bind(chapter::is_new(&numbers, input.chapter_number))
                .fetch_one(&mut *conn)
                .await?;
            inserted.push(row);
        }

        inserted.sort_by_key(|c| c.chapter_number);
        Ok(inserted)
    }

    /// Count one read of a chapter, bumping both the chapter's `views` and
    /// the owning manga's `total_views`.
    ///
    /// Returns `None` if the chapter does not exist.
    pub async fn record_view(
        pool: &PgPool,
        manga_id: DbId,
        chapter_number: i32,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE chapters SET views = views + 1
             WHERE manga_id = $1 AND chapter_number = $2
             RETURNING {COLUMNS}"
        );
        let chapter = sqlx::query_as::<_, Chapter>(&query)
            .bind(manga_id)
            .bind(chapter_number)
            .fetch_optional(&mut *tx)
            .await?;

        if chapter.is_some() {
            sqlx::query("UPDATE manga SET total_views = total_views + 1 WHERE id = $1")
                .bind(manga_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(chapter)
    }
}
