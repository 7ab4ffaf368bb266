//! Repository for the `manga` table.
//!
//! Reads assemble a [`MangaWithChildren`] from three queries (manga,
//! chapters, characters); writes that touch children run in a single
//! transaction.

use std::collections::HashMap;

use akira_core::manga::MangaStatus;
use akira_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::chapter::Chapter;
use crate::models::character::Character;
use crate::models::manga::{CreateManga, Manga, MangaWithChildren, UpdateManga};
use crate::repositories::{ChapterRepo, CharacterRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, author, artist, status, genres, synopsis, cover_image, banner_image, \
     total_chapters, total_views, rating, last_updated, anilist_id, api_manga_name, \
     scraping_progress, created_at, updated_at";

/// Provides CRUD operations for manga, including their chapters and characters.
pub struct MangaRepo;

impl MangaRepo {
    /// List every manga with its chapters and characters, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<MangaWithChildren>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manga ORDER BY id ASC");
        let rows = sqlx::query_as::<_, Manga>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = rows.iter().map(|m| m.id).collect();
        let mut chapters = group_by_manga(
            ChapterRepo::list_by_manga_ids(pool, &ids).await?,
            |c: &Chapter| c.manga_id,
        );
        let mut characters = group_by_manga(
            CharacterRepo::list_by_manga_ids(pool, &ids).await?,
            |c: &Character| c.manga_id,
        );

        Ok(rows
            .into_iter()
            .map(|manga| MangaWithChildren {
                chapters: chapters.remove(&manga.id).unwrap_or_default(),
                characters: characters.remove(&manga.id).unwrap_or_default(),
                manga,
            })
            .collect())
    }

    /// Find a manga row without loading its children.
    pub async fn find_row(pool: &PgPool, id: DbId) -> Result<Option<Manga>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manga WHERE id = $1");
        sqlx::query_as::<_, Manga>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a manga by ID with its chapters and characters.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MangaWithChildren>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        match Self::find_row_on(&mut *conn, id).await? {
            Some(manga) => Ok(Some(Self::with_children(&mut *conn, manga).await?)),
            None => Ok(None),
        }
    }

    /// Insert a new manga together with any chapters and characters in the
    /// input, returning the created record.
    ///
    /// When chapters are supplied, `total_chapters` is their count.
    pub async fn create(
        pool: &PgPool,
        input: &CreateManga,
    ) -> Result<MangaWithChildren, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let total_chapters = if input.chapters.is_empty() {
            input.total_chapters
        } else {
            Some(count_as_i32(input.chapters.len()))
        };

        let query = format!(
            "INSERT INTO manga (title, author, artist, status, genres, synopsis, cover_image,
                                banner_image, total_chapters, total_views, rating, last_updated,
                                anilist_id, api_manga_name, scraping_progress)
             VALUES ($1, COALESCE($2, 'Unknown'), COALESCE($3, 'Unknown'),
                     COALESCE($4, 'ongoing'), COALESCE($5, '{{}}'::text[]), COALESCE($6, ''),
                     COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, 0), COALESCE($10, 0),
                     COALESCE($11, 0), COALESCE($12, CURRENT_DATE), $13, COALESCE($14, ''), $15)
             RETURNING {COLUMNS}"
        );
        let manga = sqlx::query_as::<_, Manga>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.artist)
            .bind(input.status.map(MangaStatus::as_str))
            .bind(&input.genres)
            .bind(&input.synopsis)
            .bind(&input.cover_image)
            .bind(&input.banner_image)
            .bind(total_chapters)
            .bind(input.total_views)
            .bind(input.rating)
            .bind(input.last_updated)
            .bind(input.anilist_id)
            .bind(&input.api_manga_name)
            .bind(Json(input.scraping_progress.clone().unwrap_or_default()))
            .fetch_one(&mut *tx)
            .await?;

        let chapters = ChapterRepo::replace_for_manga(&mut *tx, manga.id, &input.chapters).await?;
        let characters =
            CharacterRepo::replace_for_manga(&mut *tx, manga.id, &input.characters).await?;

        tx.commit().await?;

        Ok(MangaWithChildren {
            manga,
            chapters,
            characters,
        })
    }

    /// Update a manga. Only non-`None` fields in `input` are applied.
    ///
    /// A present chapter list replaces the stored chapters and resets
    /// `total_chapters` and `last_updated`. Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateManga,
    ) -> Result<Option<MangaWithChildren>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE manga SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                artist = COALESCE($4, artist),
                status = COALESCE($5, status),
                genres = COALESCE($6, genres),
                synopsis = COALESCE($7, synopsis),
                cover_image = COALESCE($8, cover_image),
                banner_image = COALESCE($9, banner_image),
                total_chapters = COALESCE($10, total_chapters),
                total_views = COALESCE($11, total_views),
                rating = COALESCE($12, rating),
                last_updated = COALESCE($13, last_updated),
                anilist_id = COALESCE($14, anilist_id),
                api_manga_name = COALESCE($15, api_manga_name),
                scraping_progress = COALESCE($16, scraping_progress),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Manga>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.artist)
            .bind(input.status.map(MangaStatus::as_str))
            .bind(&input.genres)
            .bind(&input.synopsis)
            .bind(&input.cover_image)
            .bind(&input.banner_image)
            .bind(input.total_chapters)
            .bind(input.total_views)
            .bind(input.rating)
            .bind(input.last_updated)
            .bind(input.anilist_id)
            .bind(&input.api_manga_name)
            .bind(input.scraping_progress.clone().map(Json))
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut manga) = updated else {
            return Ok(None);
        };

        if let Some(chapters) = &input.chapters {
            ChapterRepo::replace_for_manga(&mut *tx, id, chapters).await?;

            let query = format!(
                "UPDATE manga SET
                    total_chapters = $2,
                    last_updated = COALESCE($3, CURRENT_DATE)
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            manga = sqlx::query_as::<_, Manga>(&query)
                .bind(id)
                .bind(count_as_i32(chapters.len()))
                .bind(input.last_updated)
                .fetch_one(&mut *tx)
                .await?;
        }

        if let Some(characters) = &input.characters {
            CharacterRepo::replace_for_manga(&mut *tx, id, characters).await?;
        }

        let full = Self::with_children(&mut *tx, manga).await?;
        tx.commit().await?;
        Ok(Some(full))
    }

    /// Permanently delete a manga. Chapters and characters cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM manga WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---- private helpers ----

    async fn find_row_on(conn: &mut PgConnection, id: DbId) -> Result<Option<Manga>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manga WHERE id = $1");
        sqlx::query_as::<_, Manga>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    async fn with_children(
        conn: &mut PgConnection,
        manga: Manga,
    ) -> Result<MangaWithChildren, sqlx::Error> {
        let chapters = ChapterRepo::list_by_manga(&mut *conn, manga.id).await?;
        let characters = CharacterRepo::list_by_manga_ids(&mut *conn, &[manga.id]).await?;
        Ok(MangaWithChildren {
            manga,
            chapters,
            characters,
        })
    }
}

fn group_by_manga<T>(items: Vec<T>, key: impl Fn(&T) -> DbId) -> HashMap<DbId, Vec<T>> {
    let mut grouped: HashMap<DbId, Vec<T>> = HashMap::new();
    for item in items {
        grouped.entry(key(&item)).or_default().push(item);
    }
    grouped
}

fn count_as_i32(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}
