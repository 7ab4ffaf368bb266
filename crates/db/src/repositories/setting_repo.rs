//! Repository for the `settings` key/value table.

use sqlx::PgPool;

use crate::models::setting::Setting;

pub struct SettingRepo;

impl SettingRepo {
    /// All stored settings, ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        sqlx::query_as::<_, Setting>("SELECT key, value FROM settings ORDER BY key ASC")
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite each setting by key, in one transaction.
    pub async fn upsert_many(pool: &PgPool, settings: &[Setting]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for setting in settings {
            sqlx::query(
                "INSERT INTO settings (key, value) VALUES ($1, $2)
                 ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
            )
            .bind(&setting.key)
            .bind(&setting.value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
