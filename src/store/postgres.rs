use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    diary::period::{DayRange, SortDirection},
    models::{DiaryEntry, NewDiaryEntry},
    AppResult,
};

use super::{CatalogGateway, DiaryStore};

/// PostgreSQL-backed diary store and catalog gateway.
///
/// The `diaries` table carries `UNIQUE (owner_id, day)`, which is what makes
/// the single-statement upsert safe under concurrent writers.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DiaryStore for PgStore {
    async fn find_by_day(&self, owner_id: &str, day: &DayRange) -> AppResult<Option<DiaryEntry>> {
        let entry = sqlx::query_as::<_, DiaryEntry>(
            r#"SELECT * FROM diaries WHERE owner_id = $1 AND day >= $2 AND day < $3 LIMIT 1"#,
        )
        .bind(owner_id)
        .bind(day.start)
        .bind(day.end)
        .fetch_optional(&self.db)
        .await?;

        Ok(entry)
    }

    async fn list_by_owner(&self, owner_id: &str, sort: SortDirection) -> AppResult<Vec<DiaryEntry>> {
        let sql = format!(
            "SELECT * FROM diaries WHERE owner_id = $1 ORDER BY day {}",
            sort.as_sql()
        );

        let entries = sqlx::query_as::<_, DiaryEntry>(&sql)
            .bind(owner_id)
            .fetch_all(&self.db)
            .await?;

        Ok(entries)
    }

    async fn list_by_range(
        &self,
        owner_id: &str,
        range: &DayRange,
        sort: SortDirection,
    ) -> AppResult<Vec<DiaryEntry>> {
        let sql = format!(
            "SELECT * FROM diaries WHERE owner_id = $1 AND day >= $2 AND day < $3 ORDER BY day {}",
            sort.as_sql()
        );

        let entries = sqlx::query_as::<_, DiaryEntry>(&sql)
            .bind(owner_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.db)
            .await?;

        Ok(entries)
    }

    async fn search_by_content(
        &self,
        owner_id: &str,
        needle: &str,
        sort: SortDirection,
    ) -> AppResult<Vec<DiaryEntry>> {
        // strpos keeps the needle literal; LIKE would treat % and _ as wildcards
        let sql = format!(
            "SELECT * FROM diaries WHERE owner_id = $1 AND strpos(content, $2) > 0 ORDER BY day {}",
            sort.as_sql()
        );

        let entries = sqlx::query_as::<_, DiaryEntry>(&sql)
            .bind(owner_id)
            .bind(needle)
            .fetch_all(&self.db)
            .await?;

        Ok(entries)
    }

    async fn upsert(&self, entry: &NewDiaryEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO diaries (owner_id, day, content, image, emotions, theme)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (owner_id, day) DO UPDATE SET
                content = EXCLUDED.content,
                image = EXCLUDED.image,
                emotions = EXCLUDED.emotions,
                theme = EXCLUDED.theme,
                updated_at = NOW()
            "#,
        )
        .bind(&entry.owner_id)
        .bind(entry.day)
        .bind(&entry.content)
        .bind(&entry.image)
        .bind(&entry.emotions)
        .bind(&entry.theme)
        .execute(&self.db)
        .await?;

        tracing::debug!(owner_id = %entry.owner_id, day = %entry.day, "Diary entry upserted");
        Ok(())
    }

    async fn delete_by_day(&self, owner_id: &str, day: &DayRange) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM diaries WHERE owner_id = $1 AND day >= $2 AND day < $3"#)
            .bind(owner_id)
            .bind(day.start)
            .bind(day.end)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count_in_range(&self, owner_id: &str, range: &DayRange) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM diaries WHERE owner_id = $1 AND day >= $2 AND day < $3"#,
        )
        .bind(owner_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }
}

#[async_trait]
impl CatalogGateway for PgStore {
    async fn theme_exists(&self, name: &str) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM themes WHERE name = $1)"#)
                .bind(name)
                .fetch_one(&self.db)
                .await?;

        Ok(exists)
    }

    async fn emotion_exists(&self, name: &str) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM emotions WHERE name = $1)"#)
                .bind(name)
                .fetch_one(&self.db)
                .await?;

        Ok(exists)
    }

    async fn all_emotion_names(&self) -> AppResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(r#"SELECT name FROM emotions ORDER BY name"#)
            .fetch_all(&self.db)
            .await?;

        Ok(names)
    }

    async fn all_theme_names(&self) -> AppResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(r#"SELECT name FROM themes ORDER BY name"#)
            .fetch_all(&self.db)
            .await?;

        Ok(names)
    }
}
