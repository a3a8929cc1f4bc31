use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::db::pool::Database;
use crate::error::{StoreError, StoreResult};
use crate::models::diary_entry::{DiaryEntry, SaveDiaryEntry};

#[derive(Debug, FromRow)]
struct DiaryRow {
    date: NaiveDate,
    photo: Option<String>,
    mention: String,
    weight: Option<f64>,
    dry_food: Option<f64>,
    wet_food: Option<f64>,
    poop_count: Option<u32>,
    pee_count: Option<u32>,
    vomit_count: Option<u32>,
    vomit_type: Json<Vec<String>>,
    fluid_amount: Option<f64>,
    taken_medications: Json<Vec<i64>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DiaryRow> for DiaryEntry {
    fn from(row: DiaryRow) -> Self {
        Self {
            date: row.date,
            photo: row.photo,
            mention: row.mention,
            weight: row.weight,
            dry_food: row.dry_food,
            wet_food: row.wet_food,
            poop_count: row.poop_count,
            pee_count: row.pee_count,
            vomit_count: row.vomit_count,
            vomit_type: row.vomit_type.0,
            fluid_amount: row.fluid_amount,
            taken_medications: row.taken_medications.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Diary entries keyed by calendar date.
pub struct DiaryStore<'a> {
    db: &'a Database,
}

impl<'a> DiaryStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Inserts or fully replaces the entry for `input.date`.
    ///
    /// `updated_at` never moves backwards, even if the clock does. Stored
    /// timestamps are UTC RFC 3339 text, which orders the same as time.
    pub async fn put(&self, input: SaveDiaryEntry) -> StoreResult<DiaryEntry> {
        input.check()?;

        let pool = self.db.open().await?;
        let now = Utc::now();

        let row = sqlx::query_as::<_, DiaryRow>(
            r#"
            INSERT INTO diaries (
                date, photo, mention, weight, dry_food, wet_food,
                poop_count, pee_count, vomit_count, vomit_type,
                fluid_amount, taken_medications, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, COALESCE(?13, ?14), ?14)
            ON CONFLICT (date) DO UPDATE SET
                photo = excluded.photo,
                mention = excluded.mention,
                weight = excluded.weight,
                dry_food = excluded.dry_food,
                wet_food = excluded.wet_food,
                poop_count = excluded.poop_count,
                pee_count = excluded.pee_count,
                vomit_count = excluded.vomit_count,
                vomit_type = excluded.vomit_type,
                fluid_amount = excluded.fluid_amount,
                taken_medications = excluded.taken_medications,
                created_at = COALESCE(?13, diaries.created_at),
                updated_at = MAX(excluded.updated_at, diaries.updated_at)
            RETURNING *
            "#,
        )
        .bind(input.date)
        .bind(&input.photo)
        .bind(&input.mention)
        .bind(input.weight)
        .bind(input.dry_food)
        .bind(input.wet_food)
        .bind(input.poop_count)
        .bind(input.pee_count)
        .bind(input.vomit_count)
        .bind(Json(&input.vomit_type))
        .bind(input.fluid_amount)
        .bind(Json(&input.taken_medications))
        .bind(input.created_at)
        .bind(now)
        .fetch_one(pool)
        .await?;

        tracing::debug!(date = %input.date, "Diary entry saved");

        Ok(row.into())
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> StoreResult<Option<DiaryEntry>> {
        let pool = self.db.open().await?;

        let row = sqlx::query_as::<_, DiaryRow>("SELECT * FROM diaries WHERE date = ?1")
            .bind(date)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(DiaryEntry::from))
    }

    /// Every entry, most recent day first.
    pub async fn get_all(&self) -> StoreResult<Vec<DiaryEntry>> {
        let pool = self.db.open().await?;

        let rows = sqlx::query_as::<_, DiaryRow>("SELECT * FROM diaries ORDER BY date DESC")
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(DiaryEntry::from).collect())
    }

    /// Entries between `start` and `end` inclusive, most recent day first.
    pub async fn get_range(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<Vec<DiaryEntry>> {
        if start > end {
            return Err(StoreError::Validation(format!(
                "Range start {start} is after end {end}"
            )));
        }

        let pool = self.db.open().await?;

        let rows = sqlx::query_as::<_, DiaryRow>(
            r#"
            SELECT * FROM diaries
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(DiaryEntry::from).collect())
    }

    /// Removes the entry for `date`. Deleting a missing day is not an error.
    pub async fn delete_by_date(&self, date: NaiveDate) -> StoreResult<()> {
        let pool = self.db.open().await?;

        let result = sqlx::query("DELETE FROM diaries WHERE date = ?1")
            .bind(date)
            .execute(pool)
            .await?;

        tracing::debug!(%date, removed = result.rows_affected(), "Diary entry deleted");

        Ok(())
    }
}
