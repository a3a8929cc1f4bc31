use chrono::Utc;

use crate::db::pool::Database;
use crate::error::{StoreError, StoreResult};
use crate::models::medication::{Medication, MedicationType, NewMedication};

/// Medication reference records keyed by a store-assigned id.
pub struct MedicationStore<'a> {
    db: &'a Database,
}

impl<'a> MedicationStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn add(&self, input: NewMedication) -> StoreResult<Medication> {
        let input = input.normalized()?;
        let pool = self.db.open().await?;

        let medication = sqlx::query_as::<_, Medication>(
            r#"
            INSERT INTO medications (name, type, dosage, note, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.medication_type)
        .bind(&input.dosage)
        .bind(&input.note)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        tracing::debug!(id = medication.id, name = %medication.name, "Medication added");

        Ok(medication)
    }

    /// Replaces every editable field of an existing medication.
    pub async fn update(&self, id: i64, input: NewMedication) -> StoreResult<Medication> {
        let input = input.normalized()?;
        let pool = self.db.open().await?;

        let medication = sqlx::query_as::<_, Medication>(
            r#"
            UPDATE medications SET
                name = ?2,
                type = ?3,
                dosage = ?4,
                note = ?5,
                updated_at = ?6
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.medication_type)
        .bind(&input.dosage)
        .bind(&input.note)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("Medication {id} not found")))?;

        tracing::debug!(id, "Medication updated");

        Ok(medication)
    }

    /// Removes the medication. Diary entries keep any reference to `id`.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let pool = self.db.open().await?;

        let result = sqlx::query("DELETE FROM medications WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        tracing::debug!(id, removed = result.rows_affected(), "Medication deleted");

        Ok(())
    }

    pub async fn get_all(&self) -> StoreResult<Vec<Medication>> {
        let pool = self.db.open().await?;

        let medications =
            sqlx::query_as::<_, Medication>("SELECT * FROM medications ORDER BY id ASC")
                .fetch_all(pool)
                .await?;

        Ok(medications)
    }

    pub async fn get_by_type(&self, medication_type: MedicationType) -> StoreResult<Vec<Medication>> {
        let pool = self.db.open().await?;

        let medications = sqlx::query_as::<_, Medication>(
            r#"
            SELECT * FROM medications INDEXED BY idx_medications_type
            WHERE type = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(medication_type)
        .fetch_all(pool)
        .await?;

        Ok(medications)
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<Medication>> {
        let pool = self.db.open().await?;

        let medication = sqlx::query_as::<_, Medication>("SELECT * FROM medications WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(medication)
    }
}
