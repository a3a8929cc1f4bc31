use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub medication_type: MedicationType,
    pub dosage: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MedicationType {
    Prescription,
    Supplement,
}

impl MedicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prescription => "prescription",
            Self::Supplement => "supplement",
        }
    }
}

impl fmt::Display for MedicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MedicationType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prescription" => Ok(Self::Prescription),
            "supplement" => Ok(Self::Supplement),
            other => Err(StoreError::Validation(format!(
                "Unknown medication type: {other}"
            ))),
        }
    }
}

/// Field set for creating a medication, or fully replacing one on update.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct NewMedication {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[serde(rename = "type")]
    pub medication_type: MedicationType,

    #[validate(length(max = 100, message = "Dosage must be under 100 characters"))]
    pub dosage: Option<String>,

    #[validate(length(max = 2000, message = "Note must be under 2000 characters"))]
    pub note: Option<String>,
}

impl NewMedication {
    pub fn new(name: impl Into<String>, medication_type: MedicationType) -> Self {
        Self {
            name: name.into(),
            medication_type,
            dosage: None,
            note: None,
        }
    }

    pub fn with_dosage(mut self, dosage: impl Into<String>) -> Self {
        self.dosage = Some(dosage.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Trims text fields, drops blank optionals and validates what remains.
    pub fn normalized(self) -> StoreResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::Validation("Medication name is required".into()));
        }

        let normalized = Self {
            name,
            medication_type: self.medication_type,
            dosage: non_blank(self.dosage),
            note: non_blank(self.note),
        };
        normalized.validate()?;

        Ok(normalized)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
