use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{StoreError, StoreResult};

pub const VOMIT_EMPTY_STOMACH: &str = "공복토";
pub const VOMIT_FOOD: &str = "사료토";
pub const VOMIT_PROJECTILE: &str = "분수토";

/// Tags offered by the entry form. The store accepts any string.
pub const KNOWN_VOMIT_TYPES: [&str; 3] = [VOMIT_EMPTY_STOMACH, VOMIT_FOOD, VOMIT_PROJECTILE];

pub fn is_known_vomit_type(tag: &str) -> bool {
    KNOWN_VOMIT_TYPES.contains(&tag)
}

/// One calendar day of care observations. `date` is the record's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub date: NaiveDate,
    pub photo: Option<String>,
    pub mention: String,
    pub weight: Option<f64>,
    pub dry_food: Option<f64>,
    pub wet_food: Option<f64>,
    pub poop_count: Option<u32>,
    pub pee_count: Option<u32>,
    pub vomit_count: Option<u32>,
    pub vomit_type: Vec<String>,
    pub fluid_amount: Option<f64>,
    /// Medication ids by value. Nothing guarantees they still resolve.
    pub taken_medications: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement payload for a diary day. Absent fields are stored as
/// absent; nothing is merged with the previous record except `created_at`.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveDiaryEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub mention: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Dry food must not be negative"))]
    pub dry_food: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Wet food must not be negative"))]
    pub wet_food: Option<f64>,
    #[serde(default)]
    pub poop_count: Option<u32>,
    #[serde(default)]
    pub pee_count: Option<u32>,
    #[serde(default)]
    pub vomit_count: Option<u32>,
    #[serde(default)]
    pub vomit_type: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Fluid amount must not be negative"))]
    pub fluid_amount: Option<f64>,
    #[serde(default)]
    pub taken_medications: Vec<i64>,
    /// Resupplied by callers editing an existing day. When absent the stored
    /// value is kept, or the save time is used for a new day.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SaveDiaryEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            photo: None,
            mention: String::new(),
            weight: None,
            dry_food: None,
            wet_food: None,
            poop_count: None,
            pee_count: None,
            vomit_count: None,
            vomit_type: Vec::new(),
            fluid_amount: None,
            taken_medications: Vec::new(),
            created_at: None,
        }
    }

    /// Checks field constraints. Runs before any storage access.
    pub fn check(&self) -> StoreResult<()> {
        self.validate()?;

        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(StoreError::Validation(
                    "Weight must be a positive number".into(),
                ));
            }
        }

        let amounts = [
            ("Dry food", self.dry_food),
            ("Wet food", self.wet_food),
            ("Fluid amount", self.fluid_amount),
        ];
        for (label, value) in amounts {
            if matches!(value, Some(v) if !v.is_finite()) {
                return Err(StoreError::Validation(format!(
                    "{label} must be a finite number"
                )));
            }
        }

        Ok(())
    }
}

impl From<DiaryEntry> for SaveDiaryEntry {
    fn from(entry: DiaryEntry) -> Self {
        Self {
            date: entry.date,
            photo: entry.photo,
            mention: entry.mention,
            weight: entry.weight,
            dry_food: entry.dry_food,
            wet_food: entry.wet_food,
            poop_count: entry.poop_count,
            pee_count: entry.pee_count,
            vomit_count: entry.vomit_count,
            vomit_type: entry.vomit_type,
            fluid_amount: entry.fluid_amount,
            taken_medications: entry.taken_medications,
            created_at: Some(entry.created_at),
        }
    }
}
