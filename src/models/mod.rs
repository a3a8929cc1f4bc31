pub mod diary_entry;
pub mod medication;

pub use diary_entry::{DiaryEntry, SaveDiaryEntry};
pub use medication::{Medication, MedicationType, NewMedication};
