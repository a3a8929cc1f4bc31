//! Joins a diary entry with the medication list for display.
//!
//! Medication references in a diary entry are plain ids and may outlive the
//! medication they point at. Every helper here skips such dangling ids
//! instead of failing.

use std::collections::HashSet;

use crate::models::diary_entry::DiaryEntry;
use crate::models::medication::{Medication, MedicationType};

/// Medications recorded as taken on `entry`, in the order of `all`.
pub fn resolve_taken_medications<'m>(
    entry: &DiaryEntry,
    all: &'m [Medication],
) -> Vec<&'m Medication> {
    let taken: HashSet<i64> = entry.taken_medications.iter().copied().collect();

    all.iter().filter(|m| taken.contains(&m.id)).collect()
}

/// Ids in `entry.taken_medications` that match no medication in `all`.
pub fn dangling_medication_ids(entry: &DiaryEntry, all: &[Medication]) -> Vec<i64> {
    let known: HashSet<i64> = all.iter().map(|m| m.id).collect();

    let mut seen = HashSet::new();
    entry
        .taken_medications
        .iter()
        .copied()
        .filter(|id| !known.contains(id) && seen.insert(*id))
        .collect()
}

/// Whether the entry carries any check item. A recorded zero counts.
pub fn has_recorded_observations(entry: &DiaryEntry) -> bool {
    entry.weight.is_some()
        || entry.dry_food.is_some()
        || entry.wet_food.is_some()
        || entry.poop_count.is_some()
        || entry.pee_count.is_some()
        || entry.vomit_count.is_some()
        || entry.fluid_amount.is_some()
        || !entry.taken_medications.is_empty()
}

/// Prescriptions first, supplements second; each keeps the order of `all`.
pub fn split_by_type(all: &[Medication]) -> (Vec<&Medication>, Vec<&Medication>) {
    all.iter()
        .partition(|m| m.medication_type == MedicationType::Prescription)
}

/// `건45g, 습80g`
pub fn food_summary(entry: &DiaryEntry) -> Option<String> {
    let parts: Vec<String> = [
        entry.dry_food.map(|g| format!("건{}g", g)),
        entry.wet_food.map(|g| format!("습{}g", g)),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

/// `💧3 💩2`
pub fn litter_summary(entry: &DiaryEntry) -> Option<String> {
    let parts: Vec<String> = [
        entry.pee_count.map(|n| format!("💧{}", n)),
        entry.poop_count.map(|n| format!("💩{}", n)),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(" "))
}
