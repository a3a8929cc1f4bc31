pub mod care_summary;
pub mod dates;
