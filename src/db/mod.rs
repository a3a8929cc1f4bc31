pub mod diary;
pub mod medication;
pub mod pool;

pub use diary::DiaryStore;
pub use medication::MedicationStore;
pub use pool::Database;
