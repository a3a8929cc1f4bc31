//! Local care diary: daily health observations for a pet and the list of
//! medications it takes, stored in an embedded SQLite database.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use db::{Database, DiaryStore, MedicationStore};
pub use error::{StoreError, StoreResult};
