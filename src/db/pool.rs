use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::db::diary::DiaryStore;
use crate::db::medication::MedicationStore;
use crate::error::StoreResult;

/// Owner of the storage connection. Built once by the application and lent
/// to the stores; opening is lazy and happens at most once per handle.
#[derive(Debug)]
pub struct Database {
    config: Config,
    pool: OnceCell<SqlitePool>,
}

impl Database {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Connects and applies pending migrations on first call. Later calls
    /// return the same pool without touching the database.
    pub async fn open(&self) -> StoreResult<&SqlitePool> {
        self.pool
            .get_or_try_init(|| create_pool(&self.config))
            .await
    }

    pub fn is_open(&self) -> bool {
        self.pool.initialized()
    }

    /// Highest applied migration version.
    pub async fn schema_version(&self) -> StoreResult<i64> {
        let pool = self.open().await?;

        let version = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1",
        )
        .fetch_one(pool)
        .await?;

        Ok(version.unwrap_or(0))
    }

    pub fn diaries(&self) -> DiaryStore<'_> {
        DiaryStore::new(self)
    }

    pub fn medications(&self) -> MedicationStore<'_> {
        MedicationStore::new(self)
    }

    pub async fn close(self) {
        if let Some(pool) = self.pool.into_inner() {
            pool.close().await;
            tracing::info!("Database closed");
        }
    }
}

async fn create_pool(config: &Config) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

    // Dropping the only connection would drop the in-memory database with it.
    if config.is_in_memory() {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!(database_url = %config.database_url, "Database migrations applied");

    Ok(pool)
}
