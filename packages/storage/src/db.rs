// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and todo storage

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::todos::TodoStorage;
use crate::StorageError;

const CREATE_TODO_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS todo (
        id INTEGER NOT NULL PRIMARY KEY,
        todo TEXT NOT NULL,
        priority TEXT NOT NULL,
        status TEXT NOT NULL,
        category TEXT NOT NULL,
        due_date TEXT NOT NULL
    )
"#;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub todo_storage: Arc<TodoStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let todo_storage = Arc::new(TodoStorage::new(pool.clone()));
        Self { pool, todo_storage }
    }

    /// Open (creating if missing) the database file and make sure the
    /// `todo` table exists
    pub async fn init_with_path(database_path: &Path) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        debug!("Connecting to database: {}", database_path.display());

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;

        ensure_schema(&pool).await?;

        info!("Database connection established");

        Ok(Self::new(pool))
    }

    /// Single-connection in-memory database, used by tests
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // Every connection to :memory: is a separate database, so keep exactly one alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        ensure_schema(&pool).await?;

        Ok(Self::new(pool))
    }
}

/// Create the `todo` table when it is absent; existing tables are left untouched
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(CREATE_TODO_TABLE).execute(pool).await?;
    Ok(())
}
