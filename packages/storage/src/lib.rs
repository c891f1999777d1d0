// ABOUTME: Data layer and persistence for the todo service
// ABOUTME: SQLite pool bootstrap and parameterized todo statements

use thiserror::Error;

pub mod db;
pub mod todos;

pub use db::DbState;
pub use todos::TodoStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Todo not found")]
    NotFound,
    #[error("Todo with id {0} already exists")]
    Duplicate(i64),
}

pub type StorageResult<T> = Result<T, StorageError>;
