// ABOUTME: Todo storage layer using SQLite
// ABOUTME: One fixed parameterized statement per filter combination and update column

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::{StorageError, StorageResult};
use todoapp_core::{
    normalize_due_date, FilterCombination, NewTodo, Todo, TodoFilter, TodoUpdate,
};

/// Expands to the list statement with extra equality predicates appended
macro_rules! select_todos {
    ($predicates:literal) => {
        concat!(
            "SELECT id, todo, priority, status, category, due_date FROM todo ",
            "WHERE todo LIKE ? ESCAPE '\\' ",
            $predicates,
            " ORDER BY id"
        )
    };
}

const LIST_BY_STATUS_PRIORITY_CATEGORY: &str =
    select_todos!("AND status = ? AND priority = ? AND category = ?");
const LIST_BY_STATUS_PRIORITY: &str = select_todos!("AND status = ? AND priority = ?");
const LIST_BY_STATUS_CATEGORY: &str = select_todos!("AND status = ? AND category = ?");
const LIST_BY_PRIORITY_CATEGORY: &str = select_todos!("AND priority = ? AND category = ?");
const LIST_BY_STATUS: &str = select_todos!("AND status = ?");
const LIST_BY_PRIORITY: &str = select_todos!("AND priority = ?");
const LIST_BY_CATEGORY: &str = select_todos!("AND category = ?");
const LIST_ALL: &str = select_todos!("");

pub struct TodoStorage {
    pool: SqlitePool,
}

impl TodoStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Rows whose text contains the search term and which match the
    /// filter combination selected by precedence
    pub async fn list_todos(&self, filter: &TodoFilter) -> StorageResult<Vec<Todo>> {
        let combination = filter.combination();
        let pattern = filter.search_pattern();

        debug!("Listing todos with {:?} and pattern {:?}", combination, pattern);

        let query = match combination {
            FilterCombination::StatusPriorityCategory {
                status,
                priority,
                category,
            } => sqlx::query_as::<_, Todo>(LIST_BY_STATUS_PRIORITY_CATEGORY)
                .bind(pattern)
                .bind(status)
                .bind(priority)
                .bind(category),
            FilterCombination::StatusPriority { status, priority } => {
                sqlx::query_as::<_, Todo>(LIST_BY_STATUS_PRIORITY)
                    .bind(pattern)
                    .bind(status)
                    .bind(priority)
            }
            FilterCombination::StatusCategory { status, category } => {
                sqlx::query_as::<_, Todo>(LIST_BY_STATUS_CATEGORY)
                    .bind(pattern)
                    .bind(status)
                    .bind(category)
            }
            FilterCombination::PriorityCategory { priority, category } => {
                sqlx::query_as::<_, Todo>(LIST_BY_PRIORITY_CATEGORY)
                    .bind(pattern)
                    .bind(priority)
                    .bind(category)
            }
            FilterCombination::Status(status) => sqlx::query_as::<_, Todo>(LIST_BY_STATUS)
                .bind(pattern)
                .bind(status),
            FilterCombination::Priority(priority) => sqlx::query_as::<_, Todo>(LIST_BY_PRIORITY)
                .bind(pattern)
                .bind(priority),
            FilterCombination::Category(category) => sqlx::query_as::<_, Todo>(LIST_BY_CATEGORY)
                .bind(pattern)
                .bind(category),
            FilterCombination::Unfiltered => sqlx::query_as::<_, Todo>(LIST_ALL).bind(pattern),
        };

        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn get_todo(&self, id: i64) -> StorageResult<Todo> {
        debug!("Fetching todo: {}", id);

        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, todo, priority, status, category, due_date
            FROM todo
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Agenda: every todo whose stored date text equals the normalized day
    pub async fn list_todos_due_on(&self, due_date: NaiveDate) -> StorageResult<Vec<Todo>> {
        debug!("Listing todos due on {}", due_date);

        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, todo, priority, status, category, due_date
            FROM todo
            WHERE due_date = ?
            ORDER BY id
            "#,
        )
        .bind(normalize_due_date(due_date))
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    pub async fn create_todo(&self, input: NewTodo) -> StorageResult<Todo> {
        debug!("Creating todo: {}", input.id);

        let result = sqlx::query(
            r#"
            INSERT INTO todo (id, todo, priority, status, category, due_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.id)
        .bind(&input.todo)
        .bind(input.priority)
        .bind(input.status)
        .bind(input.category)
        .bind(normalize_due_date(input.due_date))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Todo::from(input)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StorageError::Duplicate(input.id))
            }
            Err(e) => Err(StorageError::Sqlx(e)),
        }
    }

    /// Writes the single column selected by the update; returns rows affected
    pub async fn update_todo(&self, id: i64, update: &TodoUpdate) -> StorageResult<u64> {
        debug!("Updating todo {}: {:?}", id, update);

        // Pre-written statements per column; the column name never comes from input
        let query = match update {
            TodoUpdate::Status(status) => {
                sqlx::query("UPDATE todo SET status = ? WHERE id = ?").bind(*status)
            }
            TodoUpdate::Priority(priority) => {
                sqlx::query("UPDATE todo SET priority = ? WHERE id = ?").bind(*priority)
            }
            TodoUpdate::Category(category) => {
                sqlx::query("UPDATE todo SET category = ? WHERE id = ?").bind(*category)
            }
            TodoUpdate::DueDate(due_date) => {
                sqlx::query("UPDATE todo SET due_date = ? WHERE id = ?")
                    .bind(normalize_due_date(*due_date))
            }
            TodoUpdate::Text(text) => sqlx::query("UPDATE todo SET todo = ? WHERE id = ?").bind(text),
        };

        let result = query.bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Idempotent: deleting an absent id is not an error
    pub async fn delete_todo(&self, id: i64) -> StorageResult<u64> {
        debug!("Deleting todo: {}", id);

        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
