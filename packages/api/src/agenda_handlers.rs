// ABOUTME: HTTP request handler for the agenda view
// ABOUTME: Lists todos due on a single normalized date

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;

use crate::error::{ApiResult, QueryPairs};
use todoapp_core::{normalize_due_date, AgendaQuery, TodoResponse};
use todoapp_storage::DbState;

/// List todos due on the requested date
pub async fn get_agenda(
    State(db): State<DbState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let Query(pairs) = query?;
    // The parsed date is request-local and flows straight into the query
    let due_date = pairs.into_iter().collect::<AgendaQuery>().validate()?;

    info!("Listing agenda for {}", normalize_due_date(due_date));

    let todos = db.todo_storage.list_todos_due_on(due_date).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}
