// ABOUTME: HTTP request handlers for todo operations
// ABOUTME: Validates input, runs the matching storage statement, maps rows to responses

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::info;

use crate::error::{ApiResult, QueryPairs};
use todoapp_core::{
    parse_todo_id, CreateTodoRequest, TodoQuery, TodoResponse, TodoUpdate, UpdateTodoRequest,
};
use todoapp_storage::DbState;

/// List todos matching the search term and the selected filter combination
pub async fn list_todos(
    State(db): State<DbState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<Vec<TodoResponse>>> {
    let Query(pairs) = query?;
    let filter = pairs.into_iter().collect::<TodoQuery>().validate()?;

    info!("Listing todos: {:?}", filter.combination());

    let todos = db.todo_storage.list_todos(&filter).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Get a single todo by ID
pub async fn get_todo(
    State(db): State<DbState>,
    Path(todo_id): Path<String>,
) -> ApiResult<Json<TodoResponse>> {
    let id = parse_todo_id(&todo_id)?;

    info!("Getting todo: {}", id);

    let todo = db.todo_storage.get_todo(id).await?;
    Ok(Json(TodoResponse::from(todo)))
}

/// Create a new todo
pub async fn create_todo(
    State(db): State<DbState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(request) = payload?;
    let input = request.validate()?;

    info!("Creating todo {} due {}", input.id, input.due_date);

    db.todo_storage.create_todo(input).await?;
    Ok("Todo Successfully Added")
}

/// Update the single field selected by first match
pub async fn update_todo(
    State(db): State<DbState>,
    Path(todo_id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    let id = parse_todo_id(&todo_id)?;
    let Json(request) = payload?;
    let update = TodoUpdate::try_from(request)?;

    info!("Updating todo {}: {:?}", id, update);

    db.todo_storage.update_todo(id, &update).await?;
    Ok(update.success_message())
}

/// Delete a todo; absent ids still succeed
pub async fn delete_todo(
    State(db): State<DbState>,
    Path(todo_id): Path<String>,
) -> ApiResult<&'static str> {
    let id = parse_todo_id(&todo_id)?;

    info!("Deleting todo: {}", id);

    db.todo_storage.delete_todo(id).await?;
    Ok("Todo Deleted")
}
