// ABOUTME: HTTP API layer for the todo service providing REST endpoints and routing
// ABOUTME: Integration layer over the core validation and storage packages

use axum::{routing::get, Router};

use todoapp_storage::DbState;

pub mod agenda_handlers;
pub mod error;
pub mod todos_handlers;

pub use error::{ApiError, ApiResult};

/// Creates the todos API router. Each path is served with and without a
/// trailing slash.
pub fn create_todos_router() -> Router<DbState> {
    Router::new()
        .route(
            "/todos",
            get(todos_handlers::list_todos).post(todos_handlers::create_todo),
        )
        .route(
            "/todos/",
            get(todos_handlers::list_todos).post(todos_handlers::create_todo),
        )
        .route(
            "/todos/{todo_id}",
            get(todos_handlers::get_todo)
                .put(todos_handlers::update_todo)
                .delete(todos_handlers::delete_todo),
        )
        .route(
            "/todos/{todo_id}/",
            get(todos_handlers::get_todo)
                .put(todos_handlers::update_todo)
                .delete(todos_handlers::delete_todo),
        )
}

/// Creates the agenda API router
pub fn create_agenda_router() -> Router<DbState> {
    Router::new()
        .route("/agenda", get(agenda_handlers::get_agenda))
        .route("/agenda/", get(agenda_handlers::get_agenda))
}

/// All todo service routes bound to the database state
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .merge(create_todos_router())
        .merge(create_agenda_router())
        .with_state(db)
}
