use axum::{routing::get, Router};

use todoapp_storage::DbState;

pub mod health;

/// Todo routes plus the health probe
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(todoapp_api::create_router(db))
}
