use std::path::Path;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

mod health;
pub mod tasks;

pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/tasks", get(tasks::routes::list).post(tasks::routes::create))
        .route(
            "/tasks/{id}",
            put(tasks::routes::update).delete(tasks::routes::delete),
        )
}

/// The API plus, when `static_dir` is given, the browser client as a fallback.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut app = routes().with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
