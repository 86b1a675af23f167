use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthData {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthData>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthData { ok: true, error: None })),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthData { ok: false, error: Some(e.to_string()) }),
            )
        }
    }
}
