use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::error::ApiError;
use crate::state::AppState;
use super::dto::{CreateTask, NewTask, TaskChanges, UpdateTask};

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateTask>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let task = NewTask::try_from(json_body(body)?)?;

    let created = state.store.create(&task).await?;
    tracing::info!(id = created.id, "task created");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tasks = state.store.list().await?;

    Ok(Json(tasks))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let changes = TaskChanges::try_from(json_body(body)?)?;

    match state.store.update(id, &changes).await? {
        Some(task) => Ok(Json(task)),
        None => Err(not_found(id)),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;

    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "task deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::validation(rejection.body_text()))
}

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("task id must be an integer, got {raw:?}")))
}

fn not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("task {id} not found"))
}
