//! Task API Handlers
//!
//! HTTP endpoints for task management and submission.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use weft_core::convert::{EntityKind, Model, to_models};
use weft_core::engine::EngineError;

use crate::api::error::ApiResult;
use crate::api::{ConfigIdQuery, acknowledged, created, deleted, item};
use crate::state::AppState;

/// GET /tasks
/// List all tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Model>>> {
    tracing::debug!("Listing all tasks");

    let tasks = state.engine.tasks.get_all().await?;
    Ok(Json(to_models(tasks)))
}

/// GET /tasks/{id}
/// Get task by ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::debug!("Getting task: {}", id);

    let task = state
        .engine
        .tasks
        .get(&id)
        .await?
        .ok_or_else(|| EngineError::not_found(EntityKind::Task, &id))?;
    item(task)
}

/// POST /tasks?config_id={config_id}
/// Get or create the task of a configuration
pub async fn create_task(
    State(state): State<AppState>,
    Query(query): Query<ConfigIdQuery>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let config_id = query.require()?;
    tracing::info!("Creating task from config: {}", config_id);

    let config = state.engine.task_config(&config_id)?;
    let task = state.engine.tasks.get_or_create(config).await?;
    created(task)
}

/// DELETE /tasks/{id}
/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Deleting task: {}", id);

    state.engine.tasks.delete(&id).await?;
    Ok(deleted(EntityKind::Task, &id))
}

/// POST /tasks/submit/{id}
/// Submit a task for execution
pub async fn submit_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Submitting task: {}", id);

    let jobs = state.engine.tasks.submit(&id).await?;
    tracing::debug!("Task {} produced {} job(s)", id, jobs.len());
    Ok(acknowledged(EntityKind::Task, &id, "submitted"))
}
