//! Job API Handlers
//!
//! Jobs are execution records. They are created by submitting tasks,
//! pipelines or scenarios, or directly from a task configuration here.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use weft_core::convert::{EntityKind, Model, to_models};
use weft_core::engine::EngineError;

use crate::api::error::{ApiError, ApiResult};
use crate::api::{acknowledged, created, deleted, item};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TaskIdQuery {
    pub task_id: Option<String>,
}

/// GET /jobs
/// List all jobs
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<Model>>> {
    tracing::debug!("Listing all jobs");

    let jobs = state.engine.jobs.get_all().await?;
    Ok(Json(to_models(jobs)))
}

/// GET /jobs/{id}
/// Get job by ID
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::debug!("Getting job: {}", id);

    let job = state
        .engine
        .jobs
        .get(&id)
        .await?
        .ok_or_else(|| EngineError::not_found(EntityKind::Job, &id))?;
    item(job)
}

/// POST /jobs?task_id={task_config_id}
/// Record a job for the task of a configuration
pub async fn create_job(
    State(state): State<AppState>,
    Query(query): Query<TaskIdQuery>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let task_id = query
        .task_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(ApiError::task_id_missing)?;
    tracing::info!("Creating job for task config: {}", task_id);

    let config = state.engine.task_config(&task_id)?;
    let job = state.engine.jobs.create(config).await?;
    created(job)
}

/// DELETE /jobs/{id}
/// Delete a job
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Deleting job: {}", id);

    state.engine.jobs.delete(&id).await?;
    Ok(deleted(EntityKind::Job, &id))
}

/// POST /jobs/cancel/{id}
/// Cancel a job; finished jobs are left as they are
pub async fn cancel_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Cancelling job: {}", id);

    let job = state.engine.jobs.cancel(&id).await?;
    tracing::debug!("Job {} is {:?}", id, job.status);
    Ok(acknowledged(EntityKind::Job, &id, "cancelled"))
}
