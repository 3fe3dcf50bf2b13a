//! Pipeline API Handlers
//!
//! HTTP endpoints for pipeline management and submission.

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

/// GET /pipelines
/// List all pipelines
pub async fn list_pipelines(State(state): State<AppState>) -> ApiResult<Json<Vec<Model>>> {
    tracing::debug!("Listing all pipelines");

    let pipelines = state.engine.pipelines.get_all().await?;
    Ok(Json(to_models(pipelines)))
}

/// GET /pipelines/{id}
/// Get pipeline by ID
pub async fn get_pipeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::debug!("Getting pipeline: {}", id);

    let pipeline = state
        .engine
        .pipelines
        .get(&id)
        .await?
        .ok_or_else(|| EngineError::not_found(EntityKind::Pipeline, &id))?;
    item(pipeline)
}

/// POST /pipelines?config_id={config_id}
/// Get or create the pipeline of a configuration, with its tasks and data nodes
pub async fn create_pipeline(
    State(state): State<AppState>,
    Query(query): Query<ConfigIdQuery>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let config_id = query.require()?;
    tracing::info!("Creating pipeline from config: {}", config_id);

    let config = state.engine.pipeline_config(&config_id)?;
    let pipeline = state.engine.pipelines.get_or_create(config).await?;
    created(pipeline)
}

/// DELETE /pipelines/{id}
/// Delete a pipeline
pub async fn delete_pipeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Deleting pipeline: {}", id);

    state.engine.pipelines.delete(&id).await?;
    Ok(deleted(EntityKind::Pipeline, &id))
}

/// POST /pipelines/submit/{id}
/// Submit every task of a pipeline
pub async fn submit_pipeline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Submitting pipeline: {}", id);

    let jobs = state.engine.pipelines.submit(&id).await?;
    tracing::debug!("Pipeline {} produced {} job(s)", id, jobs.len());
    Ok(acknowledged(EntityKind::Pipeline, &id, "submitted"))
}
