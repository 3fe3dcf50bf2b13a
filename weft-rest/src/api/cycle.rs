//! Cycle API Handlers
//!
//! Cycles are the only kind created from a request body instead of a
//! configuration id.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use weft_core::convert::{EntityKind, Model, to_model, to_models};
use weft_core::engine::EngineError;

use crate::api::deleted;
use crate::api::error::{ApiError, ApiResult};
use crate::api::item;
use crate::api::schema::CycleRequest;
use crate::state::AppState;

/// GET /cycles
/// List all cycles
pub async fn list_cycles(State(state): State<AppState>) -> ApiResult<Json<Vec<Model>>> {
    tracing::debug!("Listing all cycles");

    let cycles = state.engine.cycles.get_all().await?;
    Ok(Json(to_models(cycles)))
}

/// GET /cycles/{id}
/// Get cycle by ID
pub async fn get_cycle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::debug!("Getting cycle: {}", id);

    let cycle = state
        .engine
        .cycles
        .get(&id)
        .await?
        .ok_or_else(|| EngineError::not_found(EntityKind::Cycle, &id))?;
    item(cycle)
}

/// POST /cycles
/// Create a cycle from a JSON body
pub async fn create_cycle(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let cycle = CycleRequest::parse(&body)?.into_cycle();
    tracing::info!("Creating cycle: {} ({})", cycle.id, cycle.frequency);

    state.engine.cycles.set(cycle.clone()).await?;

    let model = serde_json::to_value(to_model(&cycle.into()))
        .map_err(|e| ApiError::InternalError(format!("Failed to serialize cycle: {}", e)))?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "msg": "Cycle created", "cycle": model })),
    ))
}

/// DELETE /cycles/{id}
/// Delete a cycle
pub async fn delete_cycle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Deleting cycle: {}", id);

    state.engine.cycles.delete(&id).await?;
    Ok(deleted(EntityKind::Cycle, &id))
}
