//! Scenario API Handlers

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

/// GET /scenarios
pub async fn list_scenarios(State(state): State<AppState>) -> ApiResult<Json<Vec<Model>>> {
    tracing::debug!("Listing all scenarios");

    let scenarios = state.engine.scenarios.get_all().await?;
    Ok(Json(to_models(scenarios)))
}

/// GET /scenarios/{id}
pub async fn get_scenario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::debug!("Getting scenario: {}", id);

    let scenario = state
        .engine
        .scenarios
        .get(&id)
        .await?
        .ok_or_else(|| EngineError::not_found(EntityKind::Scenario, &id))?;
    item(scenario)
}

/// POST /scenarios?config_id={config_id}
/// Scenarios whose configuration has a frequency are attached to the current
/// cycle of that frequency.
pub async fn create_scenario(
    State(state): State<AppState>,
    Query(query): Query<ConfigIdQuery>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let config_id = query.require()?;
    tracing::info!("Creating scenario from config: {}", config_id);

    let config = state.engine.scenario_config(&config_id)?;
    let scenario = state.engine.scenarios.get_or_create(config).await?;
    created(scenario)
}

/// DELETE /scenarios/{id}
pub async fn delete_scenario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Deleting scenario: {}", id);

    state.engine.scenarios.delete(&id).await?;
    Ok(deleted(EntityKind::Scenario, &id))
}

/// POST /scenarios/submit/{id}
pub async fn submit_scenario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Submitting scenario: {}", id);

    let jobs = state.engine.scenarios.submit(&id).await?;
    tracing::debug!("Scenario {} produced {} job(s)", id, jobs.len());
    Ok(acknowledged(EntityKind::Scenario, &id, "submitted"))
}
