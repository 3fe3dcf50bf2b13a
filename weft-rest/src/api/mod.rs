//! API Module
//!
//! HTTP API layer over the engine.
//! Each submodule handles endpoints for one entity kind.

pub mod cycle;
pub mod datanode;
pub mod error;
pub mod health;
pub mod job;
pub mod pipeline;
pub mod scenario;
pub mod schema;
pub mod task;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;
use weft_core::convert::{Entity, EntityKind, to_model};

use crate::api::error::{ApiError, ApiResult};
use crate::middleware::authorize;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Cycle endpoints
        .route("/cycles", get(cycle::list_cycles).post(cycle::create_cycle))
        .route(
            "/cycles/{id}",
            get(cycle::get_cycle).delete(cycle::delete_cycle),
        )
        // Data node endpoints
        .route(
            "/datanodes",
            get(datanode::list_data_nodes).post(datanode::create_data_node),
        )
        .route(
            "/datanodes/{id}",
            get(datanode::get_data_node).delete(datanode::delete_data_node),
        )
        .route("/datanodes/{id}/read", get(datanode::read_data_node))
        .route("/datanodes/{id}/write", put(datanode::write_data_node))
        // Task endpoints
        .route("/tasks", get(task::list_tasks).post(task::create_task))
        .route("/tasks/{id}", get(task::get_task).delete(task::delete_task))
        .route("/tasks/submit/{id}", post(task::submit_task))
        // Pipeline endpoints
        .route(
            "/pipelines",
            get(pipeline::list_pipelines).post(pipeline::create_pipeline),
        )
        .route(
            "/pipelines/{id}",
            get(pipeline::get_pipeline).delete(pipeline::delete_pipeline),
        )
        .route("/pipelines/submit/{id}", post(pipeline::submit_pipeline))
        // Scenario endpoints
        .route(
            "/scenarios",
            get(scenario::list_scenarios).post(scenario::create_scenario),
        )
        .route(
            "/scenarios/{id}",
            get(scenario::get_scenario).delete(scenario::delete_scenario),
        )
        .route("/scenarios/submit/{id}", post(scenario::submit_scenario))
        // Job endpoints
        .route("/jobs", get(job::list_jobs).post(job::create_job))
        .route("/jobs/{id}", get(job::get_job).delete(job::delete_job))
        .route("/jobs/cancel/{id}", post(job::cancel_job))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api)
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared request and response shapes
// ─────────────────────────────────────────────────────────────────────────────

/// `?config_id=` on creation endpoints
#[derive(Debug, Deserialize)]
pub struct ConfigIdQuery {
    pub config_id: Option<String>,
}

impl ConfigIdQuery {
    pub fn require(self) -> ApiResult<String> {
        self.config_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(ApiError::config_id_missing)
    }
}

fn with_model(mut body: Map<String, Value>, entity: Entity) -> ApiResult<Json<Value>> {
    let key = entity.kind().key();
    let model = serde_json::to_value(to_model(&entity))
        .map_err(|e| ApiError::InternalError(format!("Failed to serialize {}: {}", key, e)))?;
    body.insert(key.to_string(), model);
    Ok(Json(Value::Object(body)))
}

/// `{"<key>": model}`
pub(crate) fn item(entity: impl Into<Entity>) -> ApiResult<Json<Value>> {
    with_model(Map::new(), entity.into())
}

/// 201 `{"message": "<Kind> was created.", "<key>": model}`
pub(crate) fn created(entity: impl Into<Entity>) -> ApiResult<(StatusCode, Json<Value>)> {
    let entity = entity.into();
    let mut body = Map::new();
    body.insert(
        "message".to_string(),
        Value::String(format!("{} was created.", entity.kind())),
    );
    Ok((StatusCode::CREATED, with_model(body, entity)?))
}

/// `{"msg": "<kind> <id> deleted"}`
pub(crate) fn deleted(kind: EntityKind, id: &str) -> Json<Value> {
    Json(serde_json::json!({
        "msg": format!("{} {} deleted", kind.label().to_lowercase(), id)
    }))
}

/// `{"message": "<Kind> <id> was <action>."}`
pub(crate) fn acknowledged(kind: EntityKind, id: &str, action: &str) -> Json<Value> {
    Json(serde_json::json!({
        "message": format!("{} {} was {}.", kind, id, action)
    }))
}
