//! Data Node API Handlers
//!
//! HTTP endpoints for data nodes, including reading and writing their
//! content.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use weft_core::convert::{EntityKind, Model, to_models};
use weft_core::engine::EngineError;

use crate::api::error::ApiResult;
use crate::api::schema::{parse_filter, parse_value};
use crate::api::{ConfigIdQuery, acknowledged, created, deleted, item};
use crate::state::AppState;

/// GET /datanodes
/// List all data nodes
pub async fn list_data_nodes(State(state): State<AppState>) -> ApiResult<Json<Vec<Model>>> {
    tracing::debug!("Listing all data nodes");

    let data_nodes = state.engine.data_nodes.get_all().await?;
    Ok(Json(to_models(data_nodes)))
}

/// GET /datanodes/{id}
/// Get data node by ID
pub async fn get_data_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::debug!("Getting data node: {}", id);

    let data_node = state
        .engine
        .data_nodes
        .get(&id)
        .await?
        .ok_or_else(|| EngineError::not_found(EntityKind::DataNode, &id))?;
    item(data_node)
}

/// POST /datanodes?config_id={config_id}
/// Get or create the data node of a configuration
pub async fn create_data_node(
    State(state): State<AppState>,
    Query(query): Query<ConfigIdQuery>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let config_id = query.require()?;
    tracing::info!("Creating data node from config: {}", config_id);

    let config = state.engine.data_node_config(&config_id)?;
    let data_node = state.engine.data_nodes.get_or_create(config).await?;
    created(data_node)
}

/// DELETE /datanodes/{id}
/// Delete a data node and its content
pub async fn delete_data_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    tracing::info!("Deleting data node: {}", id);

    state.engine.data_nodes.delete(&id).await?;
    Ok(deleted(EntityKind::DataNode, &id))
}

/// GET /datanodes/{id}/read
/// Read the content of a data node, optionally filtered by a JSON body
pub async fn read_data_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let filter = parse_filter(&body)?;
    tracing::debug!(
        "Reading data node: {} ({} condition(s))",
        id,
        filter.as_ref().map_or(0, |f| f.conditions.len())
    );

    let data = state.engine.data_nodes.read(&id, filter.as_ref()).await?;
    Ok(Json(serde_json::json!({ "data": data })))
}

/// PUT /datanodes/{id}/write
/// Replace the content of a data node with the JSON body
pub async fn write_data_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let data = parse_value(&body)?;
    tracing::info!("Writing data node: {}", id);

    state.engine.data_nodes.write(&id, data).await?;
    Ok(acknowledged(EntityKind::DataNode, &id, "written"))
}
