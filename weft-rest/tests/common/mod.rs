//! Common test utilities for router tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use weft_core::config::Configuration;
use weft_core::engine::Engine;
use weft_rest::middleware::TokenRoles;
use weft_rest::{AppState, create_router};

pub const CONFIG: &str = r#"{
    "data_nodes": {
        "numbers": { "properties": { "default_data": [
            {"n": 1, "parity": "odd"},
            {"n": 2, "parity": "even"},
            {"n": 3, "parity": "odd"},
            {"n": 4, "parity": "even"}
        ] } },
        "doubled": { "storage_type": "json" }
    },
    "tasks": {
        "double": { "inputs": ["numbers"], "outputs": ["doubled"], "function_name": "double", "function_module": "algos" }
    },
    "pipelines": { "doubling": { "tasks": ["double"] } },
    "scenarios": { "monthly": { "pipelines": ["doubling"], "frequency": "MONTHLY" } }
}"#;

pub fn engine() -> Engine {
    Engine::in_memory(Configuration::from_json_str(CONFIG).unwrap())
}

/// Router with every request allowed
pub fn app() -> Router {
    create_router(AppState::new(engine()))
}

/// Router with role checks for the `reader`, `editor` and `executor` tokens
pub fn secured_app() -> Router {
    use weft_rest::middleware::Role;

    let roles = TokenRoles::default()
        .with_token("reader", &[Role::Reader])
        .with_token("editor", &[Role::Reader, Role::Editor])
        .with_token("executor", &[Role::Reader, Role::Executor]);
    create_router(AppState::new(engine()).with_authorization(Arc::new(roles)))
}

pub struct TestRequest {
    method: Method,
    uri: String,
    body: Option<String>,
    token: Option<String>,
}

impl TestRequest {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            body: None,
            token: None,
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn raw(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Send through the router; non-JSON bodies come back as a JSON string
    pub async fn send(self, app: &Router) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if self.body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder
            .body(self.body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }
}

/// Create an entity from a configuration and return its id
pub async fn create(app: &Router, collection: &str, key: &str, config_id: &str) -> String {
    let uri = format!("/api/v1/{}?config_id={}", collection, config_id);
    let (status, body) = TestRequest::post(&uri).send(app).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body[key]["id"].as_str().unwrap().to_string()
}
