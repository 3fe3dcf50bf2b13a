//! Authorization middleware
//!
//! Every `/api/v1` route runs through [`authorize`], which extracts the bearer
//! token, works out the role the route needs and hands both, together with the
//! request and the rest of the chain, to the [`AuthorizationMiddleware`]
//! installed in [`AppState`]. The default implementation lets everything
//! through.

use anyhow::Context;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::api::error::ApiError;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Roles
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Reader,
    Editor,
    Executor,
}

impl Role {
    /// Role a request needs: reads need `READER`, submit and cancel need
    /// `EXECUTOR`, every other mutation needs `EDITOR`.
    pub fn required_for(method: &Method, path: &str) -> Self {
        if method == Method::GET {
            Role::Reader
        } else if path.contains("/submit/") || path.contains("/cancel/") {
            Role::Executor
        } else {
            Role::Editor
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Reader => write!(f, "READER"),
            Role::Editor => write!(f, "EDITOR"),
            Role::Executor => write!(f, "EXECUTOR"),
        }
    }
}

/// What the caller presented and what the route demands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub token: Option<String>,
    pub role: Role,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Absent, non-ASCII or non-bearer headers all yield `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait AuthorizationMiddleware: Send + Sync {
    /// Either short-circuit with a response or run `next`
    async fn handle(&self, access: AccessRequest, request: Request, next: Next) -> Response;
}

/// Runs every request unchecked
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl AuthorizationMiddleware for AllowAll {
    async fn handle(&self, _access: AccessRequest, request: Request, next: Next) -> Response {
        next.run(request).await
    }
}

/// Static token to roles table
///
/// File format: `{"<token>": ["READER", "EDITOR"], ...}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TokenRoles {
    tokens: HashMap<String, HashSet<Role>>,
}

impl TokenRoles {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read auth file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse auth file {}", path.display()))
    }

    pub fn with_token(mut self, token: &str, roles: &[Role]) -> Self {
        self.tokens
            .insert(token.to_string(), roles.iter().copied().collect());
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check an access request against the table
    pub fn check(&self, access: &AccessRequest) -> Result<(), ApiError> {
        let token = access.token.as_deref().ok_or(ApiError::Unauthorized)?;
        match self.tokens.get(token) {
            Some(roles) if roles.contains(&access.role) => Ok(()),
            _ => Err(ApiError::Forbidden),
        }
    }
}

#[async_trait]
impl AuthorizationMiddleware for TokenRoles {
    async fn handle(&self, access: AccessRequest, request: Request, next: Next) -> Response {
        match self.check(&access) {
            Ok(()) => next.run(request).await,
            Err(e) => {
                tracing::debug!(
                    "Rejected {} {} (requires {})",
                    request.method(),
                    request.uri().path(),
                    access.role
                );
                e.into_response()
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Middleware
// ─────────────────────────────────────────────────────────────────────────────

/// Authorization middleware function, installed with
/// `middleware::from_fn_with_state`.
pub async fn authorize(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let access = AccessRequest {
        token: bearer_token(request.headers()),
        role: Role::required_for(request.method(), request.uri().path()),
    };
    state.auth.handle(access, request, next).await
}
