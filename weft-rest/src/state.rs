//! Shared handler state

use std::sync::Arc;
use weft_core::engine::Engine;

use crate::middleware::{AllowAll, AuthorizationMiddleware};

#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub auth: Arc<dyn AuthorizationMiddleware>,
}

impl AppState {
    /// State with every request allowed through
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            auth: Arc::new(AllowAll),
        }
    }

    pub fn with_authorization(mut self, auth: Arc<dyn AuthorizationMiddleware>) -> Self {
        self.auth = auth;
        self
    }
}
