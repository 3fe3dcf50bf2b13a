//! Server configuration
//!
//! Read once from the environment at startup. Everything has a default so the
//! service comes up with an empty engine and no authorization when nothing is
//! set.

use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use weft_core::config::Configuration;

use crate::middleware::{AllowAll, AuthorizationMiddleware, TokenRoles};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// JSON file holding the engine's static configurations
    pub config_file: Option<PathBuf>,

    /// JSON file mapping bearer tokens to roles; enables role checks when set
    pub auth_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            config_file: None,
            auth_file: None,
        }
    }
}

impl ServerConfig {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - WEFT_BIND_ADDR (optional, default: 0.0.0.0:5000)
    /// - WEFT_CONFIG_FILE (optional)
    /// - WEFT_AUTH_FILE (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: non_empty("WEFT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            config_file: non_empty("WEFT_CONFIG_FILE").map(PathBuf::from),
            auth_file: non_empty("WEFT_AUTH_FILE").map(PathBuf::from),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("bind_addr '{}' is not a socket address", self.bind_addr))?;

        if let Some(path) = &self.config_file {
            if !path.is_file() {
                anyhow::bail!("config_file {} does not exist", path.display());
            }
        }

        if let Some(path) = &self.auth_file {
            if !path.is_file() {
                anyhow::bail!("auth_file {} does not exist", path.display());
            }
        }

        Ok(())
    }

    /// Load the engine configuration, or an empty one when no file is set
    pub fn load_configuration(&self) -> anyhow::Result<Configuration> {
        match &self.config_file {
            Some(path) => Configuration::from_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display())),
            None => {
                tracing::warn!("WEFT_CONFIG_FILE not set, starting with an empty configuration");
                Ok(Configuration::default())
            }
        }
    }

    /// Pick the authorization implementation
    pub fn authorization(&self) -> anyhow::Result<Arc<dyn AuthorizationMiddleware>> {
        match &self.auth_file {
            Some(path) => {
                let roles = TokenRoles::from_file(path)?;
                tracing::info!("Role checks enabled for {} token(s)", roles.len());
                Ok(Arc::new(roles))
            }
            None => Ok(Arc::new(AllowAll)),
        }
    }
}
