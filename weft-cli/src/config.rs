//! Configuration module
//!
//! Handles CLI configuration such as the API URL.

use weft_client::WeftClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Weft REST service
    pub api_url: String,
}

impl Config {
    pub fn client(&self) -> WeftClient {
        WeftClient::new(&self.api_url)
    }
}
