//! HTTP surface configuration.

use super::defaults::{default_cors_origins, default_enable_reset_endpoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Comma-separated allowed origins, or "*" for permissive CORS
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
    /// Expose `POST /reset` to restart the game from the opening layout
    #[serde(default = "default_enable_reset_endpoint")]
    pub enable_reset_endpoint: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cors_origins: default_cors_origins(),
            enable_reset_endpoint: default_enable_reset_endpoint(),
        }
    }
}
