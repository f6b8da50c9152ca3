//! HTTP server configuration.

use serde::Deserialize;

/// Environment variable overriding [`ServerConfig::bind`].
pub const BIND_ENV: &str = "ECONE_RISK_BIND";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".into()
}
