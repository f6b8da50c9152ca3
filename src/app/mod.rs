//! Application layer - configuration and process wiring.

mod config;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::adapter::http;
use crate::adapter::model::load_model;
use crate::error::Result;
use crate::service::RiskScorer;

pub use config::{
    Config, LoggingConfig, ModelConfig, ServerConfig, BIND_ENV, LOG_FORMATS, MODEL_PATH_ENV,
};

/// Main application.
pub struct App;

impl App {
    /// Load the classifier once and wrap it in a scorer.
    ///
    /// A missing or broken artifact does not stop the process; the scorer
    /// then answers every request in degraded mode.
    #[must_use]
    pub fn scorer(config: &Config) -> RiskScorer {
        RiskScorer::new(load_model(&config.model.path))
    }

    /// Serve the risk API until Ctrl-C.
    pub async fn run(config: Config) -> Result<()> {
        let addr = config.bind_addr()?;
        let scorer = Arc::new(Self::scorer(&config));
        let listener = TcpListener::bind(addr).await?;

        http::serve(listener, scorer, shutdown_signal()).await?;

        info!("econe-risk stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
