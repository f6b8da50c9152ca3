//! HTTP boundary for the risk scorer.
//!
//! # Routes
//!
//! - `POST /api/risk-score/` - validate the payload and score it
//! - `GET /health` - liveness plus classifier status
//!
//! Degraded scoring results (no model, malformed model, prediction failure)
//! are still 200 responses; only unparsable or structurally invalid request
//! bodies produce a 400.

mod validate;

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::domain::MODEL_VERSION;
use crate::error::{Error, Result};
use crate::port::ModelStatus;
use crate::service::RiskScorer;

pub use validate::validate_request;

/// Route of the scoring endpoint.
pub const RISK_SCORE_PATH: &str = "/api/risk-score/";

/// Shared handler state. The scorer is immutable after startup.
#[derive(Clone)]
struct AppState {
    scorer: Arc<RiskScorer>,
    started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    model: ModelStatus,
    model_version: &'static str,
    started_at: DateTime<Utc>,
}

/// Build the application router.
pub fn router(scorer: Arc<RiskScorer>) -> Router {
    let state = AppState {
        scorer,
        started_at: Utc::now(),
    };

    Router::new()
        .route("/health", get(health))
        .route(RISK_SCORE_PATH, post(risk_score))
        .route(RISK_SCORE_PATH.trim_end_matches('/'), post(risk_score))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, scorer: Arc<RiskScorer>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, model = %scorer.status(), "Risk API listening");

    axum::serve(listener, router(scorer))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Server(e.to_string()))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.scorer.status(),
        model_version: MODEL_VERSION,
        started_at: state.started_at,
    })
}

async fn risk_score(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4();

    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(e) => {
            info!(%request_id, error = %e, "Rejected unparsable request body");
            let detail = json!({ "detail": format!("JSON parse error - {e}") });
            return (StatusCode::BAD_REQUEST, Json(detail)).into_response();
        }
    };

    let validated = match validate_request(&payload) {
        Ok(validated) => validated,
        Err(errors) => {
            info!(%request_id, errors = %errors, "Rejected invalid request");
            return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
        }
    };

    let result = state.scorer.predict_risk(&validated);
    info!(
        %request_id,
        risk_level = %result.risk_level,
        risk_score = result.risk_score,
        "Risk scored"
    );

    Json(result).into_response()
}

/// An empty body is an empty payload.
fn parse_body(body: &[u8]) -> serde_json::Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body)
}
