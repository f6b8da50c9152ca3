//! HTTP boundary tests against a live listener.

use std::sync::Arc;

use econe_risk::adapter::http;
use econe_risk::port::ModelHandle;
use econe_risk::service::RiskScorer;
use econe_risk::testkit::model::{FixedModel, PanickingModel, RecordingModel};
use econe_risk::testkit::payload;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn(scorer: RiskScorer) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = http::serve(listener, Arc::new(scorer), std::future::pending()).await;
    });
    format!("http://{addr}")
}

async fn post_json(base: &str, body: &Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/risk-score/"))
        .json(body)
        .send()
        .await
        .expect("send request");
    let status = response.status();
    (status, response.json().await.expect("json body"))
}

#[tokio::test]
async fn scores_valid_payload() {
    let base = spawn(RiskScorer::new(FixedModel::new(vec![0.9, 0.1]).handle())).await;

    let (status, body) = post_json(&base, &payload::complete()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "riskScore": 0.1, "riskLevel": "LOW", "modelVersion": "v1" })
    );
}

#[tokio::test]
async fn degraded_results_are_still_ok() {
    let base = spawn(RiskScorer::unavailable()).await;

    let (status, body) = post_json(&base, &json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "riskScore": -1.0,
            "riskLevel": "UNKNOWN",
            "modelVersion": "v1",
            "error": "Model not loaded",
        })
    );
}

#[tokio::test]
async fn classifier_panic_is_answered_with_error_result() {
    let base = spawn(RiskScorer::new(ModelHandle::ready(PanickingModel))).await;

    let (status, body) = post_json(&base, &payload::complete()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["riskLevel"], "ERROR");
    assert_eq!(body["riskScore"], -1.0);
    assert_eq!(body["error"], "classifier panicked: weights not initialised");
}

#[tokio::test]
async fn invalid_fields_are_rejected_before_scoring() {
    let model = Arc::new(RecordingModel::default());
    let base = spawn(RiskScorer::new(ModelHandle::Ready(model.clone()))).await;

    let (status, body) = post_json(
        &base,
        &json!({ "land": { "landArea": "abc" }, "farmer": { "cropTypes": "WHEAT" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["land"]["landArea"], json!(["A valid number is required."]));
    assert!(body["farmer"]["cropTypes"].is_array());
    assert!(model.rows().is_empty());
}

#[tokio::test]
async fn validated_defaults_reach_the_classifier() {
    let model = Arc::new(RecordingModel::default());
    let base = spawn(RiskScorer::new(ModelHandle::Ready(model.clone()))).await;

    let (status, _) = post_json(
        &base,
        &json!({
            "land": { "landArea": "8", "soilType": " CLAY " },
            "farmer": { "farmDetails": { "landAreaInAcres": 3, "irrigationAvailable": "no" } },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let rows = model.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].land_area, 8.0);
    assert_eq!(rows[0].area_diff, 5.0);
    assert_eq!(rows[0].has_irrigation, 0);
    assert_eq!(rows[0].soil_type, "CLAY");
    assert_eq!(rows[0].farmer_state, "UNKNOWN");
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let base = spawn(RiskScorer::unavailable()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/risk-score/"))
        .header("content-type", "application/json")
        .body("{\"land\": ")
        .send()
        .await
        .expect("send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("json body");
    assert!(body["detail"]
        .as_str()
        .is_some_and(|d| d.starts_with("JSON parse error")));
}

#[tokio::test]
async fn non_object_body_is_a_client_error() {
    let base = spawn(RiskScorer::unavailable()).await;

    let (status, body) = post_json(&base, &json!([1, 2, 3])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "non_field_errors": ["Invalid data. Expected a dictionary, but got list."] })
    );
}

#[tokio::test]
async fn path_without_trailing_slash_is_served() {
    let base = spawn(RiskScorer::new(FixedModel::suspicious(0.5).handle())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/risk-score"))
        .json(&json!({}))
        .send()
        .await
        .expect("send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["riskLevel"], "MEDIUM");
}

#[tokio::test]
async fn health_reports_model_status() {
    let base = spawn(RiskScorer::new(ModelHandle::Malformed {
        reason: "decision function only".into(),
    }))
    .await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .expect("send request")
        .json()
        .await
        .expect("json body");

    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "malformed");
    assert_eq!(body["modelVersion"], "v1");
    assert!(body["startedAt"].is_string());
}
