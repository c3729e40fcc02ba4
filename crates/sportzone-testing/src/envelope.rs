//! Assertions over the JSON response envelope.

use axum::body::to_bytes;
use axum::response::Response;
use http::StatusCode;
use serde_json::Value;

/// Collect a response body and parse it as JSON.
///
/// Panics if the body is not valid JSON.
pub async fn read_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("response body is not JSON: {e}"))
}

/// Assert a successful envelope.
pub fn assert_success(json: &Value) {
    assert_eq!(json["success"], true, "expected success envelope, got {json}");
    assert_eq!(json["type"], "SUCCESS", "unexpected type in {json}");
}

/// Assert a failure envelope carrying `kind`.
pub fn assert_failure(json: &Value, kind: &str) {
    assert_eq!(json["success"], false, "expected failure envelope, got {json}");
    assert_eq!(json["type"], kind, "unexpected failure kind in {json}");
    assert!(
        json["message"].is_string(),
        "failure envelope without message: {json}"
    );
}

/// Read `resp`, assert its status and failure kind, and return the body.
pub async fn expect_failure(resp: Response, status: StatusCode, kind: &str) -> Value {
    assert_eq!(resp.status(), status);
    let json = read_json(resp).await;
    assert_failure(&json, kind);
    json
}
