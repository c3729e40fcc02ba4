//! JSON response envelope shared by every endpoint.
//!
//! Success: `{"success": true, "type": "SUCCESS", "message"?: .., <payload fields>}`.
//! Failure: `{"success": false, "type": <KIND>, "message": ..}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

pub const SUCCESS: &str = "SUCCESS";

/// Successful response. The payload object's fields are merged into the
/// top level of the envelope.
#[derive(Debug)]
pub struct Envelope {
    status: StatusCode,
    message: Option<String>,
    payload: Value,
}

impl Envelope {
    /// 200 with `payload` (expected to be a JSON object).
    pub fn ok(payload: Value) -> Self {
        Self {
            status: StatusCode::OK,
            message: None,
            payload,
        }
    }

    /// 201 with `payload`.
    pub fn created(payload: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(payload)
        }
    }

    /// 200 with only a message.
    pub fn done(message: impl Into<String>) -> Self {
        Self::ok(Value::Null).message(message)
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(true));
        body.insert("type".into(), Value::from(SUCCESS));
        if let Some(message) = self.message {
            body.insert("message".into(), Value::String(message));
        }
        if let Value::Object(fields) = self.payload {
            for (key, value) in fields {
                body.entry(key).or_insert(value);
            }
        }
        (self.status, Json(Value::Object(body))).into_response()
    }
}

/// Failure response with the given status and wire `kind`.
pub fn failure(status: StatusCode, kind: &'static str, message: impl ToString) -> Response {
    let body = serde_json::json!({
        "success": false,
        "type": kind,
        "message": message.to_string(),
    });
    (status, Json(body)).into_response()
}

/// Fallback handler for unknown routes.
pub async fn route_not_found() -> Response {
    failure(StatusCode::NOT_FOUND, "NOT_FOUND", "route not found")
}
