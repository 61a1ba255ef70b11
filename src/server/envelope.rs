//! Standard response envelope: `{status, statusCode, result}`.
//!
//! The HTTP status line always matches the `statusCode` field in the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

fn envelope(status: &'static str, status_code: StatusCode, result: serde_json::Value) -> Response {
    (
        status_code,
        Json(json!({
            "status": status,
            "statusCode": status_code.as_u16(),
            "result": result,
        })),
    )
        .into_response()
}

pub fn success<T: Serialize>(status_code: StatusCode, result: T) -> Response {
    let result = serde_json::to_value(result).unwrap_or(serde_json::Value::Null);
    envelope("success", status_code, result)
}

pub fn error<T: Serialize>(status_code: StatusCode, result: T) -> Response {
    let result = serde_json::to_value(result).unwrap_or(serde_json::Value::Null);
    envelope("error", status_code, result)
}
