// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request-body validation middleware.
//!
//! [`validate_body`] is installed per route with
//! `from_fn_with_state(SchemaId::..., validate_body)`. It reads the whole
//! body, validates it, and hands the downstream handler the sanitized JSON
//! in place of the original bytes. Any failure ends the request with a 400
//! `VALIDATION_ERROR` envelope and the handler never runs.

use apply_bureau_validation::{SchemaId, ValidationErrors, ValidationIssue};
use axum::{
    Json,
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ErrorResponse;

/// Largest request body the validator will buffer.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Marker placed in the `type` field of every validation failure.
pub const VALIDATION_ERROR_TYPE: &str = "VALIDATION_ERROR";

fn rejection(message: &str, issues: Vec<ValidationIssue>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
            details: Some(issues),
            error_type: Some(VALIDATION_ERROR_TYPE.to_string()),
        }),
    )
        .into_response()
}

/// Parses the raw body. Whitespace-only bodies count as an empty object.
fn parse_body(bytes: &Bytes) -> Result<Value, ValidationErrors> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| ValidationErrors::invalid_json(e.to_string()))
}

/// Validates the request body against `schema` and forwards the sanitized body.
pub async fn validate_body(
    State(schema): State<SchemaId>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let bytes: Bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(schema = schema.name(), error = %e, "Failed to read request body");
            return rejection(
                "Invalid request data",
                ValidationErrors::invalid_json("Request body could not be read").into_issues(),
            );
        }
    };

    let input: Value = match parse_body(&bytes) {
        Ok(input) => input,
        Err(errors) => {
            debug!(schema = schema.name(), "Request body is not JSON");
            return rejection("Invalid request data", errors.into_issues());
        }
    };

    let sanitized: Value = match schema.schema().validate(&input) {
        Ok(sanitized) => sanitized,
        Err(errors) => {
            debug!(
                schema = schema.name(),
                issues = errors.issues().len(),
                "Request body failed validation"
            );
            return rejection("Validation failed", errors.into_issues());
        }
    };

    let Ok(body) = serde_json::to_vec(&sanitized) else {
        warn!(schema = schema.name(), "Failed to re-encode sanitized body");
        return rejection(
            "Invalid request data",
            ValidationErrors::invalid_json("Request body could not be processed").into_issues(),
        );
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    next.run(Request::from_parts(parts, Body::from(body))).await
}
