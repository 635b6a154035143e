// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller extraction for the server.
//!
//! Authentication happens at the gateway in front of this service. The
//! gateway forwards the caller's identity in two headers, which the
//! extractors here turn into an [`AuthenticatedCaller`].

use apply_bureau_api::{AuthError, AuthenticatedCaller};
use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Header carrying the caller's user ID (UUID).
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's role (`client`, `staff` or `admin`).
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for an authenticated caller.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     Caller(caller): Caller,
/// ) -> Result<Json<Response>, HttpError> {
///     // caller: AuthenticatedCaller
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if either header is missing, the user ID
/// is not a UUID, or the role is unknown.
pub struct Caller(pub AuthenticatedCaller);

/// Extractor for endpoints that also accept anonymous callers.
///
/// Missing headers yield `None`. Headers that are present but malformed
/// are still rejected with 401.
pub struct MaybeCaller(pub Option<AuthenticatedCaller>);

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, CallerError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                warn!(header = name, "Invalid identity header encoding");
                CallerError(format!("Header '{name}' is not valid text"))
            })
        })
        .transpose()
}

fn authenticate(headers: &HeaderMap) -> Result<AuthenticatedCaller, CallerError> {
    let user_id: Option<&str> = header(headers, USER_ID_HEADER)?;
    let role: Option<&str> = header(headers, USER_ROLE_HEADER)?;

    let caller: AuthenticatedCaller =
        AuthenticatedCaller::from_forwarded(user_id, role).map_err(|e: AuthError| {
            warn!(error = %e, "Caller identity rejected");
            CallerError(e.to_string())
        })?;

    debug!(user_id = %caller.id, role = caller.role.as_str(), "Caller identified");
    Ok(caller)
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = CallerError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers).map(Self)
    }
}

impl FromRequestParts<AppState> for MaybeCaller {
    type Rejection = CallerError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(USER_ID_HEADER)
            && !parts.headers.contains_key(USER_ROLE_HEADER)
        {
            return Ok(Self(None));
        }
        authenticate(&parts.headers).map(|caller| Self(Some(caller)))
    }
}

/// Caller extraction failure, rendered as a 401.
#[derive(Debug)]
pub struct CallerError(String);

impl IntoResponse for CallerError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: self.0,
                details: None,
                error_type: None,
            }),
        )
            .into_response()
    }
}
