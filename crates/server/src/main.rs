// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod caller;
mod validation;

#[cfg(test)]
mod tests;

use apply_bureau_api::{
    ApiError, ApplicationResponse, BookConsultationRequest, BookConsultationResponse,
    CreateApplicationRequest, ListApplicationsQuery, ListApplicationsResponse,
    NotificationsResponse, OnboardingReviewResponse, OnboardingStatusResponse, StatsQuery,
    SubmitOnboardingResponse, UpdateApplicationRequest, approve_onboarding, book_consultation,
    create_application, get_application_stats, get_onboarding_status, list_applications,
    list_notifications, reject_onboarding, submit_onboarding, update_application,
};
use apply_bureau_domain::{ApplicationStatsReport, parse_timezone};
use apply_bureau_persistence::Persistence;
use apply_bureau_validation::{SchemaId, ValidationIssue};
use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::caller::{Caller, MaybeCaller};
use crate::validation::validate_body;

/// Apply Bureau Server - application tracking backend for the Apply Bureau
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "APPLY_BUREAU_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "APPLY_BUREAU_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "APPLY_BUREAU_PORT", default_value_t = 3000)]
    port: u16,

    /// IANA timezone whose Sunday midnight starts the reporting week
    #[arg(short, long, env = "APPLY_BUREAU_TIMEZONE", default_value = "UTC")]
    timezone: String,

    /// Connect to an externally managed database without applying migrations
    #[arg(long, env = "APPLY_BUREAU_SKIP_MIGRATIONS")]
    skip_migrations: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, shared behind a mutex.
    persistence: Arc<Mutex<Persistence>>,
    /// Timezone used to find the start of the reporting week.
    timezone: Tz,
}

/// Error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Human-readable error message.
    error: String,
    /// Field-level validation issues, in schema order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationIssue>>,
    /// Error category marker, e.g. `VALIDATION_ERROR`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    error_type: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Path parameters for application routes.
#[derive(Debug, Deserialize)]
struct ApplicationPath {
    id: String,
}

/// Path parameters for onboarding approval.
#[derive(Debug, Deserialize)]
struct OnboardingPath {
    client_id: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.message,
            details: None,
            error_type: None,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            // Already logged with context by the operation; the message is generic.
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for GET `/health`.
///
/// Reports ok once the database answers a catalog query.
async fn handle_health(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HealthResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let catalog = persistence.list_tables();
    drop(persistence);

    if let Err(e) = catalog {
        error!(error = %e, "Health check failed");
        return Err(HttpError {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: String::from("Database unavailable"),
        });
    }

    Ok(Json(HealthResponse {
        status: String::from("ok"),
    }))
}

/// Handler for GET `/api/applications`.
///
/// Lists a client's applications along with their statistics.
async fn handle_list_applications(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<ListApplicationsResponse>, HttpError> {
    info!(user_id = %caller.id, "Handling list_applications request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListApplicationsResponse = list_applications(
        &mut persistence,
        &caller,
        &query,
        OffsetDateTime::now_utc(),
        app_state.timezone,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/applications`.
async fn handle_create_application(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), HttpError> {
    info!(
        staff_id = %caller.id,
        client_id = %request.client_id,
        "Handling create_application request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationResponse =
        create_application(&mut persistence, &caller, request, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PATCH `/api/applications/{id}`.
async fn handle_update_application(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
    Path(path): Path<ApplicationPath>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<ApplicationResponse>, HttpError> {
    info!(
        staff_id = %caller.id,
        application_id = %path.id,
        "Handling update_application request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ApplicationResponse = update_application(
        &mut persistence,
        &caller,
        &path.id,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/applications/stats`.
async fn handle_get_application_stats(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ApplicationStatsReport>, HttpError> {
    info!(user_id = %caller.id, "Handling get_application_stats request");

    let mut persistence = app_state.persistence.lock().await;
    let report: ApplicationStatsReport = get_application_stats(
        &mut persistence,
        &caller,
        query.client_id.as_deref(),
        OffsetDateTime::now_utc(),
        app_state.timezone,
    )?;
    drop(persistence);

    Ok(Json(report))
}

/// Handler for POST `/api/onboarding`.
///
/// The body has already been reduced to the declared questionnaire fields.
async fn handle_submit_onboarding(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
    Json(responses): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<SubmitOnboardingResponse>), HttpError> {
    info!(client_id = %caller.id, "Handling submit_onboarding request");

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitOnboardingResponse =
        submit_onboarding(&mut persistence, &caller, &responses, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/onboarding/status`.
async fn handle_get_onboarding_status(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
    Query(query): Query<StatsQuery>,
) -> Result<Json<OnboardingStatusResponse>, HttpError> {
    info!(user_id = %caller.id, "Handling get_onboarding_status request");

    let mut persistence = app_state.persistence.lock().await;
    let response: OnboardingStatusResponse =
        get_onboarding_status(&mut persistence, &caller, query.client_id.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/admin/onboarding/{client_id}/approve`.
async fn handle_approve_onboarding(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
    Path(path): Path<OnboardingPath>,
) -> Result<Json<OnboardingReviewResponse>, HttpError> {
    info!(
        staff_id = %caller.id,
        client_id = %path.client_id,
        "Handling approve_onboarding request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: OnboardingReviewResponse = approve_onboarding(
        &mut persistence,
        &caller,
        &path.client_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/admin/onboarding/{client_id}/reject`.
async fn handle_reject_onboarding(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
    Path(path): Path<OnboardingPath>,
) -> Result<Json<OnboardingReviewResponse>, HttpError> {
    info!(
        staff_id = %caller.id,
        client_id = %path.client_id,
        "Handling reject_onboarding request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: OnboardingReviewResponse = reject_onboarding(
        &mut persistence,
        &caller,
        &path.client_id,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/consultations`.
///
/// Open to anonymous callers; an identified client is linked to the booking.
async fn handle_book_consultation(
    AxumState(app_state): AxumState<AppState>,
    MaybeCaller(caller): MaybeCaller,
    Json(request): Json<BookConsultationRequest>,
) -> Result<(StatusCode, Json<BookConsultationResponse>), HttpError> {
    info!(
        package_interest = %request.package_interest,
        authenticated = caller.is_some(),
        "Handling book_consultation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: BookConsultationResponse = book_consultation(
        &mut persistence,
        caller.as_ref(),
        request,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/api/notifications`.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    Caller(caller): Caller,
) -> Result<Json<NotificationsResponse>, HttpError> {
    info!(user_id = %caller.id, "Handling list_notifications request");

    let mut persistence = app_state.persistence.lock().await;
    let response: NotificationsResponse = list_notifications(&mut persistence, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router.
///
/// Routes that accept a body validate it against its registered schema
/// before the handler runs.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/api/applications",
            get(handle_list_applications).post(
                handle_create_application
                    .layer(from_fn_with_state(SchemaId::CreateApplication, validate_body)),
            ),
        )
        .route("/api/applications/stats", get(handle_get_application_stats))
        .route(
            "/api/applications/{id}",
            patch(
                handle_update_application
                    .layer(from_fn_with_state(SchemaId::UpdateApplication, validate_body)),
            ),
        )
        .route(
            "/api/onboarding",
            post(
                handle_submit_onboarding
                    .layer(from_fn_with_state(SchemaId::Onboarding, validate_body)),
            ),
        )
        .route("/api/onboarding/status", get(handle_get_onboarding_status))
        .route("/api/admin/onboarding/{client_id}/approve", post(handle_approve_onboarding))
        .route("/api/admin/onboarding/{client_id}/reject", post(handle_reject_onboarding))
        .route(
            "/api/consultations",
            post(
                handle_book_consultation
                    .layer(from_fn_with_state(SchemaId::ConsultationBooking, validate_body)),
            ),
        )
        .route("/api/notifications", get(handle_list_notifications))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Apply Bureau Server");

    let timezone: Tz = parse_timezone(&args.timezone).inspect_err(|e| {
        error!(error = %e, "Unknown timezone");
    })?;
    info!(%timezone, "Reporting weeks start on Sunday at local midnight");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path, !args.skip_migrations)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind((args.bind.as_str(), args.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Run server
    axum::serve(listener, app).await?;

    Ok(())
}
