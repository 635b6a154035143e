// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

const CLIENT_ID: &str = "6f1c2a8e-3d44-4d7b-9a51-0c2f7e9b1a23";
const STAFF_ID: &str = "a3d9c6b1-2f47-4e8a-b5c0-19e7f4d2a6b8";

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone: chrono_tz::UTC,
    }
}

fn request(
    method: &str,
    uri: &str,
    identity: Option<(&str, &str)>,
    body: Option<&Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user_id, role)) = identity {
        builder = builder.header("x-user-id", user_id).header("x-user-role", role);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn as_client() -> Option<(&'static str, &'static str)> {
    Some((CLIENT_ID, "client"))
}

fn as_staff() -> Option<(&'static str, &'static str)> {
    Some((STAFF_ID, "admin"))
}

async fn send(app: &Router, request: Request<Body>) -> (HttpStatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, body)
}

fn application_body() -> Value {
    json!({
        "client_id": CLIENT_ID,
        "company": "  Acme Corp  ",
        "job_title": "Software Engineer",
        "job_url": "https://jobs.acme.example/123",
        "admin_notes": "Hiring manager is a former colleague",
        "priority": "high"
    })
}

fn onboarding_body() -> Value {
    json!({
        "target_job_titles": ["Software Engineer"],
        "target_industries": ["Technology"],
        "target_locations": ["Remote"],
        "target_salary_range": "$120,000 - $150,000",
        "years_of_experience": "6",
        "key_technical_skills": ["Rust"],
        "career_goals_short_term": "Land a senior backend role at a product company.",
        "biggest_career_challenges": ["Getting past resume screens"],
        "support_areas_needed": ["Interview prep"]
    })
}

fn booking_body() -> Value {
    json!({
        "name": "Jane O'Neil",
        "email": "  Jane@Example.com ",
        "reason": "I want help landing a senior engineering role.",
        "preferred_date": "2026-11-04T00:00:00Z",
        "preferred_time": "14:30",
        "package_interest": "professional",
        "timeline": "1-3_months"
    })
}

async fn create_application_as_staff(app: &Router) -> String {
    let (status, body) = send(
        app,
        request("POST", "/api/applications", as_staff(), Some(&application_body())),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    body["application"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(&app, request("GET", "/api/applications", None, None)).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("Missing user identity"));
}

#[tokio::test]
async fn test_malformed_identity_is_unauthorized() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        request("GET", "/api/applications", Some(("not-a-uuid", "client")), None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_application_sanitizes_body() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        request("POST", "/api/applications", as_staff(), Some(&application_body())),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body["message"], "Application created successfully");
    assert_eq!(body["application"]["company_name"], "Acme Corp");
    assert_eq!(body["application"]["status"], "applied");
    assert!(body["application"].get("priority").is_none());
}

#[tokio::test]
async fn test_create_application_validation_failure() {
    let app: Router = build_router(create_test_app_state());
    let body = json!({
        "client_id": CLIENT_ID,
        "job_title": "Software Engineer"
    });

    let (status, body) = send(
        &app,
        request("POST", "/api/applications", as_staff(), Some(&body)),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["type"], "VALIDATION_ERROR");
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["field"], "company_name");
    assert_eq!(details[0]["code"], "invalid_type");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app: Router = build_router(create_test_app_state());
    let request = Request::builder()
        .method("POST")
        .uri("/api/applications")
        .header("x-user-id", STAFF_ID)
        .header("x-user-role", "staff")
        .header("content-type", "application/json")
        .body(Body::from("{\"client_id\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");
    assert_eq!(body["type"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["code"], "invalid_json");
}

#[tokio::test]
async fn test_create_application_as_client_is_forbidden() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        request("POST", "/api/applications", as_client(), Some(&application_body())),
    )
    .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_client_lists_own_applications_without_admin_notes() {
    let app: Router = build_router(create_test_app_state());
    create_application_as_staff(&app).await;

    let (status, body) = send(&app, request("GET", "/api/applications", as_client(), None)).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["total"], 1);
    assert!(body["applications"][0].get("admin_notes").is_none());
    assert_eq!(body["stats"]["tier"], "Tier 1");
    assert_eq!(body["stats"]["total_applications"], 1);
}

#[tokio::test]
async fn test_staff_list_requires_client_id() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(&app, request("GET", "/api/applications", as_staff(), None)).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);

    let uri = format!("/api/applications?client_id={CLIENT_ID}&status=applied&limit=10");
    let (status, body) = send(&app, request("GET", &uri, as_staff(), None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_staff_lookups_accept_uppercase_ids() {
    let app: Router = build_router(create_test_app_state());
    let upper_client: String = CLIENT_ID.to_uppercase();
    let mut body = application_body();
    body["client_id"] = json!(upper_client);

    let (status, created) = send(
        &app,
        request("POST", "/api/applications", as_staff(), Some(&body)),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(created["application"]["client_id"], CLIENT_ID);
    let upper_id: String = created["application"]["id"]
        .as_str()
        .unwrap()
        .to_uppercase();

    let uri = format!("/api/applications?client_id={upper_client}");
    let (status, listed) = send(&app, request("GET", &uri, as_staff(), None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(listed["total"], 1);

    let uri = format!("/api/applications/stats?client_id={upper_client}");
    let (status, stats) = send(&app, request("GET", &uri, as_staff(), None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(stats["total_applications"], 1);

    let update = json!({ "status": "under_review" });
    let (status, updated) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/applications/{upper_id}"),
            as_staff(),
            Some(&update),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(updated["application"]["status"], "under_review");
}

#[tokio::test]
async fn test_malformed_ids_are_bad_requests() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        request("GET", "/api/applications?client_id=not-a-uuid", as_staff(), None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input for field 'client_id': Invalid uuid");

    let update = json!({ "status": "rejected" });
    let (status, _) = send(
        &app,
        request("PATCH", "/api/applications/12345", as_staff(), Some(&update)),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request("POST", "/api/admin/onboarding/12345/approve", as_staff(), None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_application_status_notifies_client() {
    let app: Router = build_router(create_test_app_state());
    let id: String = create_application_as_staff(&app).await;
    let update = json!({
        "status": "offer_received",
        "offer_salary": "125000",
        "reason": "Verbal offer from the hiring manager"
    });

    let (status, body) = send(
        &app,
        request("PATCH", &format!("/api/applications/{id}"), as_staff(), Some(&update)),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["application"]["status"], "offer_received");
    assert_eq!(body["application"]["offer_amount"], 125_000.0);

    let (status, inbox) =
        send(&app, request("GET", "/api/notifications", as_client(), None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(inbox["unread_count"], 2);
    let status_change = inbox["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["type"] == "application_status_changed")
        .unwrap();
    assert!(
        status_change["message"]
            .as_str()
            .unwrap()
            .contains("Reason: Verbal offer from the hiring manager")
    );
}

#[tokio::test]
async fn test_update_application_rejects_unknown_status() {
    let app: Router = build_router(create_test_app_state());
    let id: String = create_application_as_staff(&app).await;

    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/applications/{id}"),
            as_staff(),
            Some(&json!({ "status": "ghosted" })),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["code"], "invalid_enum_value");
}

#[tokio::test]
async fn test_update_unknown_application_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/applications/5d0f7a34-6b1e-4c8d-9f2a-3e7b1c9d4a56",
            as_staff(),
            Some(&json!({ "status": "rejected" })),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_update_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let id: String = create_application_as_staff(&app).await;

    let (status, _) = send(
        &app,
        request("PATCH", &format!("/api/applications/{id}"), as_staff(), None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_follow_consultation_tier() {
    let app: Router = build_router(create_test_app_state());
    let (status, _) = send(
        &app,
        request("POST", "/api/consultations", as_client(), Some(&booking_body())),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    create_application_as_staff(&app).await;

    let (status, stats) = send(
        &app,
        request("GET", "/api/applications/stats", as_client(), None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(stats["tier"], "Tier 2");
    assert_eq!(stats["weekly_target"], 30);
    assert_eq!(stats["total_applications"], 1);
    assert_eq!(stats["applications_this_week"], 1);
    assert_eq!(stats["weekly_progress"], 3);
}

#[tokio::test]
async fn test_onboarding_flow() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        request("POST", "/api/onboarding", as_client(), Some(&onboarding_body())),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending_approval");

    let (status, _) = send(
        &app,
        request("POST", "/api/onboarding", as_client(), Some(&onboarding_body())),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);

    let (_, summary) = send(
        &app,
        request("GET", "/api/onboarding/status", as_client(), None),
    )
    .await;
    assert_eq!(summary["has_submitted"], true);
    assert_eq!(summary["can_access_dashboard"], false);

    let approve_uri = format!("/api/admin/onboarding/{CLIENT_ID}/approve");
    let (status, _) = send(&app, request("POST", &approve_uri, as_client(), None)).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let (status, body) = send(&app, request("POST", &approve_uri, as_staff(), None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (_, summary) = send(
        &app,
        request("GET", "/api/onboarding/status", as_client(), None),
    )
    .await;
    assert_eq!(summary["status"], "approved");
    assert_eq!(summary["can_access_dashboard"], true);
}

#[tokio::test]
async fn test_rejected_onboarding_can_be_resubmitted() {
    let app: Router = build_router(create_test_app_state());
    let (status, _) = send(
        &app,
        request("POST", "/api/onboarding", as_client(), Some(&onboarding_body())),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);

    let reject_uri = format!("/api/admin/onboarding/{CLIENT_ID}/reject");
    let (status, _) = send(&app, request("POST", &reject_uri, as_client(), None)).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let (status, body) = send(&app, request("POST", &reject_uri, as_staff(), None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "rejected");

    let (status, _) = send(&app, request("POST", &reject_uri, as_staff(), None)).await;
    assert_eq!(status, HttpStatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        request("POST", "/api/onboarding", as_client(), Some(&onboarding_body())),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending_approval");
}

#[tokio::test]
async fn test_onboarding_validation_reports_every_issue() {
    let app: Router = build_router(create_test_app_state());
    let body = json!({
        "target_job_titles": [],
        "target_industries": ["Technology"],
        "target_locations": ["Remote"],
        "current_salary_range": "lots",
        "target_salary_range": "$120,000 - $150,000",
        "years_of_experience": 6,
        "key_technical_skills": ["Rust"],
        "career_goals_short_term": "Too short",
        "biggest_career_challenges": ["Networking"],
        "support_areas_needed": ["Interview prep"]
    });

    let (status, body) = send(
        &app,
        request("POST", "/api/onboarding", as_client(), Some(&body)),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|issue| issue["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec![
            "target_job_titles",
            "current_salary_range",
            "career_goals_short_term"
        ]
    );
}

#[tokio::test]
async fn test_anonymous_consultation_booking() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        request("POST", "/api/consultations", None, Some(&booking_body())),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["consultation"]["email"], "jane@example.com");
    assert!(body["consultation"]["client_id"].is_null());
}

#[tokio::test]
async fn test_consultation_booking_rejects_bad_time() {
    let app: Router = build_router(create_test_app_state());
    let mut booking = booking_body();
    booking["preferred_time"] = json!("2:30pm");

    let (status, body) = send(
        &app,
        request("POST", "/api/consultations", None, Some(&booking)),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "preferred_time");
    assert_eq!(body["details"][0]["code"], "invalid_string");
}

#[test]
fn test_api_error_status_mapping() {
    let cases = [
        (
            ApiError::InvalidInput {
                field: String::from("status"),
                message: String::from("bad"),
            },
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::ResourceNotFound {
                resource_type: String::from("Application"),
                message: String::from("missing"),
            },
            StatusCode::NOT_FOUND,
        ),
        (
            ApiError::Conflict {
                message: String::from("already approved"),
            },
            StatusCode::CONFLICT,
        ),
        (
            ApiError::Internal {
                message: String::from("Failed to fetch applications"),
            },
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        let http: HttpError = err.into();
        assert_eq!(http.status, expected);
    }

    let http: HttpError = ApiError::Internal {
        message: String::from("Failed to fetch applications"),
    }
    .into();
    assert_eq!(http.message, "Failed to fetch applications");
}
