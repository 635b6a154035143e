// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use apply_bureau_domain::{ApplicationStatsReport, Tier};
use apply_bureau_persistence::Persistence;
use time::Duration;

use super::helpers::{
    CLIENT_ID, NOW, TZ, create_test_application_request, create_test_booking, create_test_client,
    create_test_persistence, create_test_staff,
};
use crate::{
    ApiError, ApplicationResponse, ListApplicationsQuery, ListApplicationsResponse,
    UpdateApplicationRequest, book_consultation, create_application, get_application_stats,
    list_applications, list_notifications, update_application,
};

fn staff_query() -> ListApplicationsQuery {
    ListApplicationsQuery {
        client_id: Some(String::from(CLIENT_ID)),
        ..ListApplicationsQuery::default()
    }
}

fn seed(persistence: &mut Persistence, company_name: &str, offset_minutes: i64) -> String {
    create_application(
        persistence,
        &create_test_staff(),
        create_test_application_request(company_name, "Backend Engineer"),
        NOW + Duration::minutes(offset_minutes),
    )
    .unwrap()
    .application
    .id
}

#[test]
fn test_create_application_defaults_status_and_date() {
    let mut persistence = create_test_persistence();

    let response: ApplicationResponse = create_application(
        &mut persistence,
        &create_test_staff(),
        create_test_application_request("Acme", "Backend Engineer"),
        NOW,
    )
    .unwrap();

    assert_eq!(response.message, "Application created successfully");
    assert_eq!(response.application.status, "applied");
    assert_eq!(response.application.date_applied, NOW);
    assert_eq!(response.application.client_id, CLIENT_ID);
}

#[test]
fn test_create_application_notifies_client() {
    let mut persistence = create_test_persistence();
    seed(&mut persistence, "Acme", 0);

    let inbox = list_notifications(&mut persistence, &create_test_client()).unwrap();

    assert_eq!(inbox.unread_count, 1);
    assert_eq!(inbox.notifications[0].notification_type, "application_created");
    assert!(inbox.notifications[0].message.contains("Acme"));
}

#[test]
fn test_create_application_rejects_client_caller() {
    let mut persistence = create_test_persistence();

    let result = create_application(
        &mut persistence,
        &create_test_client(),
        create_test_application_request("Acme", "Backend Engineer"),
        NOW,
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_create_application_rejects_blank_company() {
    let mut persistence = create_test_persistence();

    let result = create_application(
        &mut persistence,
        &create_test_staff(),
        create_test_application_request("   ", "Backend Engineer"),
        NOW,
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "company_name"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_create_application_rejects_unknown_status() {
    let mut persistence = create_test_persistence();
    let mut request = create_test_application_request("Acme", "Backend Engineer");
    request.status = Some(String::from("ghosted"));

    let result = create_application(&mut persistence, &create_test_staff(), request, NOW);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "status"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_create_application_uses_supplied_date() {
    let mut persistence = create_test_persistence();
    let mut request = create_test_application_request("Acme", "Backend Engineer");
    request.date_applied = Some(String::from("2026-10-01T09:00:00Z"));

    let response = create_application(&mut persistence, &create_test_staff(), request, NOW).unwrap();

    assert_eq!(
        response.application.date_applied,
        time::macros::datetime!(2026-10-01 09:00 UTC)
    );
}

#[test]
fn test_list_applications_for_client_redacts_admin_notes() {
    let mut persistence = create_test_persistence();
    seed(&mut persistence, "Acme", 0);

    let response: ListApplicationsResponse = list_applications(
        &mut persistence,
        &create_test_client(),
        &ListApplicationsQuery::default(),
        NOW,
        TZ,
    )
    .unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.applications[0].admin_notes, None);
}

#[test]
fn test_list_applications_for_staff_keeps_admin_notes() {
    let mut persistence = create_test_persistence();
    seed(&mut persistence, "Acme", 0);

    let response =
        list_applications(&mut persistence, &create_test_staff(), &staff_query(), NOW, TZ)
            .unwrap();

    assert_eq!(
        response.applications[0].admin_notes.as_deref(),
        Some("Strong referral")
    );
}

#[test]
fn test_list_applications_filters_and_pages() {
    let mut persistence = create_test_persistence();
    seed(&mut persistence, "Acme", 0);
    seed(&mut persistence, "Globex", 1);
    seed(&mut persistence, "Acme Labs", 2);

    let query = ListApplicationsQuery {
        search: Some(String::from("acme")),
        limit: Some(1),
        ..ListApplicationsQuery::default()
    };
    let response =
        list_applications(&mut persistence, &create_test_client(), &query, NOW, TZ).unwrap();

    assert_eq!(response.total, 2);
    assert_eq!(response.applications.len(), 1);
    assert_eq!(response.applications[0].company_name, "Acme Labs");
    // Stats always describe the full set.
    assert_eq!(response.stats.total_applications, 3);
}

#[test]
fn test_list_applications_unprovisioned_returns_empty() {
    let mut persistence = Persistence::new_in_memory_unprovisioned().unwrap();

    let response = list_applications(
        &mut persistence,
        &create_test_client(),
        &ListApplicationsQuery::default(),
        NOW,
        TZ,
    )
    .unwrap();

    assert!(response.applications.is_empty());
    assert_eq!(response.total, 0);
    assert_eq!(response.stats, ApplicationStatsReport::empty(Tier::default()));
}

#[test]
fn test_update_application_status_change_notifies_once() {
    let mut persistence = create_test_persistence();
    let id: String = seed(&mut persistence, "Acme", 0);
    let request = UpdateApplicationRequest {
        status: Some(String::from("interview_scheduled")),
        interview_type: Some(String::from("video")),
        reason: Some(String::from("Recruiter reached out")),
        ..UpdateApplicationRequest::default()
    };

    let response =
        update_application(&mut persistence, &create_test_staff(), &id, &request, NOW).unwrap();
    assert_eq!(response.application.status, "interview_scheduled");
    assert_eq!(response.application.interview_type.as_deref(), Some("video"));

    // Re-sending the same status is not a change.
    update_application(&mut persistence, &create_test_staff(), &id, &request, NOW).unwrap();

    let inbox = list_notifications(&mut persistence, &create_test_client()).unwrap();
    let status_updates: Vec<_> = inbox
        .notifications
        .iter()
        .filter(|n| n.notification_type == "application_status_changed")
        .collect();
    assert_eq!(status_updates.len(), 1);
    assert!(status_updates[0].message.contains("Interview format: video"));
    assert!(status_updates[0].message.contains("Reason: Recruiter reached out"));
}

#[test]
fn test_update_application_without_status_does_not_notify() {
    let mut persistence = create_test_persistence();
    let id: String = seed(&mut persistence, "Acme", 0);
    let request = UpdateApplicationRequest {
        notes: Some(String::from("Follow up next week")),
        ..UpdateApplicationRequest::default()
    };

    let response =
        update_application(&mut persistence, &create_test_staff(), &id, &request, NOW).unwrap();

    assert_eq!(response.application.notes.as_deref(), Some("Follow up next week"));
    assert_eq!(response.application.status, "applied");
    let inbox = list_notifications(&mut persistence, &create_test_client()).unwrap();
    assert_eq!(inbox.notifications.len(), 1);
}

#[test]
fn test_update_application_empty_request_rejected() {
    let mut persistence = create_test_persistence();
    let id: String = seed(&mut persistence, "Acme", 0);

    let result = update_application(
        &mut persistence,
        &create_test_staff(),
        &id,
        &UpdateApplicationRequest::default(),
        NOW,
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_update_application_unknown_id_not_found() {
    let mut persistence = create_test_persistence();
    let request = UpdateApplicationRequest {
        status: Some(String::from("rejected")),
        ..UpdateApplicationRequest::default()
    };

    let result = update_application(
        &mut persistence,
        &create_test_staff(),
        "5d0f7a34-6b1e-4c8d-9f2a-3e7b1c9d4a56",
        &request,
        NOW,
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_application_rejects_invalid_interview_date() {
    let mut persistence = create_test_persistence();
    let id: String = seed(&mut persistence, "Acme", 0);
    let request = UpdateApplicationRequest {
        interview_date: Some(String::from("next tuesday")),
        ..UpdateApplicationRequest::default()
    };

    let result = update_application(&mut persistence, &create_test_staff(), &id, &request, NOW);

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "interview_date"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_stats_use_tier_from_consultation() {
    let mut persistence = create_test_persistence();
    book_consultation(
        &mut persistence,
        Some(&create_test_client()),
        create_test_booking("professional"),
        NOW,
    )
    .unwrap();
    seed(&mut persistence, "Acme", 0);
    seed(&mut persistence, "Globex", 1);
    seed(&mut persistence, "Initech", 2);

    let stats = get_application_stats(&mut persistence, &create_test_client(), None, NOW, TZ)
        .unwrap();

    assert_eq!(stats.tier, "Tier 2");
    assert_eq!(stats.weekly_target, 30);
    assert_eq!(stats.applications_this_week, 3);
    assert_eq!(stats.weekly_progress, 10);
}

#[test]
fn test_stats_default_to_tier_one() {
    let mut persistence = create_test_persistence();

    let stats = get_application_stats(
        &mut persistence,
        &create_test_staff(),
        Some(CLIENT_ID),
        NOW,
        TZ,
    )
    .unwrap();

    assert_eq!(stats, ApplicationStatsReport::empty(Tier::default()));
    assert_eq!(stats.weekly_target, 17);
}

#[test]
fn test_stats_unprovisioned_returns_zeroed_report() {
    let mut persistence = Persistence::new_in_memory_unprovisioned().unwrap();

    let stats = get_application_stats(&mut persistence, &create_test_client(), None, NOW, TZ)
        .unwrap();

    assert_eq!(stats, ApplicationStatsReport::empty(Tier::default()));
}

#[test]
fn test_stats_fall_back_to_tier_one_without_consultations() {
    let mut persistence = create_test_persistence();
    persistence.revert_last_migration().unwrap();
    seed(&mut persistence, "Acme", 0);
    seed(&mut persistence, "Globex", 1);

    let stats = get_application_stats(&mut persistence, &create_test_client(), None, NOW, TZ)
        .unwrap();

    assert_eq!(stats.tier, "Tier 1");
    assert_eq!(stats.weekly_target, 17);
    assert_eq!(stats.total_applications, 2);
    assert_eq!(stats.applications_this_week, 2);
    assert_eq!(stats.weekly_progress, 12);
}
