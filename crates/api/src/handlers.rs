// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation authorizes the caller, talks to the persistence layer and
//! shapes the response. Persistence failures are logged here, with the
//! caller and operation, and surfaced as a generic `ApiError::Internal`.

use apply_bureau_domain::{
    Application, ApplicationFilter, ApplicationPage, ApplicationStatsReport, ApplicationStatus,
    ApplicationUpdate, InterviewType, NewApplication, NotificationMessage, OnboardingStatus, Tier,
    compute_application_stats, week_start,
};
use apply_bureau_persistence::{
    ConsultationData, NewConsultation, NotificationData, OnboardingData, Persistence,
    PersistenceError,
};
use chrono_tz::Tz;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, info, warn};

use crate::auth::{AuthenticatedCaller, AuthorizationService, Role, parse_identifier};
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    ApplicationResponse, BookConsultationRequest, BookConsultationResponse,
    CreateApplicationRequest, ListApplicationsQuery, ListApplicationsResponse,
    NotificationsResponse, OnboardingReviewResponse, OnboardingStatusResponse,
    OnboardingSubmissionData, SubmitOnboardingResponse, UpdateApplicationRequest,
};

/// Logs a persistence failure and converts it to a generic internal error.
fn internal(
    err: &PersistenceError,
    caller: &AuthenticatedCaller,
    operation: &'static str,
    message: &str,
) -> ApiError {
    error!(
        user_id = %caller.id,
        role = caller.role.as_str(),
        operation,
        error = %err,
        "Persistence operation failed"
    );
    ApiError::Internal {
        message: message.to_string(),
    }
}

fn parse_datetime(field: &str, value: &str) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::parse(value.trim(), &Rfc3339).map_err(|_| ApiError::InvalidInput {
        field: field.to_string(),
        message: String::from("Invalid datetime"),
    })
}

fn parse_optional_datetime(
    field: &str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, ApiError> {
    value.map(|v| parse_datetime(field, v)).transpose()
}

/// Treats an empty or whitespace-only string as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Stores a notification without failing the surrounding request.
fn notify(persistence: &mut Persistence, notification: &NotificationMessage, now: OffsetDateTime) {
    if let Err(e) = persistence.insert_notification(notification, now) {
        warn!(
            user_id = %notification.user_id,
            kind = notification.kind.as_str(),
            error = %e,
            "Failed to store notification"
        );
    }
}

/// Resolves a client's tier from their latest consultation booking.
fn resolve_tier(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    client_id: &str,
) -> Result<Tier, ApiError> {
    match persistence.latest_package_interest(client_id) {
        Ok(package) => Ok(Tier::resolve(package.as_deref())),
        Err(e) if e.is_relation_missing() => {
            warn!(client_id, error = %e, "Consultations not provisioned; using default tier");
            Ok(Tier::default())
        }
        Err(e) => Err(internal(
            &e,
            caller,
            "resolve_tier",
            "Failed to fetch application statistics",
        )),
    }
}

fn build_stats(
    applications: &[Application],
    tier: Tier,
    now: OffsetDateTime,
    tz: Tz,
) -> Result<ApplicationStatsReport, ApiError> {
    let start: OffsetDateTime = week_start(now, tz).map_err(|e| {
        error!(timezone = %tz, error = %e, "Failed to compute the start of the week");
        ApiError::Internal {
            message: String::from("Failed to compute application statistics"),
        }
    })?;
    Ok(compute_application_stats(applications, tier, start))
}

/// Loads a client's applications.
///
/// Returns `Ok(None)` when the collection is not provisioned.
fn load_applications(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    client_id: &str,
    operation: &'static str,
) -> Result<Option<Vec<Application>>, ApiError> {
    match persistence.list_applications_for_client(client_id) {
        Ok(applications) => Ok(Some(applications)),
        Err(e) if e.is_relation_missing() => {
            warn!(client_id, operation, error = %e, "Applications not provisioned; returning empty result");
            Ok(None)
        }
        Err(e) => Err(internal(&e, caller, operation, "Failed to fetch applications")),
    }
}

/// Lists a client's applications with their statistics.
///
/// Clients see their own applications with staff-only notes removed.
/// Staff name the client with `client_id`.
///
/// # Errors
///
/// Returns an error if the caller may not read the client's data or the
/// applications cannot be loaded.
pub fn list_applications(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    query: &ListApplicationsQuery,
    now: OffsetDateTime,
    tz: Tz,
) -> Result<ListApplicationsResponse, ApiError> {
    let client_id: String =
        AuthorizationService::resolve_client_scope(caller, query.client_id.as_deref())?;

    let Some(applications) =
        load_applications(persistence, caller, &client_id, "list_applications")?
    else {
        return Ok(ListApplicationsResponse {
            applications: Vec::new(),
            total: 0,
            stats: ApplicationStatsReport::empty(Tier::default()),
        });
    };

    let tier: Tier = resolve_tier(persistence, caller, &client_id)?;
    let stats: ApplicationStatsReport = build_stats(&applications, tier, now, tz)?;

    let filter = ApplicationFilter::new(
        query.status.clone(),
        query.search.clone(),
        query.limit,
        query.offset,
    );
    let page: ApplicationPage = filter.apply(applications);

    let applications: Vec<Application> = if caller.is_staff() {
        page.applications
    } else {
        page.applications
            .into_iter()
            .map(Application::redacted_for_client)
            .collect()
    };

    Ok(ListApplicationsResponse {
        applications,
        total: page.total,
        stats,
    })
}

/// Computes the statistics report for a client.
///
/// # Errors
///
/// Returns an error if the caller may not read the client's data or the
/// applications cannot be loaded.
pub fn get_application_stats(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    requested_client_id: Option<&str>,
    now: OffsetDateTime,
    tz: Tz,
) -> Result<ApplicationStatsReport, ApiError> {
    let client_id: String = AuthorizationService::resolve_client_scope(caller, requested_client_id)?;

    let Some(applications) =
        load_applications(persistence, caller, &client_id, "get_application_stats")?
    else {
        return Ok(ApplicationStatsReport::empty(Tier::default()));
    };

    let tier: Tier = resolve_tier(persistence, caller, &client_id)?;
    build_stats(&applications, tier, now, tz)
}

/// Creates an application on a client's behalf and notifies the client.
///
/// # Errors
///
/// Returns an error if the caller is not staff, a required field is blank,
/// a field cannot be interpreted, or the insert fails.
pub fn create_application(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    request: CreateApplicationRequest,
    now: OffsetDateTime,
) -> Result<ApplicationResponse, ApiError> {
    AuthorizationService::authorize_create_application(caller)?;

    for (field, value) in [
        ("client_id", &request.client_id),
        ("company_name", &request.company_name),
        ("job_title", &request.job_title),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: field.to_string(),
                message: String::from("Required"),
            });
        }
    }

    let status: ApplicationStatus = match request.status.as_deref() {
        Some(status) => ApplicationStatus::from_str(status).map_err(translate_domain_error)?,
        None => ApplicationStatus::default(),
    };
    let date_applied: OffsetDateTime =
        parse_optional_datetime("date_applied", request.date_applied.as_deref())?.unwrap_or(now);

    let new_application = NewApplication {
        client_id: request.client_id,
        company_name: request.company_name,
        job_title: request.job_title,
        job_url: non_blank(request.job_url),
        job_description: request.job_description,
        location: request.location,
        job_type: request.job_type,
        salary_range: request.salary_range,
        application_method: request.application_method,
        application_strategy: request.application_strategy,
        status,
        date_applied,
        resume_url: non_blank(request.resume_url),
        cover_letter_url: non_blank(request.cover_letter_url),
        notes: request.notes,
        admin_notes: request.admin_notes,
    };

    let application: Application = persistence
        .create_application(&new_application, now)
        .map_err(|e| internal(&e, caller, "create_application", "Failed to create application"))?;

    notify(
        persistence,
        &NotificationMessage::application_created(
            &application.client_id,
            &application.company_name,
            &application.job_title,
        ),
        now,
    );

    info!(
        application_id = %application.id,
        client_id = %application.client_id,
        staff_id = %caller.id,
        "Application created"
    );

    Ok(ApplicationResponse {
        message: String::from("Application created successfully"),
        application,
    })
}

fn build_update(request: &UpdateApplicationRequest) -> Result<ApplicationUpdate, ApiError> {
    Ok(ApplicationUpdate {
        status: request
            .status
            .as_deref()
            .map(ApplicationStatus::from_str)
            .transpose()
            .map_err(translate_domain_error)?,
        interview_date: parse_optional_datetime(
            "interview_date",
            request.interview_date.as_deref(),
        )?,
        interview_type: request
            .interview_type
            .as_deref()
            .map(InterviewType::from_str)
            .transpose()
            .map_err(translate_domain_error)?,
        interview_notes: request.interview_notes.clone(),
        offer_amount: request.offer_amount,
        offer_benefits: request.offer_benefits.clone(),
        offer_deadline: parse_optional_datetime(
            "offer_deadline",
            request.offer_deadline.as_deref(),
        )?,
        notes: request.notes.clone(),
        admin_notes: request.admin_notes.clone(),
    })
}

/// Applies a partial update to an application.
///
/// Only fields present in the request change. When the status moves to a
/// different value, the client is notified exactly once.
///
/// # Errors
///
/// Returns an error if the caller is not staff, the request changes nothing,
/// the application does not exist, or the update fails.
pub fn update_application(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    application_id: &str,
    request: &UpdateApplicationRequest,
    now: OffsetDateTime,
) -> Result<ApplicationResponse, ApiError> {
    AuthorizationService::authorize_update_application(caller)?;
    let application_id: &str = &parse_identifier("id", application_id)?;

    let update: ApplicationUpdate = build_update(request)?;
    if update.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("body"),
            message: String::from("No updatable fields were provided"),
        });
    }

    let not_found = || ApiError::ResourceNotFound {
        resource_type: String::from("Application"),
        message: format!("Application '{application_id}' does not exist"),
    };

    let existing: Application = persistence
        .get_application(application_id)
        .map_err(|e| internal(&e, caller, "update_application", "Failed to update application"))?
        .ok_or_else(not_found)?;
    let status_change: Option<ApplicationStatus> = update.status_change(&existing.status);

    let application: Application = persistence
        .update_application(application_id, &update, now)
        .map_err(|e| internal(&e, caller, "update_application", "Failed to update application"))?
        .ok_or_else(not_found)?;

    if let Some(status) = status_change {
        notify(
            persistence,
            &NotificationMessage::status_changed(
                &application.client_id,
                &application.company_name,
                &application.job_title,
                status,
                request.reason.as_deref(),
                update.interview_type,
            ),
            now,
        );
        info!(
            application_id,
            from = %existing.status,
            to = %status,
            staff_id = %caller.id,
            "Application status changed"
        );
    }

    Ok(ApplicationResponse {
        message: String::from("Application updated successfully"),
        application,
    })
}

const ONBOARDING_NEXT_STEPS: [&str; 3] = [
    "Our team will review your answers within 1-2 business days",
    "You will be notified as soon as your onboarding is approved",
    "Once approved, your application dashboard becomes available",
];

/// Stores a client's onboarding questionnaire for review.
///
/// # Errors
///
/// Returns an error if the caller is not a client, a submission is already
/// pending or approved, or the write fails.
pub fn submit_onboarding(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    responses: &serde_json::Value,
    now: OffsetDateTime,
) -> Result<SubmitOnboardingResponse, ApiError> {
    AuthorizationService::authorize_submit_onboarding(caller)?;

    let existing: Option<OnboardingData> = persistence
        .get_onboarding(&caller.id)
        .map_err(|e| internal(&e, caller, "submit_onboarding", "Failed to submit onboarding"))?;

    if let Some(existing) = existing
        && OnboardingStatus::from_str(&existing.status).is_ok_and(|s| s.is_active())
    {
        return Err(ApiError::Conflict {
            message: format!(
                "Onboarding has already been submitted (status: {})",
                existing.status
            ),
        });
    }

    let saved: OnboardingData = persistence
        .save_onboarding(&caller.id, responses, now)
        .map_err(|e| internal(&e, caller, "submit_onboarding", "Failed to submit onboarding"))?;

    notify(
        persistence,
        &NotificationMessage::onboarding_submitted(&caller.id),
        now,
    );
    info!(client_id = %caller.id, "Onboarding submitted");

    Ok(SubmitOnboardingResponse {
        success: true,
        data: OnboardingSubmissionData {
            id: saved.id,
            status: saved.status,
            submitted_at: saved.submitted_at,
        },
        next_steps: ONBOARDING_NEXT_STEPS.iter().map(ToString::to_string).collect(),
    })
}

/// Reports where a client is in onboarding.
///
/// # Errors
///
/// Returns an error if the caller may not read the client's data or the
/// lookup fails.
pub fn get_onboarding_status(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    requested_client_id: Option<&str>,
) -> Result<OnboardingStatusResponse, ApiError> {
    let client_id: String = AuthorizationService::resolve_client_scope(caller, requested_client_id)?;

    let submission: Option<OnboardingData> = match persistence.get_onboarding(&client_id) {
        Ok(submission) => submission,
        Err(e) if e.is_relation_missing() => {
            warn!(client_id, error = %e, "Onboarding not provisioned; reporting no submission");
            None
        }
        Err(e) => {
            return Err(internal(
                &e,
                caller,
                "get_onboarding_status",
                "Failed to fetch onboarding status",
            ));
        }
    };

    Ok(submission.map_or(
        OnboardingStatusResponse {
            has_submitted: false,
            status: None,
            submitted_at: None,
            approved_at: None,
            can_access_dashboard: false,
        },
        |s| OnboardingStatusResponse {
            has_submitted: true,
            can_access_dashboard: s.status == OnboardingStatus::Approved.as_str(),
            status: Some(s.status),
            submitted_at: Some(s.submitted_at),
            approved_at: s.approved_at,
        },
    ))
}

/// Approves a client's pending onboarding submission and notifies them.
///
/// # Errors
///
/// Returns an error if the caller is not staff, the client has not
/// submitted, the submission is not pending, or the update fails.
pub fn approve_onboarding(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    client_id: &str,
    now: OffsetDateTime,
) -> Result<OnboardingReviewResponse, ApiError> {
    AuthorizationService::authorize_approve_onboarding(caller)?;
    let client_id: &str = &parse_identifier("client_id", client_id)?;

    require_pending_onboarding(persistence, caller, client_id, "approve_onboarding")?;

    let approved: OnboardingData = persistence
        .approve_onboarding(client_id, &caller.id, now)
        .map_err(|e| internal(&e, caller, "approve_onboarding", "Failed to approve onboarding"))?
        .ok_or_else(|| submission_not_found(client_id))?;

    notify(
        persistence,
        &NotificationMessage::onboarding_approved(client_id),
        now,
    );
    info!(client_id, staff_id = %caller.id, "Onboarding approved");

    Ok(OnboardingReviewResponse {
        message: String::from("Onboarding approved"),
        status: approved.status,
    })
}

fn submission_not_found(client_id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Onboarding submission"),
        message: format!("Client '{client_id}' has not submitted onboarding"),
    }
}

/// Fails unless the client has a submission waiting for review.
fn require_pending_onboarding(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    client_id: &str,
    operation: &'static str,
) -> Result<(), ApiError> {
    let existing: OnboardingData = persistence
        .get_onboarding(client_id)
        .map_err(|e| internal(&e, caller, operation, "Failed to review onboarding"))?
        .ok_or_else(|| submission_not_found(client_id))?;

    match OnboardingStatus::from_str(&existing.status) {
        Ok(OnboardingStatus::PendingApproval) => Ok(()),
        Ok(OnboardingStatus::Approved) => Err(ApiError::Conflict {
            message: String::from("Onboarding has already been approved"),
        }),
        Ok(OnboardingStatus::Rejected) => Err(ApiError::Conflict {
            message: String::from("Onboarding has already been rejected"),
        }),
        Err(_) => Err(ApiError::Conflict {
            message: format!(
                "Onboarding cannot be reviewed from status '{}'",
                existing.status
            ),
        }),
    }
}

/// Rejects a client's pending onboarding submission so they can resubmit.
///
/// # Errors
///
/// Returns an error if the caller is not staff, the client has not
/// submitted, the submission is not pending, or the update fails.
pub fn reject_onboarding(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
    client_id: &str,
    now: OffsetDateTime,
) -> Result<OnboardingReviewResponse, ApiError> {
    AuthorizationService::authorize_reject_onboarding(caller)?;
    let client_id: &str = &parse_identifier("client_id", client_id)?;

    require_pending_onboarding(persistence, caller, client_id, "reject_onboarding")?;

    let rejected: OnboardingData = persistence
        .reject_onboarding(client_id)
        .map_err(|e| internal(&e, caller, "reject_onboarding", "Failed to reject onboarding"))?
        .ok_or_else(|| submission_not_found(client_id))?;

    notify(
        persistence,
        &NotificationMessage::onboarding_rejected(client_id),
        now,
    );
    info!(client_id, staff_id = %caller.id, "Onboarding rejected");

    Ok(OnboardingReviewResponse {
        message: String::from("Onboarding rejected"),
        status: rejected.status,
    })
}

/// Books a consultation.
///
/// Bookings made by an authenticated client are linked to that client and
/// later determine their tier.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn book_consultation(
    persistence: &mut Persistence,
    caller: Option<&AuthenticatedCaller>,
    request: BookConsultationRequest,
    now: OffsetDateTime,
) -> Result<BookConsultationResponse, ApiError> {
    let client_id: Option<String> = caller
        .filter(|c| c.role == Role::Client)
        .map(|c| c.id.clone());

    let booking = NewConsultation {
        client_id,
        name: request.name,
        email: request.email,
        phone: non_blank(request.phone),
        reason: request.reason,
        preferred_date: request.preferred_date,
        preferred_time: request.preferred_time,
        package_interest: request.package_interest,
        current_situation: request.current_situation,
        timeline: request.timeline,
    };

    let consultation: ConsultationData =
        persistence.create_consultation(&booking, now).map_err(|e| {
            error!(operation = "book_consultation", error = %e, "Persistence operation failed");
            ApiError::Internal {
                message: String::from("Failed to book consultation"),
            }
        })?;

    Ok(BookConsultationResponse {
        success: true,
        message: String::from("Consultation booked successfully"),
        consultation,
    })
}

/// Lists the caller's notifications with the unread count.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub fn list_notifications(
    persistence: &mut Persistence,
    caller: &AuthenticatedCaller,
) -> Result<NotificationsResponse, ApiError> {
    let notifications: Vec<NotificationData> = persistence
        .list_notifications(&caller.id)
        .map_err(|e| internal(&e, caller, "list_notifications", "Failed to fetch notifications"))?;
    let unread_count: i64 = persistence
        .count_unread_notifications(&caller.id)
        .map_err(|e| internal(&e, caller, "list_notifications", "Failed to fetch notifications"))?;

    Ok(NotificationsResponse {
        notifications,
        unread_count,
    })
}
