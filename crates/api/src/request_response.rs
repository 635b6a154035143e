// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Request bodies arrive already sanitized by the validation layer, so the
//! request DTOs mirror the registered schemas field for field.

use apply_bureau_domain::{Application, ApplicationStatsReport};
use apply_bureau_persistence::{ConsultationData, NotificationData};
use serde::{Deserialize, Serialize};

/// Query parameters for listing applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListApplicationsQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Required for staff; ignored unless it matches for clients.
    pub client_id: Option<String>,
}

/// Query parameters for reading a client's statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatsQuery {
    pub client_id: Option<String>,
}

/// API response for the application list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListApplicationsResponse {
    pub applications: Vec<Application>,
    /// Number of matching applications before pagination.
    pub total: usize,
    pub stats: ApplicationStatsReport,
}

/// API request to create an application on a client's behalf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateApplicationRequest {
    pub client_id: String,
    pub company_name: String,
    pub job_title: String,
    pub job_url: Option<String>,
    pub job_description: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub salary_range: Option<String>,
    pub application_method: Option<String>,
    pub application_strategy: Option<String>,
    pub admin_notes: Option<String>,
    /// RFC 3339. Defaults to the time of the request.
    pub date_applied: Option<String>,
    /// Defaults to `applied`.
    pub status: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub notes: Option<String>,
}

/// API request to update an application. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateApplicationRequest {
    pub status: Option<String>,
    /// Explains a status change; included in the client's notification.
    pub reason: Option<String>,
    pub interview_date: Option<String>,
    pub interview_type: Option<String>,
    pub interview_notes: Option<String>,
    pub offer_amount: Option<f64>,
    pub offer_benefits: Option<String>,
    pub offer_deadline: Option<String>,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
}

/// API response carrying a single application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub message: String,
    pub application: Application,
}

/// Summary of a stored onboarding submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingSubmissionData {
    pub id: String,
    pub status: String,
    pub submitted_at: String,
}

/// API response for an accepted onboarding questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOnboardingResponse {
    pub success: bool,
    pub data: OnboardingSubmissionData,
    pub next_steps: Vec<String>,
}

/// API response describing where a client is in onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStatusResponse {
    pub has_submitted: bool,
    pub status: Option<String>,
    pub submitted_at: Option<String>,
    pub approved_at: Option<String>,
    pub can_access_dashboard: bool,
}

/// API response for an approved or rejected onboarding submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingReviewResponse {
    pub message: String,
    pub status: String,
}

/// API request to book a consultation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookConsultationRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub reason: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub package_interest: String,
    pub current_situation: Option<String>,
    pub timeline: String,
}

/// API response for a booked consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConsultationResponse {
    pub success: bool,
    pub message: String,
    pub consultation: ConsultationData,
}

/// API response for a caller's notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationData>,
    pub unread_count: i64,
}
