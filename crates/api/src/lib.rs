// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application tracking API.
//!
//! This crate sits between the HTTP server and persistence. It decides who
//! may do what, turns sanitized request bodies into domain values and
//! records the notifications each operation produces.

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

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedCaller, AuthorizationService, Role, parse_identifier};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use handlers::{
    approve_onboarding, book_consultation, create_application, get_application_stats,
    get_onboarding_status, list_applications, list_notifications, reject_onboarding,
    submit_onboarding, update_application,
};
pub use request_response::{
    ApplicationResponse, BookConsultationRequest, BookConsultationResponse,
    CreateApplicationRequest, ListApplicationsQuery, ListApplicationsResponse,
    NotificationsResponse, OnboardingReviewResponse, OnboardingStatusResponse,
    OnboardingSubmissionData, StatsQuery, SubmitOnboardingResponse, UpdateApplicationRequest,
};
