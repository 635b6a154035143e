// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use apply_bureau_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AuthenticatedCaller, BookConsultationRequest, CreateApplicationRequest, Role};

pub const CLIENT_ID: &str = "6f1c2a8e-3d44-4d7b-9a51-0c2f7e9b1a23";
pub const OTHER_CLIENT_ID: &str = "0b8e4f5c-91d2-4c1e-8f3a-7d6b2a9c4e10";
pub const STAFF_ID: &str = "a3d9c6b1-2f47-4e8a-b5c0-19e7f4d2a6b8";

/// A Wednesday; the week began on Sunday 2026-10-18.
pub const NOW: OffsetDateTime = datetime!(2026-10-21 15:30 UTC);

pub const TZ: chrono_tz::Tz = chrono_tz::UTC;

pub fn create_test_client() -> AuthenticatedCaller {
    AuthenticatedCaller::new(String::from(CLIENT_ID), Role::Client)
}

pub fn create_test_other_client() -> AuthenticatedCaller {
    AuthenticatedCaller::new(String::from(OTHER_CLIENT_ID), Role::Client)
}

pub fn create_test_staff() -> AuthenticatedCaller {
    AuthenticatedCaller::new(String::from(STAFF_ID), Role::Staff)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_application_request(
    company_name: &str,
    job_title: &str,
) -> CreateApplicationRequest {
    CreateApplicationRequest {
        client_id: String::from(CLIENT_ID),
        company_name: company_name.to_string(),
        job_title: job_title.to_string(),
        job_url: Some(String::from("https://jobs.example.com/42")),
        location: Some(String::from("Remote")),
        job_type: Some(String::from("full-time")),
        admin_notes: Some(String::from("Strong referral")),
        ..CreateApplicationRequest::default()
    }
}

pub fn create_test_booking(package_interest: &str) -> BookConsultationRequest {
    BookConsultationRequest {
        name: String::from("Jane Doe"),
        email: String::from("jane@example.com"),
        phone: Some(String::from("+1 555 0100")),
        reason: String::from("I want help landing a senior engineering role."),
        preferred_date: String::from("2026-11-04T00:00:00Z"),
        preferred_time: String::from("14:30"),
        package_interest: package_interest.to_string(),
        current_situation: None,
        timeline: String::from("1-3_months"),
    }
}
