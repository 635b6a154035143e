// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod initialization_tests;

use apply_bureau_domain::{ApplicationStatus, NewApplication};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::NewConsultation;

pub const CLIENT_ID: &str = "6f1c2a8e-3d44-4d7b-9a51-0c2f7e9b1a23";
pub const OTHER_CLIENT_ID: &str = "0b8e4f5c-91d2-4c1e-8f3a-7d6b2a9c4e10";
pub const STAFF_ID: &str = "a3d9c6b1-2f47-4e8a-b5c0-19e7f4d2a6b8";

pub const NOW: OffsetDateTime = datetime!(2026-10-21 15:30 UTC);

pub fn create_test_new_application(client_id: &str, company_name: &str) -> NewApplication {
    NewApplication {
        client_id: client_id.to_string(),
        company_name: company_name.to_string(),
        job_title: String::from("Software Engineer"),
        job_url: Some(String::from("https://jobs.example.com/1")),
        job_description: None,
        location: Some(String::from("Remote")),
        job_type: Some(String::from("full-time")),
        salary_range: None,
        application_method: None,
        application_strategy: None,
        status: ApplicationStatus::Applied,
        date_applied: NOW,
        resume_url: None,
        cover_letter_url: None,
        notes: None,
        admin_notes: Some(String::from("Referred by a former colleague")),
    }
}

pub fn create_test_consultation(client_id: Option<&str>, package_interest: &str) -> NewConsultation {
    NewConsultation {
        client_id: client_id.map(str::to_string),
        name: String::from("Jane Doe"),
        email: String::from("jane@example.com"),
        phone: None,
        reason: String::from("Looking for help with a career change."),
        preferred_date: String::from("2026-11-04T00:00:00Z"),
        preferred_time: String::from("14:30"),
        package_interest: package_interest.to_string(),
        current_situation: None,
        timeline: String::from("1-3_months"),
    }
}
