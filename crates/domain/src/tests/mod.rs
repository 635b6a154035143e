// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod filter;
mod stats;

use crate::Application;
use time::OffsetDateTime;
use time::macros::datetime;

/// Builds an application with the given status and submission date.
pub fn create_test_application(
    id: &str,
    status: &str,
    date_applied: OffsetDateTime,
) -> Application {
    Application {
        id: id.to_string(),
        client_id: String::from("6f1c2a8e-3d44-4d7b-9a51-0c2f7e9b1a23"),
        company_name: String::from("Acme Corp"),
        job_title: String::from("Software Engineer"),
        job_url: None,
        job_description: None,
        location: None,
        job_type: None,
        salary_range: None,
        application_method: None,
        application_strategy: None,
        status: status.to_string(),
        date_applied,
        interview_date: None,
        interview_type: None,
        interview_notes: None,
        offer_amount: None,
        offer_benefits: None,
        offer_deadline: None,
        resume_url: None,
        cover_letter_url: None,
        notes: None,
        admin_notes: None,
        created_at: date_applied,
        updated_at: date_applied,
    }
}

/// Wednesday, 2026-10-21 15:30 UTC.
pub const NOW: OffsetDateTime = datetime!(2026-10-21 15:30 UTC);

/// Sunday, 2026-10-18 00:00 UTC: the week containing `NOW`.
pub const WEEK_START: OffsetDateTime = datetime!(2026-10-18 00:00 UTC);
