// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The request schemas accepted by each mutating endpoint.

use crate::patterns;
use crate::rules::{FieldKind, FieldRule, Pattern, StringRule};
use crate::schema::ValidationSchema;
use std::sync::LazyLock;

const SALARY_RANGE: Pattern = Pattern::new(
    "Salary range must look like \"$50,000 - $70,000\"",
    patterns::is_salary_range,
);
const TIME_OF_DAY: Pattern = Pattern::new(
    "Time must be in 24-hour HH:MM format",
    patterns::is_time_of_day,
);
const PERSON_NAME: Pattern = Pattern::new(
    "Name can only contain letters, spaces, hyphens, and apostrophes",
    patterns::is_person_name,
);
const STRONG_PASSWORD: Pattern = Pattern::new(
    "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character",
    patterns::is_strong_password,
);

const APPLICATION_STATUSES: &[&str] = &[
    "applied",
    "under_review",
    "interview_scheduled",
    "interview_completed",
    "second_round",
    "offer_received",
    "offer_accepted",
    "offer_declined",
    "rejected",
    "withdrawn",
    "closed",
];
const INTERVIEW_TYPES: &[&str] = &["phone", "video", "in_person", "panel"];
const JOB_TYPES: &[&str] = &["full-time", "part-time", "contract", "remote"];
const COMPANY_SIZES: &[&str] = &["startup", "small", "medium", "large", "enterprise"];
const REMOTE_PREFERENCES: &[&str] = &["remote", "hybrid", "onsite", "flexible"];
const SEARCH_TIMELINES: &[&str] = &[
    "immediate",
    "1-3_months",
    "3-6_months",
    "6-12_months",
    "flexible",
];
const VOLUME_PREFERENCES: &[&str] = &["quality_focused", "balanced", "high_volume"];
const PACKAGE_INTERESTS: &[&str] = &["essential", "professional", "executive", "not_sure"];
const CONSULTATION_TIMELINES: &[&str] = &["immediate", "1-3_months", "3-6_months", "flexible"];

/// Identifies a registered request schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    Onboarding,
    Login,
    Invite,
    CompleteRegistration,
    CreateApplication,
    UpdateApplication,
    ConsultationBooking,
}

static ONBOARDING: LazyLock<ValidationSchema> = LazyLock::new(onboarding);
static LOGIN: LazyLock<ValidationSchema> = LazyLock::new(login);
static INVITE: LazyLock<ValidationSchema> = LazyLock::new(invite);
static COMPLETE_REGISTRATION: LazyLock<ValidationSchema> =
    LazyLock::new(complete_registration);
static CREATE_APPLICATION: LazyLock<ValidationSchema> = LazyLock::new(create_application);
static UPDATE_APPLICATION: LazyLock<ValidationSchema> = LazyLock::new(update_application);
static CONSULTATION_BOOKING: LazyLock<ValidationSchema> = LazyLock::new(consultation_booking);

impl SchemaId {
    pub const ALL: [Self; 7] = [
        Self::Onboarding,
        Self::Login,
        Self::Invite,
        Self::CompleteRegistration,
        Self::CreateApplication,
        Self::UpdateApplication,
        Self::ConsultationBooking,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Login => "login",
            Self::Invite => "invite",
            Self::CompleteRegistration => "complete_registration",
            Self::CreateApplication => "create_application",
            Self::UpdateApplication => "update_application",
            Self::ConsultationBooking => "consultation_booking",
        }
    }

    /// Returns the schema, building it on first use.
    #[must_use]
    pub fn schema(&self) -> &'static ValidationSchema {
        match self {
            Self::Onboarding => &ONBOARDING,
            Self::Login => &LOGIN,
            Self::Invite => &INVITE,
            Self::CompleteRegistration => &COMPLETE_REGISTRATION,
            Self::CreateApplication => &CREATE_APPLICATION,
            Self::UpdateApplication => &UPDATE_APPLICATION,
            Self::ConsultationBooking => &CONSULTATION_BOOKING,
        }
    }
}

fn text(min: usize, max: usize) -> FieldKind {
    FieldKind::string(StringRule::trimmed().between(min, max))
}

fn text_max(max: usize) -> FieldKind {
    FieldKind::string(StringRule::trimmed().max(max))
}

fn text_list(min: usize, max: usize) -> FieldKind {
    FieldKind::array(text(1, 200), min, max)
}

fn salary_range() -> FieldKind {
    FieldKind::string(StringRule::trimmed().pattern(SALARY_RANGE))
}

fn confidence(name: &'static str) -> FieldRule {
    FieldRule::with_default(name, FieldKind::integer(1, 10), 5)
}

fn onboarding() -> ValidationSchema {
    ValidationSchema::strict(
        "onboarding",
        vec![
            FieldRule::required("target_job_titles", text_list(1, 5)),
            FieldRule::required("target_industries", text_list(1, 5)),
            FieldRule::optional(
                "target_company_sizes",
                FieldKind::array(FieldKind::Enum(COMPANY_SIZES), 0, 5),
            ),
            FieldRule::required("target_locations", text_list(1, 10)),
            FieldRule::with_default(
                "remote_work_preference",
                FieldKind::Enum(REMOTE_PREFERENCES),
                "hybrid",
            ),
            FieldRule::optional("current_salary_range", salary_range()),
            FieldRule::required("target_salary_range", salary_range()),
            confidence("salary_negotiation_comfort"),
            FieldRule::required("years_of_experience", FieldKind::integer(0, 50)),
            FieldRule::required("key_technical_skills", text_list(1, 20)),
            FieldRule::optional("soft_skills", text_list(0, 10)),
            FieldRule::optional("certifications", text_list(0, 10)),
            FieldRule::with_default(
                "job_search_timeline",
                FieldKind::Enum(SEARCH_TIMELINES),
                "3-6_months",
            ),
            FieldRule::with_default(
                "application_volume_preference",
                FieldKind::Enum(VOLUME_PREFERENCES),
                "quality_focused",
            ),
            confidence("networking_comfort"),
            confidence("interview_confidence"),
            FieldRule::required("career_goals_short_term", text(10, 1000)),
            FieldRule::optional("career_goals_long_term", text(10, 1000)),
            FieldRule::required("biggest_career_challenges", text_list(1, 5)),
            FieldRule::required("support_areas_needed", text_list(1, 10)),
        ],
    )
}

fn login() -> ValidationSchema {
    ValidationSchema::strict(
        "login",
        vec![
            FieldRule::required("email", FieldKind::Email),
            FieldRule::required("password", FieldKind::string(StringRule::raw().min(8))),
        ],
    )
}

fn invite() -> ValidationSchema {
    ValidationSchema::strict(
        "invite",
        vec![
            FieldRule::required("email", FieldKind::Email),
            FieldRule::required(
                "full_name",
                FieldKind::string(StringRule::trimmed().between(2, 100).pattern(PERSON_NAME)),
            ),
        ],
    )
}

fn complete_registration() -> ValidationSchema {
    ValidationSchema::strict(
        "complete_registration",
        vec![
            FieldRule::required("token", FieldKind::string(StringRule::trimmed().min(10))),
            FieldRule::required(
                "password",
                FieldKind::string(StringRule::raw().min(8).pattern(STRONG_PASSWORD)),
            ),
            FieldRule::optional(
                "full_name",
                FieldKind::string(StringRule::trimmed().between(2, 100).pattern(PERSON_NAME)),
            ),
        ],
    )
}

fn create_application() -> ValidationSchema {
    ValidationSchema::strict(
        "create_application",
        vec![
            FieldRule::required("client_id", FieldKind::Uuid),
            FieldRule::required("job_title", text(2, 200)),
            FieldRule::required("company_name", text(2, 100)).alias("company"),
            FieldRule::optional("job_description", text_max(5000)),
            FieldRule::optional("job_url", FieldKind::Url { allow_empty: true }),
            FieldRule::optional("salary_range", text_max(100)),
            FieldRule::optional("location", text_max(200)),
            FieldRule::optional("job_type", FieldKind::Enum(JOB_TYPES)),
            FieldRule::optional("application_method", text_max(100)),
            FieldRule::optional("application_strategy", text_max(1000)),
            FieldRule::optional("admin_notes", text_max(1000)),
            FieldRule::optional("date_applied", FieldKind::DateTime),
            FieldRule::with_default("status", FieldKind::Enum(APPLICATION_STATUSES), "applied"),
            FieldRule::optional("resume_url", FieldKind::Url { allow_empty: true }),
            FieldRule::optional("cover_letter_url", FieldKind::Url { allow_empty: true }),
            FieldRule::optional("notes", text_max(2000)),
        ],
    )
}

fn update_application() -> ValidationSchema {
    ValidationSchema::strict(
        "update_application",
        vec![
            FieldRule::optional("status", FieldKind::Enum(APPLICATION_STATUSES)),
            FieldRule::optional("reason", text_max(500)),
            FieldRule::optional("interview_date", FieldKind::DateTime),
            FieldRule::optional("interview_type", FieldKind::Enum(INTERVIEW_TYPES)),
            FieldRule::optional("interview_notes", text_max(1000)),
            FieldRule::optional("offer_amount", FieldKind::positive_number()).alias("offer_salary"),
            FieldRule::optional("offer_benefits", text_max(1000)),
            FieldRule::optional("offer_deadline", FieldKind::DateTime),
            FieldRule::optional("notes", text_max(2000)),
            FieldRule::optional("admin_notes", text_max(1000)),
        ],
    )
}

fn consultation_booking() -> ValidationSchema {
    ValidationSchema::strict(
        "consultation_booking",
        vec![
            FieldRule::required(
                "name",
                FieldKind::string(StringRule::trimmed().between(2, 100).pattern(PERSON_NAME)),
            ),
            FieldRule::required("email", FieldKind::Email),
            FieldRule::optional("phone", text_max(20)),
            FieldRule::required("reason", text(10, 500)),
            FieldRule::required("preferred_date", FieldKind::DateTime),
            FieldRule::required(
                "preferred_time",
                FieldKind::string(StringRule::trimmed().pattern(TIME_OF_DAY)),
            ),
            FieldRule::required("package_interest", FieldKind::Enum(PACKAGE_INTERESTS)),
            FieldRule::optional("current_situation", text_max(500)),
            FieldRule::required("timeline", FieldKind::Enum(CONSULTATION_TIMELINES)),
        ],
    )
}
