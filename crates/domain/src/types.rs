// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The status of a tracked job application.
///
/// Status changes are plain field writes; any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    UnderReview,
    InterviewScheduled,
    InterviewCompleted,
    SecondRound,
    OfferReceived,
    OfferAccepted,
    OfferDeclined,
    Rejected,
    Withdrawn,
    Closed,
}

impl ApplicationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 11] = [
        Self::Applied,
        Self::UnderReview,
        Self::InterviewScheduled,
        Self::InterviewCompleted,
        Self::SecondRound,
        Self::OfferReceived,
        Self::OfferAccepted,
        Self::OfferDeclined,
        Self::Rejected,
        Self::Withdrawn,
        Self::Closed,
    ];

    /// Returns the storage and wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::UnderReview => "under_review",
            Self::InterviewScheduled => "interview_scheduled",
            Self::InterviewCompleted => "interview_completed",
            Self::SecondRound => "second_round",
            Self::OfferReceived => "offer_received",
            Self::OfferAccepted => "offer_accepted",
            Self::OfferDeclined => "offer_declined",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
            Self::Closed => "closed",
        }
    }

    /// Returns a human-readable label for notifications.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::UnderReview => "Under Review",
            Self::InterviewScheduled => "Interview Scheduled",
            Self::InterviewCompleted => "Interview Completed",
            Self::SecondRound => "Second Round",
            Self::OfferReceived => "Offer Received",
            Self::OfferAccepted => "Offer Accepted",
            Self::OfferDeclined => "Offer Declined",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
            Self::Closed => "Closed",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidApplicationStatus {
                status: s.to_string(),
            })
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The coarse buckets used by the statistics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Applied,
    Interviewing,
    Offer,
    Rejected,
    Withdrawn,
}

impl StatusBucket {
    /// Collapses a stored status value into its bucket.
    ///
    /// The stored value is matched as raw text because rows written by older
    /// clients may carry values outside `ApplicationStatus`. Anything that is
    /// not recognized counts as `Applied`.
    #[must_use]
    pub fn from_raw_status(status: &str) -> Self {
        match status {
            "rejected" => Self::Rejected,
            "withdrawn" => Self::Withdrawn,
            s if s.contains("interview") => Self::Interviewing,
            s if s.contains("offer") => Self::Offer,
            _ => Self::Applied,
        }
    }
}

/// Service tier purchased by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tier {
    #[default]
    #[serde(rename = "Tier 1")]
    Tier1,
    #[serde(rename = "Tier 2")]
    Tier2,
    #[serde(rename = "Tier 3")]
    Tier3,
}

impl Tier {
    /// Weekly target used for any tier label outside the table.
    pub const DEFAULT_WEEKLY_TARGET: u32 = 17;

    /// Returns the display label, e.g. `"Tier 2"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Tier3 => "Tier 3",
        }
    }

    /// Returns the number of applications staff aim to submit per week.
    #[must_use]
    pub const fn weekly_target(&self) -> u32 {
        match self {
            Self::Tier1 => 17,
            Self::Tier2 => 30,
            Self::Tier3 => 50,
        }
    }

    /// Parses a literal tier label such as `"Tier 3"`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Tier 1" => Some(Self::Tier1),
            "Tier 2" => Some(Self::Tier2),
            "Tier 3" => Some(Self::Tier3),
            _ => None,
        }
    }

    /// Looks up the weekly target for an arbitrary tier label.
    #[must_use]
    pub fn weekly_target_for_label(label: &str) -> u32 {
        Self::from_label(label).map_or(Self::DEFAULT_WEEKLY_TARGET, |tier| tier.weekly_target())
    }

    /// Resolves a tier from a consultation's package interest.
    ///
    /// Accepts either a package name (`essential`, `professional`,
    /// `executive`) or a literal tier label. Returns `Tier1` when the value
    /// is missing or does not name a tier.
    #[must_use]
    pub fn resolve(package_interest: Option<&str>) -> Self {
        let Some(value) = package_interest else {
            return Self::default();
        };

        Self::from_label(value)
            .or_else(|| {
                crate::PackageInterest::from_str(value.trim())
                    .ok()
                    .and_then(|package| package.tier())
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The kind of interview scheduled for an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Phone,
    Video,
    InPerson,
    Panel,
}

impl InterviewType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Video => "video",
            Self::InPerson => "in_person",
            Self::Panel => "panel",
        }
    }
}

impl FromStr for InterviewType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(Self::Phone),
            "video" => Ok(Self::Video),
            "in_person" => Ok(Self::InPerson),
            "panel" => Ok(Self::Panel),
            _ => Err(DomainError::InvalidInterviewType {
                interview_type: s.to_string(),
            }),
        }
    }
}

/// A job application tracked by staff on behalf of a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier (UUID).
    pub id: String,
    /// The owning client's identifier (UUID).
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
    /// The stored status value. Kept as raw text; see `StatusBucket::from_raw_status`.
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_applied: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub interview_date: Option<OffsetDateTime>,
    pub interview_type: Option<String>,
    pub interview_notes: Option<String>,
    pub offer_amount: Option<f64>,
    pub offer_benefits: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub offer_deadline: Option<OffsetDateTime>,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    /// Notes visible to the client.
    pub notes: Option<String>,
    /// Staff-only notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Application {
    /// Returns the coarse statistics bucket for this application's status.
    #[must_use]
    pub fn bucket(&self) -> StatusBucket {
        StatusBucket::from_raw_status(&self.status)
    }

    /// Strips staff-only fields before the record is shown to a client.
    #[must_use]
    pub fn redacted_for_client(mut self) -> Self {
        self.admin_notes = None;
        self
    }
}

/// The fields required to create an application.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
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
    pub status: ApplicationStatus,
    pub date_applied: OffsetDateTime,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
}

/// A partial update to an application.
///
/// `None` means "leave the stored value untouched", never "clear it".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplicationUpdate {
    pub status: Option<ApplicationStatus>,
    pub interview_date: Option<OffsetDateTime>,
    pub interview_type: Option<InterviewType>,
    pub interview_notes: Option<String>,
    pub offer_amount: Option<f64>,
    pub offer_benefits: Option<String>,
    pub offer_deadline: Option<OffsetDateTime>,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
}

impl ApplicationUpdate {
    /// Returns true if the update would not modify any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.interview_date.is_none()
            && self.interview_type.is_none()
            && self.interview_notes.is_none()
            && self.offer_amount.is_none()
            && self.offer_benefits.is_none()
            && self.offer_deadline.is_none()
            && self.notes.is_none()
            && self.admin_notes.is_none()
    }

    /// Returns the new status if this update actually changes it.
    #[must_use]
    pub fn status_change(&self, current: &str) -> Option<ApplicationStatus> {
        self.status.filter(|status| status.as_str() != current)
    }
}
