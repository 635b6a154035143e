// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client notification content.

use crate::types::{ApplicationStatus, InterviewType};
use serde::{Deserialize, Serialize};

/// The event a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ApplicationCreated,
    ApplicationStatusChanged,
    OnboardingSubmitted,
    OnboardingApproved,
    OnboardingRejected,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationCreated => "application_created",
            Self::ApplicationStatusChanged => "application_status_changed",
            Self::OnboardingSubmitted => "onboarding_submitted",
            Self::OnboardingApproved => "onboarding_approved",
            Self::OnboardingRejected => "onboarding_rejected",
        }
    }
}

/// A notification addressed to a single user, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl NotificationMessage {
    /// Announces an application submitted on the client's behalf.
    #[must_use]
    pub fn application_created(client_id: &str, company_name: &str, job_title: &str) -> Self {
        Self {
            user_id: client_id.to_string(),
            kind: NotificationKind::ApplicationCreated,
            title: String::from("New Application Submitted"),
            message: format!("We applied to {job_title} at {company_name} on your behalf."),
        }
    }

    /// Announces a status change, with the reason and interview type when given.
    #[must_use]
    pub fn status_changed(
        client_id: &str,
        company_name: &str,
        job_title: &str,
        status: ApplicationStatus,
        reason: Option<&str>,
        interview_type: Option<InterviewType>,
    ) -> Self {
        let mut message: String = format!(
            "Your application for {job_title} at {company_name} is now: {}.",
            status.label()
        );
        if status == ApplicationStatus::InterviewScheduled
            && let Some(kind) = interview_type
        {
            message.push_str(&format!(
                " Interview format: {}.",
                kind.as_str().replace('_', " ")
            ));
        }
        if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
            message.push_str(&format!(" Reason: {reason}"));
        }

        Self {
            user_id: client_id.to_string(),
            kind: NotificationKind::ApplicationStatusChanged,
            title: format!("Application Update: {}", status.label()),
            message,
        }
    }

    /// Confirms receipt of the onboarding questionnaire.
    #[must_use]
    pub fn onboarding_submitted(client_id: &str) -> Self {
        Self {
            user_id: client_id.to_string(),
            kind: NotificationKind::OnboardingSubmitted,
            title: String::from("Onboarding Received"),
            message: String::from(
                "Thanks for completing your onboarding questionnaire. Our team will review it shortly.",
            ),
        }
    }

    /// Tells the client their onboarding was approved.
    #[must_use]
    pub fn onboarding_approved(client_id: &str) -> Self {
        Self {
            user_id: client_id.to_string(),
            kind: NotificationKind::OnboardingApproved,
            title: String::from("Onboarding Approved"),
            message: String::from(
                "Your onboarding has been approved. Your dashboard is now available.",
            ),
        }
    }
    /// Tells the client their onboarding needs another pass.
    #[must_use]
    pub fn onboarding_rejected(client_id: &str) -> Self {
        Self {
            user_id: client_id.to_string(),
            kind: NotificationKind::OnboardingRejected,
            title: String::from("Onboarding Needs Changes"),
            message: String::from(
                "Your onboarding questionnaire was not approved. Please review your answers and submit it again.",
            ),
        }
    }
}
