// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

/// A consultation booking to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsultation {
    /// Set when an authenticated client made the booking.
    pub client_id: Option<String>,
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

/// A stored consultation booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationData {
    pub id: String,
    pub client_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub reason: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub package_interest: String,
    pub current_situation: Option<String>,
    pub timeline: String,
    pub status: String,
    pub created_at: String,
}

/// A stored onboarding questionnaire and its review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingData {
    pub id: String,
    pub client_id: String,
    /// The sanitized questionnaire answers.
    pub responses: serde_json::Value,
    pub status: String,
    pub submitted_at: String,
    pub approved_at: Option<String>,
    pub approved_by: Option<String>,
}
