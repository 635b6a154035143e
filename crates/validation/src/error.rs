// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable classification of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Wrong JSON type, or a required field is missing.
    InvalidType,
    /// Below a minimum length, count or value.
    TooSmall,
    /// Above a maximum length, count or value.
    TooBig,
    /// A string failed a format check (pattern, email, URL, UUID, datetime).
    InvalidString,
    /// A value outside an enumeration.
    InvalidEnumValue,
    /// The body could not be parsed as JSON at all.
    InvalidJson,
}

impl IssueCode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::InvalidString => "invalid_string",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::InvalidJson => "invalid_json",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rule violation, addressed by a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending value, e.g. `target_job_titles.2`.
    pub field: String,
    pub message: String,
    pub code: IssueCode,
}

impl ValidationIssue {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: IssueCode) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

/// The ordered, non-empty list of issues produced by a failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed with {} issue(s)", .issues.len())]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// Wraps a list of issues. Returns `None` when the list is empty.
    #[must_use]
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    /// A single issue reporting a body that is not valid JSON.
    #[must_use]
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue::new(
                "body",
                message,
                IssueCode::InvalidJson,
            )],
        }
    }

    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// Returns true if any issue is reported for exactly this field path.
    #[must_use]
    pub fn has_issue_for(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}
