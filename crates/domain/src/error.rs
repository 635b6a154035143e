// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while interpreting domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The application status is not one of the known statuses.
    InvalidApplicationStatus {
        /// The rejected status value.
        status: String,
    },
    /// The interview type is not one of the known interview types.
    InvalidInterviewType {
        /// The rejected interview type value.
        interview_type: String,
    },
    /// The onboarding status is not one of the known statuses.
    InvalidOnboardingStatus {
        /// The rejected status value.
        status: String,
    },
    /// The package interest is not one of the known packages.
    InvalidPackageInterest {
        /// The rejected package value.
        package: String,
    },
    /// The configured timezone could not be parsed.
    InvalidTimezone(String),
    /// Date arithmetic overflowed or produced a nonexistent local time.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidApplicationStatus { status } => {
                write!(f, "Invalid application status: '{status}'")
            }
            Self::InvalidInterviewType { interview_type } => {
                write!(f, "Invalid interview type: '{interview_type}'")
            }
            Self::InvalidOnboardingStatus { status } => {
                write!(f, "Invalid onboarding status: '{status}'")
            }
            Self::InvalidPackageInterest { package } => {
                write!(f, "Invalid package interest: '{package}'")
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: '{tz}'"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
