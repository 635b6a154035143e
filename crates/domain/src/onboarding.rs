// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Onboarding and consultation enumerations.

use crate::error::DomainError;
use crate::types::Tier;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Review state of a client's onboarding questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    /// Submitted and waiting for staff review.
    PendingApproval,
    /// Reviewed and accepted by staff.
    Approved,
    /// Reviewed and sent back; the client may submit again.
    Rejected,
}

impl OnboardingStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if a submission in this state blocks a new submission.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::PendingApproval | Self::Approved)
    }
}

impl FromStr for OnboardingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidOnboardingStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// The package a prospect expressed interest in when booking a consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageInterest {
    Essential,
    Professional,
    Executive,
    NotSure,
}

impl PackageInterest {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Professional => "professional",
            Self::Executive => "executive",
            Self::NotSure => "not_sure",
        }
    }

    /// Returns the service tier this package corresponds to, if any.
    #[must_use]
    pub const fn tier(&self) -> Option<Tier> {
        match self {
            Self::Essential => Some(Tier::Tier1),
            Self::Professional => Some(Tier::Tier2),
            Self::Executive => Some(Tier::Tier3),
            Self::NotSure => None,
        }
    }
}

impl FromStr for PackageInterest {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "essential" => Ok(Self::Essential),
            "professional" => Ok(Self::Professional),
            "executive" => Ok(Self::Executive),
            "not_sure" => Ok(Self::NotSure),
            _ => Err(DomainError::InvalidPackageInterest {
                package: s.to_string(),
            }),
        }
    }
}
