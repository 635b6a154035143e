// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-client application statistics.
//!
//! The report is **computed**, never stored. It is a pure function of the
//! client's applications, their tier, and the start of the current week.
//!
//! ## Invariants
//!
//! - Percentages are rounded half-up to whole numbers
//! - Every rate is 0 when its denominator is 0
//! - Weekly progress is clamped to 100
//! - The week starts on Sunday at local midnight in the configured timezone

use crate::error::DomainError;
use crate::types::{Application, StatusBucket, Tier};
use chrono::{Datelike, Days, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Counts of applications per coarse status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub applied: u32,
    pub interviewing: u32,
    pub offer: u32,
    pub rejected: u32,
    pub withdrawn: u32,
}

impl StatusBreakdown {
    fn record(&mut self, bucket: StatusBucket) {
        let slot: &mut u32 = match bucket {
            StatusBucket::Applied => &mut self.applied,
            StatusBucket::Interviewing => &mut self.interviewing,
            StatusBucket::Offer => &mut self.offer,
            StatusBucket::Rejected => &mut self.rejected,
            StatusBucket::Withdrawn => &mut self.withdrawn,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Aggregate view of one client's applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStatsReport {
    /// Tier label, e.g. `"Tier 1"`.
    pub tier: String,
    /// Applications per week promised for the tier.
    pub weekly_target: u32,
    pub total_applications: u32,
    pub applications_this_week: u32,
    /// `applications_this_week / weekly_target` as a percentage, at most 100.
    pub weekly_progress: u32,
    pub status_breakdown: StatusBreakdown,
    /// `(interviewing + offer) / total` as a percentage.
    pub response_rate: u32,
    /// `offer / total` as a percentage.
    pub offer_rate: u32,
}

impl ApplicationStatsReport {
    /// The zeroed report for a client with no applications.
    #[must_use]
    pub fn empty(tier: Tier) -> Self {
        Self {
            tier: tier.label().to_string(),
            weekly_target: tier.weekly_target(),
            total_applications: 0,
            applications_this_week: 0,
            weekly_progress: 0,
            status_breakdown: StatusBreakdown::default(),
            response_rate: 0,
            offer_rate: 0,
        }
    }
}

/// Computes the statistics report for a client's applications.
///
/// # Arguments
///
/// * `applications` - Every application owned by the client
/// * `tier` - The client's resolved tier
/// * `week_start` - Start of the current week (see [`week_start`])
///
/// An application counts toward this week when its `date_applied` is at or
/// after `week_start`.
#[must_use]
pub fn compute_application_stats(
    applications: &[Application],
    tier: Tier,
    week_start: OffsetDateTime,
) -> ApplicationStatsReport {
    let mut breakdown: StatusBreakdown = StatusBreakdown::default();
    let mut this_week: u32 = 0;

    for application in applications {
        breakdown.record(application.bucket());
        if application.date_applied >= week_start {
            this_week = this_week.saturating_add(1);
        }
    }

    let total: u32 = u32::try_from(applications.len()).unwrap_or(u32::MAX);
    let weekly_target: u32 = tier.weekly_target();
    let responses: u32 = breakdown.interviewing.saturating_add(breakdown.offer);

    ApplicationStatsReport {
        tier: tier.label().to_string(),
        weekly_target,
        total_applications: total,
        applications_this_week: this_week,
        weekly_progress: percentage(this_week, weekly_target).min(100),
        status_breakdown: breakdown,
        response_rate: percentage(responses, total),
        offer_rate: percentage(breakdown.offer, total),
    }
}

/// Rounds `part / whole * 100` half-up. Returns 0 when `whole` is 0.
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part: u64 = u64::from(part);
    let whole: u64 = u64::from(whole);
    let rounded: u64 = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Parses an IANA timezone name such as `America/New_York`.
///
/// # Errors
///
/// Returns an error if the name is not a known timezone.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Returns the most recent Sunday at local midnight, at or before `now`.
///
/// When local midnight does not exist (a DST gap), the first instant of the
/// day is used instead.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented or the local
/// date arithmetic overflows.
pub fn week_start(now: OffsetDateTime, tz: Tz) -> Result<OffsetDateTime, DomainError> {
    let utc = chrono::DateTime::<chrono::Utc>::from_timestamp(now.unix_timestamp(), 0)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("converting the current time"),
        })?;
    let local = utc.with_timezone(&tz);

    let days_since_sunday: u64 = u64::from(local.weekday().num_days_from_sunday());
    let sunday = local
        .date_naive()
        .checked_sub_days(Days::new(days_since_sunday))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("finding the start of the week"),
        })?;

    let start = (0..24)
        .filter_map(|hour| sunday.and_hms_opt(hour, 0, 0))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("resolving local midnight on {sunday} in {tz}"),
        })?;

    OffsetDateTime::from_unix_timestamp(start.timestamp()).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("converting the week start: {e}"),
        }
    })
}
