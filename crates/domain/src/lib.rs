// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod filter;
mod notifications;
mod onboarding;
mod stats;
mod types;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use filter::{ApplicationFilter, ApplicationPage};
pub use notifications::{NotificationKind, NotificationMessage};
pub use onboarding::{OnboardingStatus, PackageInterest};
pub use stats::{
    ApplicationStatsReport, StatusBreakdown, compute_application_stats, parse_timezone,
    week_start,
};
pub use types::{
    Application, ApplicationStatus, ApplicationUpdate, InterviewType, NewApplication, StatusBucket,
    Tier,
};
