// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono_tz::Tz;
use time::macros::datetime;

use super::{NOW, WEEK_START, create_test_application};
use crate::{
    Application, ApplicationStatsReport, DomainError, StatusBreakdown, Tier,
    compute_application_stats, parse_timezone, week_start,
};

fn this_week(id: &str, status: &str) -> Application {
    create_test_application(id, status, datetime!(2026-10-19 10:00 UTC))
}

fn earlier(id: &str, status: &str) -> Application {
    create_test_application(id, status, datetime!(2026-09-02 10:00 UTC))
}

#[test]
fn test_stats_for_client_without_applications() {
    let report: ApplicationStatsReport = compute_application_stats(&[], Tier::Tier1, WEEK_START);

    assert_eq!(report, ApplicationStatsReport::empty(Tier::Tier1));
    assert_eq!(report.total_applications, 0);
    assert_eq!(report.response_rate, 0);
    assert_eq!(report.offer_rate, 0);
    assert_eq!(report.weekly_target, 17);
}

#[test]
fn test_stats_worked_example_tier_two() {
    let applications: Vec<Application> = vec![
        this_week("1", "applied"),
        this_week("2", "applied"),
        this_week("3", "interview_scheduled"),
        earlier("4", "applied"),
        earlier("5", "applied"),
        earlier("6", "applied"),
        earlier("7", "interview_completed"),
        earlier("8", "offer_received"),
        earlier("9", "rejected"),
    ];

    let report: ApplicationStatsReport =
        compute_application_stats(&applications, Tier::Tier2, WEEK_START);

    assert_eq!(report.tier, "Tier 2");
    assert_eq!(report.weekly_target, 30);
    assert_eq!(report.total_applications, 9);
    assert_eq!(report.applications_this_week, 3);
    assert_eq!(report.weekly_progress, 10);
    assert_eq!(
        report.status_breakdown,
        StatusBreakdown {
            applied: 5,
            interviewing: 2,
            offer: 1,
            rejected: 1,
            withdrawn: 0,
        }
    );
    assert_eq!(report.response_rate, 33);
    assert_eq!(report.offer_rate, 11);
}

#[test]
fn test_stats_buckets_interviews_scheduled_this_week() {
    let applications: Vec<Application> = vec![
        this_week("1", "interview_scheduled"),
        this_week("2", "interview_scheduled"),
        earlier("3", "applied"),
        earlier("4", "withdrawn"),
        earlier("5", "closed"),
    ];

    let report: ApplicationStatsReport =
        compute_application_stats(&applications, Tier::Tier1, WEEK_START);

    assert_eq!(report.status_breakdown.interviewing, 2);
    assert_eq!(report.status_breakdown.withdrawn, 1);
    assert_eq!(report.status_breakdown.applied, 2);
    assert_eq!(report.applications_this_week, 2);
    // round(2 / 17 * 100) = round(11.76)
    assert_eq!(report.weekly_progress, 12);
    assert_eq!(report.response_rate, 40);
}

#[test]
fn test_weekly_progress_is_clamped_to_one_hundred() {
    let applications: Vec<Application> = (0..20)
        .map(|i| this_week(&i.to_string(), "applied"))
        .collect();

    let report: ApplicationStatsReport =
        compute_application_stats(&applications, Tier::Tier1, WEEK_START);

    assert_eq!(report.applications_this_week, 20);
    assert_eq!(report.weekly_progress, 100);
}

#[test]
fn test_percentages_round_half_up() {
    let mut applications: Vec<Application> = vec![earlier("0", "offer_accepted")];
    applications.extend((1..8).map(|i| earlier(&i.to_string(), "applied")));

    let report: ApplicationStatsReport =
        compute_application_stats(&applications, Tier::Tier3, WEEK_START);

    // 1 / 8 = 12.5%
    assert_eq!(report.offer_rate, 13);
    assert_eq!(report.response_rate, 13);
}

#[test]
fn test_application_submitted_at_week_start_counts_this_week() {
    let applications: Vec<Application> = vec![
        create_test_application("1", "applied", WEEK_START),
        create_test_application("2", "applied", datetime!(2026-10-17 23:59:59 UTC)),
    ];

    let report: ApplicationStatsReport =
        compute_application_stats(&applications, Tier::Tier1, WEEK_START);

    assert_eq!(report.applications_this_week, 1);
}

#[test]
fn test_week_start_in_utc() {
    assert_eq!(week_start(NOW, Tz::UTC).unwrap(), WEEK_START);
    assert_eq!(week_start(WEEK_START, Tz::UTC).unwrap(), WEEK_START);
}

#[test]
fn test_week_start_uses_local_midnight() {
    // Tuesday 22:00 EDT
    let now = datetime!(2026-10-21 02:00 UTC);
    let start = week_start(now, Tz::America__New_York).unwrap();
    assert_eq!(start, datetime!(2026-10-18 04:00 UTC));
}

#[test]
fn test_week_start_saturday_evening_local_is_previous_week() {
    // Saturday 22:00 EDT, already Sunday in UTC
    let now = datetime!(2026-10-18 02:00 UTC);
    let start = week_start(now, Tz::America__New_York).unwrap();
    assert_eq!(start, datetime!(2026-10-11 04:00 UTC));
}

#[test]
fn test_parse_timezone() {
    assert_eq!(parse_timezone("UTC").unwrap(), Tz::UTC);
    assert_eq!(
        parse_timezone(" America/New_York ").unwrap(),
        Tz::America__New_York
    );
    assert_eq!(
        parse_timezone("Mars/Olympus"),
        Err(DomainError::InvalidTimezone(String::from("Mars/Olympus")))
    );
}
