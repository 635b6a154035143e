// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use super::{NOW, create_test_application};
use crate::{Application, ApplicationFilter, ApplicationPage};

fn create_applications() -> Vec<Application> {
    let mut first = create_test_application("a1", "applied", NOW - Duration::days(3));
    first.company_name = String::from("Globex");
    first.job_title = String::from("Data Analyst");

    let mut second = create_test_application("a2", "interview_scheduled", NOW - Duration::days(2));
    second.company_name = String::from("Initech");
    second.job_title = String::from("Backend Engineer");

    let mut third = create_test_application("a3", "applied", NOW - Duration::days(1));
    third.company_name = String::from("Acme Corp");
    third.job_title = String::from("Platform Engineer");

    vec![first, second, third]
}

#[test]
fn test_default_filter_returns_newest_first() {
    let page: ApplicationPage = ApplicationFilter::default().apply(create_applications());

    assert_eq!(page.total, 3);
    let ids: Vec<&str> = page.applications.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a3", "a2", "a1"]);
}

#[test]
fn test_status_filter() {
    let filter = ApplicationFilter::new(Some(String::from("applied")), None, None, None);
    let page: ApplicationPage = filter.apply(create_applications());

    assert_eq!(page.total, 2);
    assert!(page.applications.iter().all(|a| a.status == "applied"));
}

#[test]
fn test_search_is_case_insensitive_over_company_and_title() {
    let filter = ApplicationFilter::new(None, Some(String::from("ENGINEER")), None, None);
    let page: ApplicationPage = filter.apply(create_applications());
    assert_eq!(page.total, 2);

    let filter = ApplicationFilter::new(None, Some(String::from("globex")), None, None);
    let page: ApplicationPage = filter.apply(create_applications());
    assert_eq!(page.total, 1);
    assert_eq!(page.applications[0].id, "a1");
}

#[test]
fn test_pagination_keeps_total_of_all_matches() {
    let filter = ApplicationFilter::new(None, None, Some(1), Some(1));
    let page: ApplicationPage = filter.apply(create_applications());

    assert_eq!(page.total, 3);
    assert_eq!(page.applications.len(), 1);
    assert_eq!(page.applications[0].id, "a2");
}

#[test]
fn test_limit_is_bounded() {
    let filter = ApplicationFilter::new(None, None, Some(10_000), None);
    assert_eq!(filter.limit, ApplicationFilter::MAX_LIMIT);

    let filter = ApplicationFilter::new(None, None, Some(0), None);
    assert_eq!(filter.limit, 1);
}

#[test]
fn test_blank_filters_are_ignored() {
    let filter = ApplicationFilter::new(Some(String::from("  ")), Some(String::new()), None, None);
    assert_eq!(filter.status, None);
    assert_eq!(filter.search, None);
}
