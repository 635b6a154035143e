// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filtering and pagination for a client's application list.

use crate::types::Application;

/// Filter and page parameters for listing applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFilter {
    /// Exact status to match, if any.
    pub status: Option<String>,
    /// Case-insensitive substring matched against company name and job title.
    pub search: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

/// One page of filtered applications.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationPage {
    pub applications: Vec<Application>,
    /// Number of matching applications before pagination.
    pub total: usize,
}

impl Default for ApplicationFilter {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ApplicationFilter {
    pub const DEFAULT_LIMIT: usize = 50;
    pub const MAX_LIMIT: usize = 100;

    /// Builds a filter, applying the default and maximum page size.
    ///
    /// Blank `status` and `search` values are treated as absent.
    #[must_use]
    pub fn new(
        status: Option<String>,
        search: Option<String>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Self {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            status: non_blank(status),
            search: non_blank(search).map(|s| s.to_lowercase()),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    /// Returns true if the application passes the status and search filters.
    #[must_use]
    pub fn matches(&self, application: &Application) -> bool {
        if let Some(status) = &self.status
            && application.status != *status
        {
            return false;
        }

        self.search.as_ref().is_none_or(|needle| {
            application.company_name.to_lowercase().contains(needle)
                || application.job_title.to_lowercase().contains(needle)
        })
    }

    /// Filters, orders newest first, and paginates.
    #[must_use]
    pub fn apply(&self, mut applications: Vec<Application>) -> ApplicationPage {
        applications.retain(|application| self.matches(application));
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total: usize = applications.len();
        let applications: Vec<Application> = applications
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect();

        ApplicationPage {
            applications,
            total,
        }
    }
}
