// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Format checks for structured strings.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// `$12,000 - $34,000`, `80000-95000`, `$90,000 - 120,000`.
pub static SALARY_RANGE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\$?(\d{1,3}(,\d{3})+|\d+)\s*-\s*\$?(\d{1,3}(,\d{3})+|\d+)$").ok()
});

pub static TIME_OF_DAY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").ok());

pub static PERSON_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").ok());

pub static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Symbols accepted by the strong-password rule.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(value))
}

/// Returns true for a `low - high` salary range with optional `$` and
/// thousands separators.
#[must_use]
pub fn is_salary_range(value: &str) -> bool {
    matches(&SALARY_RANGE, value)
}

/// Returns true for a 24-hour `HH:MM` time.
#[must_use]
pub fn is_time_of_day(value: &str) -> bool {
    matches(&TIME_OF_DAY, value)
}

/// Returns true if the name holds only letters, spaces, hyphens and apostrophes.
#[must_use]
pub fn is_person_name(value: &str) -> bool {
    matches(&PERSON_NAME, value)
}

#[must_use]
pub fn is_email(value: &str) -> bool {
    matches(&EMAIL, value)
}

/// Returns true for an absolute `http` or `https` URL with a host.
#[must_use]
pub fn is_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https")
            && url.host_str().is_some_and(|host| !host.is_empty())
    })
}

/// Returns true if the password has an uppercase letter, a lowercase letter,
/// a digit and one of [`PASSWORD_SYMBOLS`].
#[must_use]
pub fn is_strong_password(value: &str) -> bool {
    let mut has_upper: bool = false;
    let mut has_lower: bool = false;
    let mut has_digit: bool = false;
    let mut has_symbol: bool = false;

    for ch in value.chars() {
        if ch.is_ascii_uppercase() {
            has_upper = true;
        } else if ch.is_ascii_lowercase() {
            has_lower = true;
        } else if ch.is_ascii_digit() {
            has_digit = true;
        } else if PASSWORD_SYMBOLS.contains(ch) {
            has_symbol = true;
        }
    }

    has_upper && has_lower && has_digit && has_symbol
}
