// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamps are stored as RFC 3339 UTC text.
//!
//! Stored values always carry six fractional digits so that text ordering
//! in SQL matches chronological ordering.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::error::PersistenceError;

const STORED_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

pub fn format(value: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(value.to_offset(UtcOffset::UTC).format(STORED_FORMAT)?)
}

pub fn format_opt(value: Option<OffsetDateTime>) -> Result<Option<String>, PersistenceError> {
    value.map(format).transpose()
}

pub fn parse(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::parse(value, &Rfc3339)?)
}

pub fn parse_opt(value: Option<&str>) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(parse).transpose()
}
