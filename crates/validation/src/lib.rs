// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Declarative request-body validation.
//!
//! A [`ValidationSchema`] is a list of [`FieldRule`]s. Validating a JSON value
//! against a schema either produces the sanitized value (trimmed, coerced,
//! defaults filled in, undeclared keys dropped in strict mode) or the full,
//! ordered list of field-level issues. Schemas hold no state, so validation
//! is a pure function of the schema and the input.
//!
//! The schemas used by the HTTP layer live in the [`SchemaId`] registry.

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
mod patterns;
mod registry;
mod rules;
mod schema;

#[cfg(test)]
mod tests;

pub use error::{IssueCode, ValidationErrors, ValidationIssue};
pub use patterns::{
    is_email, is_person_name, is_salary_range, is_strong_password, is_time_of_day, is_url,
};
pub use registry::SchemaId;
pub use rules::{FieldKind, FieldRule, Pattern, Presence, StringRule};
pub use schema::{SchemaMode, ValidationSchema};
