// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field rules and their builders.

use crate::schema::ValidationSchema;
use serde_json::Value;

/// A named format check applied to a string after trimming.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    /// Message reported when the check fails.
    pub message: &'static str,
    pub check: fn(&str) -> bool,
}

impl Pattern {
    #[must_use]
    pub const fn new(message: &'static str, check: fn(&str) -> bool) -> Self {
        Self { message, check }
    }
}

/// Rules for a plain string field.
///
/// Lengths are counted in characters, after trimming and case folding.
#[derive(Debug, Clone, Default)]
pub struct StringRule {
    pub trim: bool,
    pub lowercase: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub pattern: Option<Pattern>,
}

impl StringRule {
    /// A trimmed string with no other constraints.
    #[must_use]
    pub const fn trimmed() -> Self {
        Self {
            trim: true,
            lowercase: false,
            min: None,
            max: None,
            pattern: None,
        }
    }

    /// A string kept exactly as supplied, e.g. a password.
    #[must_use]
    pub const fn raw() -> Self {
        Self {
            trim: false,
            lowercase: false,
            min: None,
            max: None,
            pattern: None,
        }
    }

    #[must_use]
    pub const fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub const fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub const fn between(self, min: usize, max: usize) -> Self {
        self.min(min).max(max)
    }

    #[must_use]
    pub const fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    #[must_use]
    pub const fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }
}

/// The type of value a field accepts, with its type-specific bounds.
#[derive(Debug, Clone)]
pub enum FieldKind {
    String(StringRule),
    /// A whole number. Numeric strings are coerced.
    Integer { min: Option<i64>, max: Option<i64> },
    /// Any finite number. Numeric strings are coerced.
    Number {
        min: Option<f64>,
        max: Option<f64>,
        /// Rejects zero and negative values.
        positive: bool,
    },
    /// `true`/`false`, or the strings `"true"`/`"false"`.
    Boolean,
    Enum(&'static [&'static str]),
    /// A syntactically valid address, trimmed and lower-cased.
    Email,
    Uuid,
    Url {
        /// Accepts `""` as a valid (empty) value.
        allow_empty: bool,
    },
    /// An RFC 3339 timestamp.
    DateTime,
    Array {
        item: Box<FieldKind>,
        min: Option<usize>,
        max: Option<usize>,
    },
    Object(ValidationSchema),
}

impl FieldKind {
    #[must_use]
    pub const fn string(rule: StringRule) -> Self {
        Self::String(rule)
    }

    #[must_use]
    pub const fn integer(min: i64, max: i64) -> Self {
        Self::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    #[must_use]
    pub const fn positive_number() -> Self {
        Self::Number {
            min: None,
            max: None,
            positive: true,
        }
    }

    /// An array of `item` holding between `min` and `max` elements.
    #[must_use]
    pub fn array(item: Self, min: usize, max: usize) -> Self {
        Self::Array {
            item: Box::new(item),
            min: Some(min),
            max: Some(max),
        }
    }

    /// Name of the expected type, as used in `invalid_type` messages.
    #[must_use]
    pub const fn expected(&self) -> &'static str {
        match self {
            Self::String(_)
            | Self::Enum(_)
            | Self::Email
            | Self::Uuid
            | Self::Url { .. }
            | Self::DateTime => "string",
            Self::Integer { .. } => "integer",
            Self::Number { .. } => "number",
            Self::Boolean => "boolean",
            Self::Array { .. } => "array",
            Self::Object(_) => "object",
        }
    }
}

/// Whether a field must be supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    Required,
    Optional,
    /// Optional; the value is substituted when the field is absent.
    Default(Value),
}

/// One declared field of a schema.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    /// Alternate input key, emitted under `name`.
    pub alias: Option<&'static str>,
    pub kind: FieldKind,
    pub presence: Presence,
    /// Accepts an explicit `null`.
    pub nullable: bool,
}

impl FieldRule {
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            alias: None,
            kind,
            presence: Presence::Required,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            alias: None,
            kind,
            presence: Presence::Optional,
            nullable: false,
        }
    }

    #[must_use]
    pub fn with_default(name: &'static str, kind: FieldKind, default: impl Into<Value>) -> Self {
        Self {
            name,
            alias: None,
            kind,
            presence: Presence::Default(default.into()),
            nullable: false,
        }
    }

    #[must_use]
    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}
