// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The schema engine.

use crate::error::{IssueCode, ValidationErrors, ValidationIssue};
use crate::patterns;
use crate::rules::{FieldKind, FieldRule, Presence, StringRule};
use serde_json::{Map, Number, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// How undeclared keys are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaMode {
    /// Undeclared keys are silently dropped.
    #[default]
    Strict,
    /// Undeclared keys are copied to the output untouched.
    Passthrough,
}

/// A named set of field rules for one request shape.
#[derive(Debug, Clone)]
pub struct ValidationSchema {
    name: &'static str,
    fields: Vec<FieldRule>,
    mode: SchemaMode,
}

impl ValidationSchema {
    /// Creates a strict schema.
    #[must_use]
    pub const fn strict(name: &'static str, fields: Vec<FieldRule>) -> Self {
        Self {
            name,
            fields,
            mode: SchemaMode::Strict,
        }
    }

    /// Creates a schema that keeps undeclared keys.
    #[must_use]
    pub const fn passthrough(name: &'static str, fields: Vec<FieldRule>) -> Self {
        Self {
            name,
            fields,
            mode: SchemaMode::Passthrough,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn mode(&self) -> SchemaMode {
        self.mode
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Validates `input` and returns the sanitized value.
    ///
    /// Every field is checked, so the error lists every violation in
    /// declaration order rather than stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns the non-empty list of issues if any rule is violated.
    pub fn validate(&self, input: &Value) -> Result<Value, ValidationErrors> {
        let mut issues: Vec<ValidationIssue> = Vec::new();
        let output: Option<Value> = self.validate_object(input, "", &mut issues);

        match (ValidationErrors::from_issues(issues), output) {
            (Some(errors), _) => Err(errors),
            (None, Some(value)) => Ok(value),
            // An object that fails without recording an issue is still a failure.
            (None, None) => Err(ValidationErrors::invalid_json(
                "Request body could not be validated",
            )),
        }
    }

    fn validate_object(
        &self,
        input: &Value,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Value> {
        let Value::Object(object) = input else {
            issues.push(type_issue(
                if path.is_empty() { "body" } else { path },
                "object",
                input,
            ));
            return None;
        };

        let mut output: Map<String, Value> = Map::new();
        let issue_count: usize = issues.len();

        for rule in &self.fields {
            let field_path: String = join(path, rule.name);
            let supplied: Option<&Value> = object
                .get(rule.name)
                .or_else(|| rule.alias.and_then(|alias| object.get(alias)));

            match supplied {
                None => match &rule.presence {
                    Presence::Required => issues.push(ValidationIssue::new(
                        field_path,
                        "Required",
                        IssueCode::InvalidType,
                    )),
                    Presence::Optional => {}
                    Presence::Default(default) => {
                        output.insert(rule.name.to_string(), default.clone());
                    }
                },
                Some(Value::Null) if rule.nullable => {
                    output.insert(rule.name.to_string(), Value::Null);
                }
                Some(value) => {
                    if let Some(clean) = check_kind(&rule.kind, value, &field_path, issues) {
                        output.insert(rule.name.to_string(), clean);
                    }
                }
            }
        }

        if self.mode == SchemaMode::Passthrough {
            for (key, value) in object {
                let declared: bool = self
                    .fields
                    .iter()
                    .any(|rule| rule.name == key || rule.alias == Some(key.as_str()));
                if !declared {
                    output.insert(key.clone(), value.clone());
                }
            }
        }

        (issues.len() == issue_count).then_some(Value::Object(output))
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_issue(path: &str, expected: &str, received: &Value) -> ValidationIssue {
    ValidationIssue::new(
        path,
        format!("Expected {expected}, received {}", json_type(received)),
        IssueCode::InvalidType,
    )
}

/// Checks one value against its kind and returns the sanitized value.
///
/// Issues are appended to `issues`; `None` means the value was rejected.
fn check_kind(
    kind: &FieldKind,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let expected: &'static str = kind.expected();

    match kind {
        FieldKind::String(rule) => check_string(rule, expected, value, path, issues),
        FieldKind::Integer { min, max } => {
            check_integer(*min, *max, expected, value, path, issues)
        }
        FieldKind::Number { min, max, positive } => {
            check_number(*min, *max, *positive, expected, value, path, issues)
        }
        FieldKind::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::String(s) if s.trim() == "true" => Some(Value::Bool(true)),
            Value::String(s) if s.trim() == "false" => Some(Value::Bool(false)),
            _ => {
                issues.push(type_issue(path, expected, value));
                None
            }
        },
        FieldKind::Enum(allowed) => {
            let Value::String(s) = value else {
                issues.push(type_issue(path, expected, value));
                return None;
            };
            if allowed.contains(&s.as_str()) {
                return Some(value.clone());
            }
            let expected: Vec<String> = allowed.iter().map(|v| format!("'{v}'")).collect();
            issues.push(ValidationIssue::new(
                path,
                format!(
                    "Invalid enum value. Expected {}, received '{s}'",
                    expected.join(" | ")
                ),
                IssueCode::InvalidEnumValue,
            ));
            None
        }
        FieldKind::Email => {
            let s: String = expect_string(value, expected, path, issues)?.trim().to_lowercase();
            if patterns::is_email(&s) {
                Some(Value::String(s))
            } else {
                issues.push(ValidationIssue::new(
                    path,
                    "Invalid email",
                    IssueCode::InvalidString,
                ));
                None
            }
        }
        FieldKind::Uuid => {
            let s: &str = expect_string(value, expected, path, issues)?.trim();
            if let Ok(id) = uuid::Uuid::try_parse(s)
                && s.len() == uuid::fmt::Hyphenated::LENGTH
            {
                Some(Value::String(id.hyphenated().to_string()))
            } else {
                issues.push(ValidationIssue::new(
                    path,
                    "Invalid uuid",
                    IssueCode::InvalidString,
                ));
                None
            }
        }
        FieldKind::Url { allow_empty } => {
            let s: &str = expect_string(value, expected, path, issues)?.trim();
            if (s.is_empty() && *allow_empty) || patterns::is_url(s) {
                Some(Value::String(s.to_string()))
            } else {
                issues.push(ValidationIssue::new(
                    path,
                    "Invalid url",
                    IssueCode::InvalidString,
                ));
                None
            }
        }
        FieldKind::DateTime => {
            let s: &str = expect_string(value, expected, path, issues)?.trim();
            if OffsetDateTime::parse(s, &Rfc3339).is_ok() {
                Some(Value::String(s.to_string()))
            } else {
                issues.push(ValidationIssue::new(
                    path,
                    "Invalid datetime",
                    IssueCode::InvalidString,
                ));
                None
            }
        }
        FieldKind::Array { item, min, max } => {
            check_array(item, *min, *max, expected, value, path, issues)
        }
        FieldKind::Object(schema) => schema.validate_object(value, path, issues),
    }
}

fn expect_string<'a>(
    value: &'a Value,
    expected: &str,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a str> {
    if let Value::String(s) = value {
        Some(s.as_str())
    } else {
        issues.push(type_issue(path, expected, value));
        None
    }
}

fn check_string(
    rule: &StringRule,
    expected: &str,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let raw: &str = expect_string(value, expected, path, issues)?;
    let mut s: String = if rule.trim {
        raw.trim().to_string()
    } else {
        raw.to_string()
    };
    if rule.lowercase {
        s = s.to_lowercase();
    }

    let length: usize = s.chars().count();
    let before: usize = issues.len();

    if let Some(min) = rule.min
        && length < min
    {
        issues.push(ValidationIssue::new(
            path,
            format!("String must contain at least {min} character(s)"),
            IssueCode::TooSmall,
        ));
    }
    if let Some(max) = rule.max
        && length > max
    {
        issues.push(ValidationIssue::new(
            path,
            format!("String must contain at most {max} character(s)"),
            IssueCode::TooBig,
        ));
    }
    if let Some(pattern) = rule.pattern
        && !(pattern.check)(&s)
    {
        issues.push(ValidationIssue::new(
            path,
            pattern.message,
            IssueCode::InvalidString,
        ));
    }

    (issues.len() == before).then_some(Value::String(s))
}

fn check_integer(
    min: Option<i64>,
    max: Option<i64>,
    expected: &str,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let parsed: Option<i64> = match value {
        Value::Number(n) => n.as_i64().or_else(|| whole_float(n.as_f64()?)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let Some(n) = parsed else {
        issues.push(type_issue(path, expected, value));
        return None;
    };

    if let Some(min) = min
        && n < min
    {
        issues.push(ValidationIssue::new(
            path,
            format!("Number must be greater than or equal to {min}"),
            IssueCode::TooSmall,
        ));
        return None;
    }
    if let Some(max) = max
        && n > max
    {
        issues.push(ValidationIssue::new(
            path,
            format!("Number must be less than or equal to {max}"),
            IssueCode::TooBig,
        ));
        return None;
    }

    Some(Value::Number(Number::from(n)))
}

/// Converts a float with no fractional part into an integer.
#[allow(clippy::cast_possible_truncation)]
fn whole_float(f: f64) -> Option<i64> {
    // Bounds keep the cast exact.
    let in_range: bool = f >= -9_007_199_254_740_992.0 && f <= 9_007_199_254_740_992.0;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn check_number(
    min: Option<f64>,
    max: Option<f64>,
    positive: bool,
    expected: &str,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let number: Option<Number> = match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64),
        _ => None,
    };
    let Some(number) = number else {
        issues.push(type_issue(path, expected, value));
        return None;
    };
    let Some(n) = number.as_f64() else {
        issues.push(type_issue(path, expected, value));
        return None;
    };

    let before: usize = issues.len();
    if positive && n <= 0.0 {
        issues.push(ValidationIssue::new(
            path,
            "Number must be greater than 0",
            IssueCode::TooSmall,
        ));
    }
    if let Some(min) = min
        && n < min
    {
        issues.push(ValidationIssue::new(
            path,
            format!("Number must be greater than or equal to {min}"),
            IssueCode::TooSmall,
        ));
    }
    if let Some(max) = max
        && n > max
    {
        issues.push(ValidationIssue::new(
            path,
            format!("Number must be less than or equal to {max}"),
            IssueCode::TooBig,
        ));
    }

    (issues.len() == before).then_some(Value::Number(number))
}

fn check_array(
    item: &FieldKind,
    min: Option<usize>,
    max: Option<usize>,
    expected: &str,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let Value::Array(elements) = value else {
        issues.push(type_issue(path, expected, value));
        return None;
    };

    let before: usize = issues.len();
    if let Some(min) = min
        && elements.len() < min
    {
        issues.push(ValidationIssue::new(
            path,
            format!("Array must contain at least {min} element(s)"),
            IssueCode::TooSmall,
        ));
    }
    if let Some(max) = max
        && elements.len() > max
    {
        issues.push(ValidationIssue::new(
            path,
            format!("Array must contain at most {max} element(s)"),
            IssueCode::TooBig,
        ));
    }

    let clean: Vec<Value> = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            check_kind(item, element, &join(path, &index.to_string()), issues)
        })
        .collect();

    (issues.len() == before).then_some(Value::Array(clean))
}
