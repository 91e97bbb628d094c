//! Typed field schemas evaluated by a generic validation routine.
//!
//! Each entity declares an ordered list of [`FieldRule`]s; [`EntitySchema::check`]
//! evaluates them in declaration order and fails fast on the first violation
//! with a message naming the exact field and constraint.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::Value;

use crate::{AppError, Result};

/// Datetime layout accepted when the offset is omitted.
const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Expected type of a single entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON number holding an integer.
    Int,
    /// JSON string or null.
    NullableText,
    /// JSON string parseable as an ISO-8601 datetime.
    DateTime,
}

/// A single named field constraint.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Wire name of the field.
    pub name: &'static str,
    /// Expected type.
    pub kind: FieldKind,
}

/// Ordered field constraints for one entity type.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Entity name used in diagnostics.
    pub entity: &'static str,
    /// Field rules, checked in declaration order.
    pub fields: &'static [FieldRule],
}

impl EntitySchema {
    /// Check every field rule against `value` in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for the first missing or mistyped
    /// field; remaining rules are not evaluated.
    pub fn check(&self, value: &Value) -> Result<()> {
        for rule in self.fields {
            self.check_field(rule, value)?;
        }
        Ok(())
    }

    fn check_field(&self, rule: &FieldRule, value: &Value) -> Result<()> {
        let Some(field) = value.get(rule.name) else {
            return Err(AppError::Validation(format!(
                "{} is missing required field `{}`",
                self.entity, rule.name
            )));
        };

        match rule.kind {
            FieldKind::Int => {
                if !field.is_i64() && !field.is_u64() {
                    return Err(self.type_error(rule, "an integer", field));
                }
            }
            FieldKind::NullableText => {
                if !field.is_string() && !field.is_null() {
                    return Err(self.type_error(rule, "a string or null", field));
                }
            }
            FieldKind::DateTime => {
                let Some(raw) = field.as_str() else {
                    return Err(self.type_error(rule, "a string", field));
                };
                parse_iso_datetime(raw).map_err(|_| {
                    AppError::Validation(format!(
                        "{} field `{}` is not a valid ISO-8601 datetime: {raw}",
                        self.entity, rule.name
                    ))
                })?;
            }
        }

        Ok(())
    }

    fn type_error(&self, rule: &FieldRule, expected: &str, actual: &Value) -> AppError {
        AppError::Validation(format!(
            "{} field `{}` must be {expected}, got {}",
            self.entity,
            rule.name,
            json_type_name(actual)
        ))
    }
}

/// Parse an ISO-8601 datetime string.
///
/// A trailing `Z` designator is normalized to `+00:00` before parsing, and
/// a naive datetime without any offset is accepted as UTC.
///
/// # Errors
///
/// Returns `AppError::Validation` if the string parses under neither layout.
pub fn parse_iso_datetime(raw: &str) -> Result<DateTime<FixedOffset>> {
    let normalized = raw.replace('Z', "+00:00");
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(parsed);
    }
    NaiveDateTime::parse_from_str(&normalized, NAIVE_DATETIME_FORMAT)
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|err| AppError::Validation(format!("invalid ISO datetime `{raw}`: {err}")))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
