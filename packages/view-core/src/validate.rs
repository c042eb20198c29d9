//! Schema-shape and value-rule validation.
//!
//! [`validate_schema`] checks a candidate [`ViewSchema`] before it is
//! persisted or rendered; [`validate_value`] applies one field's
//! [`ValidationRules`] to a submitted value. Both are pure functions
//! returning structured errors — never panics, never generic failures —
//! so UI layers can render inline messages per field.
//!
//! Storage providers do not call either function: they persist whatever
//! well-formed JSON they are given. Running validation first is the
//! caller's responsibility.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;

use crate::schema::{FieldDefinition, ViewSchema};

/// Outcome of [`validate_schema`]: error messages keyed by field name.
///
/// An empty report means the schema passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Error messages per offending field, in field-name order.
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    /// Whether the schema passed every rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }
}

/// Validates a schema's shape.
///
/// Rules:
/// - field names are non-empty and do not start with a digit;
/// - every field has a non-empty `label`;
/// - `select`/`checkbox`/`radio` fields have a non-empty option list;
/// - a `pattern` rule, when present, compiles as a regular expression.
#[must_use]
pub fn validate_schema(schema: &ViewSchema) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (name, field) in &schema.fields {
        if name.is_empty() {
            report.push(name, "field name must not be empty");
        } else if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            report.push(name, "field name must not start with a digit");
        }

        if field.label.trim().is_empty() {
            report.push(name, "label must not be empty");
        }

        if field.kind.takes_options() && field.options.is_empty() {
            report.push(
                name,
                format!("{} field requires a non-empty options list", field.kind.as_str()),
            );
        }

        if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
            if let Err(err) = Regex::new(pattern) {
                report.push(name, format!("invalid pattern: {err}"));
            }
        }
    }

    report
}

/// Applies one field's rules to a submitted value.
///
/// Returns every rule violation as a human-readable message; an empty vec
/// means the value passed. `Null` stands for "no value entered": it only
/// violates the required rule, the remaining rules are skipped.
#[must_use]
pub fn validate_value(field: &FieldDefinition, value: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let required = field
        .validation
        .as_ref()
        .and_then(|v| v.required)
        .unwrap_or(field.required);

    if value.is_null() {
        if required {
            errors.push("value is required".to_string());
        }
        return errors;
    }

    let Some(rules) = field.validation.as_ref() else {
        return errors;
    };

    if let Some(number) = value.as_f64() {
        if let Some(min) = rules.min {
            if number < min {
                errors.push(format!("value must be at least {min}"));
            }
        }
        if let Some(max) = rules.max {
            if number > max {
                errors.push(format!("value must be at most {max}"));
            }
        }
    }

    if let Some(text) = value.as_str() {
        let length = text.chars().count();
        if let Some(min_length) = rules.min_length {
            if length < min_length {
                errors.push(format!("value must be at least {min_length} characters"));
            }
        }
        if let Some(max_length) = rules.max_length {
            if length > max_length {
                errors.push(format!("value must be at most {max_length} characters"));
            }
        }
        if let Some(pattern) = rules.pattern.as_deref() {
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(text) {
                        errors.push(format!("value does not match pattern {pattern}"));
                    }
                }
                Err(err) => errors.push(format!("invalid pattern: {err}")),
            }
        }
    }

    if let Some(custom) = rules.custom.as_ref() {
        if let Err(message) = custom.check(value) {
            errors.push(message);
        }
    }

    errors
}
