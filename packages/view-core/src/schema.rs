//! View schema data model.
//!
//! A [`ViewSchema`] describes a dynamic form: an ordered map of named
//! [`FieldDefinition`]s. Schemas are plain data — they are produced by a
//! designer UI, persisted as JSON documents, and consumed by the
//! [renderer](crate::render). Nothing in this module performs I/O.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted description of a dynamic form.
///
/// `fields` maps field name to definition. Insertion order is the canonical
/// display order and is preserved across a JSON round trip (the map
/// serializes as a JSON object in insertion order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSchema {
    /// Unique identifier, assigned by the caller.
    pub id: String,
    /// Field definitions keyed by field name, in display order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldDefinition>,
}

impl ViewSchema {
    /// Creates an empty schema with the given ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// Appends a field, returning the schema for chaining.
    ///
    /// A repeated name replaces the earlier definition in place, keeping the
    /// original position (standard `IndexMap` insert semantics).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.insert(name.into(), definition);
        self
    }
}

/// Discriminant for the widget a field renders as.
///
/// Closed set matching the strings used in persisted documents. Unrecognized
/// strings in stored documents decode to [`FieldKind::Custom`] rather than
/// failing, so a schema written by a newer designer still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input. Documents may also spell this `"string"`.
    #[serde(alias = "string")]
    Text,
    /// Numeric input.
    Number,
    /// Single boolean toggle.
    Boolean,
    /// Date picker.
    Date,
    /// Dropdown selection over [`FieldDefinition::options`].
    Select,
    /// Multi-select checkbox group over [`FieldDefinition::options`].
    Checkbox,
    /// Single-select radio group over [`FieldDefinition::options`].
    Radio,
    /// Multi-line text input.
    Textarea,
    /// Host-defined widget; the renderer falls back to a text input.
    #[serde(other)]
    Custom,
}

impl FieldKind {
    /// The lowercase string this kind serializes as.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Textarea => "textarea",
            Self::Custom => "custom",
        }
    }

    /// Whether this kind renders from an option list.
    #[must_use]
    pub fn takes_options(self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Radio)
    }
}

/// One field's type, display strings, options, and validation rules.
///
/// Treated as immutable input by the renderer and storage providers; only
/// the designer UI mutates definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Widget discriminant.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Display label, required.
    pub label: String,
    /// Whether a value must be supplied on submit.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Placeholder text shown in empty inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Longer description rendered near the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inline help text.
    #[serde(default, rename = "helpText", skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Choices for `select`/`checkbox`/`radio` kinds; ignored otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Value-level validation rules applied on submit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl FieldDefinition {
    /// Creates a definition with the given kind and label; everything else
    /// takes its default.
    #[must_use]
    pub fn new(kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            required: false,
            placeholder: None,
            description: None,
            help_text: None,
            options: Vec::new(),
            validation: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Replaces the option list.
    #[must_use]
    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }
}

/// One `{value, label}` choice in an option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Value submitted when the option is chosen.
    pub value: String,
    /// Display label for the option.
    pub label: String,
}

impl FieldOption {
    /// Creates an option from a value/label pair.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Value-level validation rules carried by a field definition.
///
/// All rules are optional. `custom` is a host-supplied predicate and is never
/// serialized; a persisted document round-trips without it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Overrides [`FieldDefinition::required`] when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Minimum numeric value (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum numeric value (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Minimum string length in characters.
    #[serde(default, rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length in characters.
    #[serde(default, rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression the string value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Host-supplied predicate; not persisted.
    #[serde(skip)]
    pub custom: Option<CustomRule>,
}

impl PartialEq for ValidationRules {
    /// Compares the serializable rules only; `custom` predicates are opaque.
    fn eq(&self, other: &Self) -> bool {
        self.required == other.required
            && self.min == other.min
            && self.max == other.max
            && self.min_length == other.min_length
            && self.max_length == other.max_length
            && self.pattern == other.pattern
    }
}

/// Host-supplied validation predicate.
///
/// Returns `Ok(())` on pass or `Err(message)` on fail. Wrapped in an `Arc`
/// so rules stay cheaply cloneable alongside the rest of the schema.
#[derive(Clone)]
pub struct CustomRule(Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>);

impl CustomRule {
    /// Wraps a predicate function.
    pub fn new(predicate: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Runs the predicate against a submitted value.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRule")
    }
}
