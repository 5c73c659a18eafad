//! Loosely typed form input and the errors reported against it.
//!
//! A `SessionForm` is whatever an HTML form (or a JSON file) handed us:
//! strings, numbers, booleans, or nothing. The coercion helpers here turn
//! individual values into typed ones; the validator decides what is allowed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Keys of the session form, in the order fields appear on the form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    Name,
    Description,
    Duration,
    Price,
    Deposit,
    DepositRequired,
    LocationName,
    Address,
    LocationNotes,
    StartTime,
    EndTime,
    NumberOfSpots,
    GapBetweenSlots,
    SameStartTime,
}

/// One violated constraint, attributed to the field the user should fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Problems with the date picker, reported apart from field validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "dates", rename_all = "camelCase")]
pub enum SelectionError {
    #[error("Please select at least one date.")]
    Missing,
    #[error("Invalid date(s) {0:?}; expected YYYY-MM-DD.")]
    InvalidDates(Vec<String>),
}

/// Everything wrong with a submission, gathered in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionErrors {
    /// Ordered: per-field violations first, cross-field ones after.
    pub field_errors: Vec<FieldError>,
    pub selection: Option<SelectionError>,
}

impl SubmissionErrors {
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.selection.is_none()
    }

    /// Messages attached to `field`, in report order.
    pub fn messages_for(&self, field: FormField) -> Vec<&str> {
        self.field_errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn has_field(&self, field: FormField) -> bool {
        self.field_errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for SubmissionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.field_errors.iter().map(ToString::to_string).collect();
        if let Some(selection) = &self.selection {
            parts.push(format!("selectedDates: {selection}"));
        }
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for SubmissionErrors {}

/// Raw form values keyed by [`FormField`] names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionForm {
    values: Map<String, Value>,
}

/// A form submission: the text fields plus the date picker's selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSubmission {
    pub form: SessionForm,
    #[serde(default)]
    pub selected_dates: Vec<String>,
}

impl SessionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON object. Any other JSON value is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self { values }),
            _ => None,
        }
    }

    /// Sets a field, replacing any earlier value.
    pub fn with(mut self, field: FormField, value: impl Into<Value>) -> Self {
        self.values.insert(field.as_ref().to_string(), value.into());
        self
    }

    pub fn get(&self, field: FormField) -> Option<&Value> {
        self.values.get(field.as_ref())
    }

    /// The field as text. Absent, null, and blank values are `None`.
    pub fn text(&self, field: FormField) -> Option<String> {
        let text = match self.get(field)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.trim().is_empty()).then_some(text)
    }

    /// The field as a JSON string, taken verbatim. Other JSON types are `Invalid`.
    pub fn string(&self, field: FormField) -> Coerced<String> {
        match self.get(field) {
            None | Some(Value::Null) => Coerced::Missing,
            Some(Value::String(s)) => Coerced::Value(s.clone()),
            Some(_) => Coerced::Invalid,
        }
    }

    /// The field coerced to a number.
    pub fn number(&self, field: FormField) -> Coerced<f64> {
        match self.get(field) {
            None | Some(Value::Null) => Coerced::Missing,
            Some(Value::Number(n)) => n.as_f64().map_or(Coerced::Invalid, Coerced::Value),
            Some(Value::String(s)) if s.trim().is_empty() => Coerced::Missing,
            Some(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Coerced::Value(n),
                _ => Coerced::Invalid,
            },
            Some(_) => Coerced::Invalid,
        }
    }

    /// The field coerced to a boolean, accepting checkbox-style strings.
    pub fn boolean(&self, field: FormField) -> Coerced<bool> {
        match self.get(field) {
            None | Some(Value::Null) => Coerced::Missing,
            Some(Value::Bool(b)) => Coerced::Value(*b),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "" => Coerced::Missing,
                "true" | "on" | "yes" | "1" => Coerced::Value(true),
                "false" | "off" | "no" | "0" => Coerced::Value(false),
                _ => Coerced::Invalid,
            },
            Some(Value::Number(n)) => match n.as_u64() {
                Some(0) => Coerced::Value(false),
                Some(1) => Coerced::Value(true),
                _ => Coerced::Invalid,
            },
            Some(_) => Coerced::Invalid,
        }
    }
}

/// Result of coercing one raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    /// Absent, null, or blank.
    Missing,
    /// Present but not convertible.
    Invalid,
    Value(T),
}

impl<T> Coerced<T> {
    /// Substitutes `default` for a missing value.
    pub fn or_default_value(self, default: T) -> Coerced<T> {
        match self {
            Coerced::Missing => Coerced::Value(default),
            other => other,
        }
    }
}
