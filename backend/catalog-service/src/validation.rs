/// Request-body normalisation and per-field validation rules
///
/// Bodies arrive as a flat field map (JSON object or urlencoded form). Every rule
/// reads from that map and records a human readable message per failing field, so a
/// single response lists all problems at once.
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;
use validator::ValidateLength;

use crate::models::MAX_NAME_LENGTH;

/// Field name → list of messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Normalised request body.
///
/// Top-level strings are trimmed and empty strings become `null`, so `""` and
/// `"   "` fail `required` the same way a missing field does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Map<String, Value>);

impl FieldMap {
    pub fn new(fields: Map<String, Value>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(key, value)| (key, normalize(value)))
            .collect();
        Self(fields)
    }

    pub fn from_form(fields: HashMap<String, String>) -> Self {
        Self::new(
            fields
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// PostgreSQL text cannot hold U+0000, so it is dropped along with surrounding whitespace
fn normalize(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let s = if s.contains('\0') { s.replace('\0', "") } else { s };
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else if trimmed.len() == s.len() {
                Value::String(s)
            } else {
                Value::String(trimmed.to_string())
            }
        }
        other => other,
    }
}

fn attribute(field: &str) -> String {
    field.replace('_', " ")
}

/// Whether a rule applies to every request or only when the field is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Field must be present and non-empty
    Required,
    /// Rules only run when the field is in the body; if present it must be non-empty
    Sometimes,
}

/// Collects validated values and failures over one `FieldMap`
pub struct Validator<'a> {
    fields: &'a FieldMap,
    errors: FieldErrors,
}

impl<'a> Validator<'a> {
    pub fn new(fields: &'a FieldMap) -> Self {
        Self {
            fields,
            errors: FieldErrors::default(),
        }
    }

    /// Returns the non-null value when the presence rule passes.
    /// `None` means either "skip" (absent under `Sometimes`) or "failed".
    fn present(&mut self, field: &str, presence: Presence) -> Option<&'a Value> {
        let fields = self.fields;
        match (fields.get(field), presence) {
            (None, Presence::Sometimes) => None,
            (Some(Value::Null), _) | (None, Presence::Required) => {
                self.errors.add(
                    field,
                    format!("The {} field is required.", attribute(field)),
                );
                None
            }
            (Some(value), _) => Some(value),
        }
    }

    /// String of at most `max` characters
    pub fn string(&mut self, field: &str, presence: Presence, max: usize) -> Option<String> {
        let value = self.present(field, presence)?;
        match value {
            Value::String(s) if !s.validate_length(None, Some(max as u64), None) => {
                self.errors.add(
                    field,
                    format!(
                        "The {} field must not be greater than {} characters.",
                        attribute(field),
                        max
                    ),
                );
                None
            }
            Value::String(s) => Some(s.clone()),
            _ => {
                self.errors
                    .add(field, format!("The {} field must be a string.", attribute(field)));
                None
            }
        }
    }

    /// Optional string that may be explicitly `null`.
    /// Absent → `None`, `null` → `Some(None)`, string → `Some(Some(_))`.
    pub fn nullable_string(&mut self, field: &str) -> Option<Option<String>> {
        match self.fields.get(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => {
                self.errors
                    .add(field, format!("The {} field must be a string.", attribute(field)));
                None
            }
        }
    }

    /// JSON number or numeric string
    pub fn numeric(&mut self, field: &str, presence: Presence) -> Option<f64> {
        let value = self.present(field, presence)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        };
        if parsed.is_none() {
            self.errors
                .add(field, format!("The {} field must be a number.", attribute(field)));
        }
        parsed
    }

    /// JSON integer, integral float, or integer string
    pub fn integer(&mut self, field: &str, presence: Presence) -> Option<i64> {
        let value = self.present(field, presence)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.parse::<i64>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors
                .add(field, format!("The {} field must be an integer.", attribute(field)));
        }
        parsed
    }

    /// Reference to another record by id. Only the shape is checked here;
    /// existence is confirmed by the caller with `reject_reference`.
    pub fn reference(&mut self, field: &str, presence: Presence) -> Option<Uuid> {
        let value = self.present(field, presence)?;
        let parsed = value.as_str().and_then(|s| Uuid::parse_str(s).ok());
        if parsed.is_none() {
            self.reject_reference(field);
        }
        parsed
    }

    /// Record that a referenced record does not exist
    pub fn reject_reference(&mut self, field: &str) {
        self.errors
            .add(field, format!("The selected {} is invalid.", attribute(field)));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// Shared name rule for both resources
pub fn name(validator: &mut Validator<'_>, presence: Presence) -> Option<String> {
    validator.string("name", presence, MAX_NAME_LENGTH)
}
