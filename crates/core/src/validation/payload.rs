//! Field-by-field reader over an untrusted JSON payload.
//!
//! The reader records every violation it encounters instead of stopping at
//! the first one. Accessors for required fields return a placeholder
//! (`Default::default()`) when the field is missing or invalid; the
//! placeholder never escapes because [`PayloadReader::finish`] returns the
//! accumulated error whenever a violation was recorded.

use serde_json::{Map, Value};

use crate::error::{FieldViolation, ValidationError, ViolationKind};
use crate::lifecycle::RESERVED_FIELDS;
use crate::types::EntityId;

/// A Rust type that can be read from a single JSON field value.
pub trait FieldValue: Sized + Default {
    /// Human-readable name of the expected JSON shape, used in messages.
    const EXPECTED: &'static str;

    /// Convert a non-null JSON value, or describe why it cannot be converted.
    fn from_json(value: &Value) -> Result<Self, (ViolationKind, String)>;
}

impl FieldValue for String {
    const EXPECTED: &'static str = "string";

    fn from_json(value: &Value) -> Result<Self, (ViolationKind, String)> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(type_mismatch(Self::EXPECTED, other)),
        }
    }
}

impl FieldValue for i32 {
    const EXPECTED: &'static str = "integer";

    fn from_json(value: &Value) -> Result<Self, (ViolationKind, String)> {
        let Value::Number(n) = value else {
            return Err(type_mismatch(Self::EXPECTED, value));
        };
        if let Some(i) = n.as_i64() {
            return i32::try_from(i).map_err(|_| {
                (
                    ViolationKind::Range,
                    format!("{i} is outside the 32-bit integer range"),
                )
            });
        }
        if n.is_u64() {
            return Err((
                ViolationKind::Range,
                format!("{n} is outside the 32-bit integer range"),
            ));
        }
        Err((ViolationKind::Type, format!("expected integer, found {n}")))
    }
}

impl FieldValue for EntityId {
    const EXPECTED: &'static str = "UUID string";

    fn from_json(value: &Value) -> Result<Self, (ViolationKind, String)> {
        let Value::String(s) = value else {
            return Err(type_mismatch(Self::EXPECTED, value));
        };
        uuid::Uuid::parse_str(s)
            .map_err(|e| (ViolationKind::Format, format!("invalid UUID '{s}': {e}")))
    }
}

fn type_mismatch(expected: &str, found: &Value) -> (ViolationKind, String) {
    (
        ViolationKind::Type,
        format!("expected {expected}, found {}", json_type_name(found)),
    )
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

/// Collects typed field values and violations from one payload.
pub struct PayloadReader<'a> {
    entity: &'static str,
    fields: Option<&'a Map<String, Value>>,
    violations: Vec<FieldViolation>,
}

impl<'a> PayloadReader<'a> {
    /// Start reading `payload` on behalf of `entity`.
    ///
    /// A payload that is not a JSON object is recorded as a violation on the
    /// root field `$`; every subsequent accessor then yields absent values.
    pub fn new(entity: &'static str, payload: &'a Value) -> Self {
        let mut reader = Self {
            entity,
            fields: None,
            violations: Vec::new(),
        };
        match payload.as_object() {
            Some(map) => {
                for reserved in RESERVED_FIELDS {
                    if map.contains_key(reserved) {
                        tracing::trace!(entity, field = reserved, "Ignoring server-assigned field");
                    }
                }
                reader.fields = Some(map);
            }
            None => reader.violations.push(FieldViolation::new(
                "$",
                ViolationKind::Type,
                format!("expected object, found {}", json_type_name(payload)),
            )),
        }
        reader
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.and_then(|map| map.get(field))
    }

    fn convert<T: FieldValue>(&mut self, field: &str, value: &Value) -> Option<T> {
        match T::from_json(value) {
            Ok(v) => Some(v),
            Err((kind, message)) => {
                self.violations.push(FieldViolation::new(field, kind, message));
                None
            }
        }
    }

    /// A field that must be present and non-null.
    pub fn required<T: FieldValue>(&mut self, field: &str) -> T {
        match self.get(field) {
            None => {
                if self.fields.is_some() {
                    self.violations.push(FieldViolation::new(
                        field,
                        ViolationKind::Required,
                        "field is required",
                    ));
                }
                T::default()
            }
            Some(value) => self.convert(field, value).unwrap_or_default(),
        }
    }

    /// A field that may be absent or `null`.
    pub fn optional<T: FieldValue>(&mut self, field: &str) -> Option<T> {
        match self.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.convert(field, value),
        }
    }

    /// A field that falls back to `default()` when absent. `null` is a type
    /// violation since the resulting field is never nullable.
    pub fn defaulted<T: FieldValue>(&mut self, field: &str, default: fn() -> T) -> T {
        match self.get(field) {
            None => default(),
            Some(value) => self.convert(field, value).unwrap_or_default(),
        }
    }

    /// A patch field for a non-nullable attribute: absent means "unchanged",
    /// `null` is a type violation.
    pub fn patch<T: FieldValue>(&mut self, field: &str) -> Option<T> {
        self.get(field).and_then(|value| self.convert(field, value))
    }

    /// A patch field for a nullable attribute: absent means "unchanged",
    /// `null` means "clear".
    pub fn patch_nullable<T: FieldValue>(&mut self, field: &str) -> Option<Option<T>> {
        match self.get(field) {
            None => None,
            Some(Value::Null) => Some(None),
            Some(value) => self.convert(field, value).map(Some),
        }
    }

    /// Return `value` if no violation was recorded, otherwise the error.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            return Ok(value);
        }
        tracing::debug!(
            entity = self.entity,
            violations = self.violations.len(),
            "Rejected payload"
        );
        Err(ValidationError::new(self.entity, self.violations))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_required_and_optional_fields() {
        let payload = json!({"name": "Nolan", "year": 2010, "note": null});
        let mut r = PayloadReader::new("Test", &payload);
        let name: String = r.required("name");
        let year: i32 = r.required("year");
        let note: Option<String> = r.optional("note");
        let extra: Option<String> = r.optional("extra");
        let out = r.finish((name, year, note, extra)).unwrap();
        assert_eq!(out, ("Nolan".to_string(), 2010, None, None));
    }

    #[test]
    fn collects_every_violation() {
        let payload = json!({"year": "2010"});
        let mut r = PayloadReader::new("Test", &payload);
        let _: String = r.required("name");
        let _: i32 = r.required("year");
        let err = r.finish(()).unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.has_violation("name", ViolationKind::Required));
        assert!(err.has_violation("year", ViolationKind::Type));
    }

    #[test]
    fn rejects_non_object_payload_once() {
        let payload = json!([1, 2, 3]);
        let mut r = PayloadReader::new("Test", &payload);
        let _: String = r.required("name");
        let err = r.finish(()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.has_violation("$", ViolationKind::Type));
    }

    #[test]
    fn integers_are_strict() {
        assert_matches!(i32::from_json(&json!(3)), Ok(3));
        assert_matches!(i32::from_json(&json!(-7)), Ok(-7));
        assert_matches!(i32::from_json(&json!(3.0)), Err((ViolationKind::Type, _)));
        assert_matches!(i32::from_json(&json!(3.5)), Err((ViolationKind::Type, _)));
        assert_matches!(i32::from_json(&json!("3")), Err((ViolationKind::Type, _)));
        assert_matches!(i32::from_json(&json!(true)), Err((ViolationKind::Type, _)));
        assert_matches!(
            i32::from_json(&json!(4_000_000_000_i64)),
            Err((ViolationKind::Range, _))
        );
        assert_matches!(
            i32::from_json(&json!(u64::MAX)),
            Err((ViolationKind::Range, _))
        );
    }

    #[test]
    fn uuids_distinguish_type_from_format() {
        assert_matches!(
            EntityId::from_json(&json!("aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa")),
            Ok(_)
        );
        assert_matches!(
            EntityId::from_json(&json!("not-a-uuid")),
            Err((ViolationKind::Format, _))
        );
        assert_matches!(EntityId::from_json(&json!(42)), Err((ViolationKind::Type, _)));
    }

    #[test]
    fn required_null_is_a_type_violation() {
        let payload = json!({"name": null});
        let mut r = PayloadReader::new("Test", &payload);
        let _: String = r.required("name");
        let err = r.finish(()).unwrap_err();
        assert!(err.has_violation("name", ViolationKind::Type));
    }

    #[test]
    fn defaulted_applies_only_when_absent() {
        let absent = json!({});
        let mut r = PayloadReader::new("Test", &absent);
        let role: String = r.defaulted("role", || "student".to_string());
        assert_eq!(r.finish(role).unwrap(), "student");

        let present = json!({"role": "TA"});
        let mut r = PayloadReader::new("Test", &present);
        let role: String = r.defaulted("role", || "student".to_string());
        assert_eq!(r.finish(role).unwrap(), "TA");

        let null = json!({"role": null});
        let mut r = PayloadReader::new("Test", &null);
        let _: String = r.defaulted("role", || "student".to_string());
        assert!(r.finish(()).unwrap_err().has_violation("role", ViolationKind::Type));
    }

    #[test]
    fn patch_fields_distinguish_absent_null_and_value() {
        let payload = json!({"grade": null, "role": "TA"});
        let mut r = PayloadReader::new("Test", &payload);
        let grade: Option<Option<String>> = r.patch_nullable("grade");
        let award: Option<Option<String>> = r.patch_nullable("award");
        let role: Option<String> = r.patch("role");
        let title: Option<String> = r.patch("title");
        let out = r.finish((grade, award, role, title)).unwrap();
        assert_eq!(out, (Some(None), None, Some("TA".to_string()), None));
    }

    #[test]
    fn patch_rejects_null_for_non_nullable_field() {
        let payload = json!({"title": null});
        let mut r = PayloadReader::new("Test", &payload);
        let _: Option<String> = r.patch("title");
        assert!(r.finish(()).unwrap_err().has_violation("title", ViolationKind::Type));
    }
}
