//! The single error kind produced by the schema layer.

use serde::Serialize;

/// A payload failed required-field, type, format or range checks.
///
/// Carries every violation found in the payload, not just the first one, so
/// the API layer can report them all in a single 4xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Validation failed for {entity}: {}", summarize(.violations))]
pub struct ValidationError {
    /// Entity family the payload was validated against (e.g. `"Movie"`).
    pub entity: &'static str,
    pub violations: Vec<FieldViolation>,
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field was absent.
    Required,
    /// The value has the wrong JSON type (including `null` where not allowed).
    Type,
    /// The value has the right JSON type but is malformed (e.g. a bad UUID).
    Format,
    /// The value is outside the representable or permitted range.
    Range,
}

impl ValidationError {
    pub fn new(entity: &'static str, violations: Vec<FieldViolation>) -> Self {
        Self { entity, violations }
    }

    /// Shorthand for an error with exactly one violation.
    pub fn single(
        entity: &'static str,
        field: impl Into<String>,
        kind: ViolationKind,
        message: impl Into<String>,
    ) -> Self {
        Self::new(entity, vec![FieldViolation::new(field, kind, message)])
    }

    /// Whether any violation concerns `field`.
    pub fn has_violation(&self, field: &str, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_violation() {
        let err = ValidationError::new(
            "Movie",
            vec![
                FieldViolation::new("title", ViolationKind::Required, "field is required"),
                FieldViolation::new("release_year", ViolationKind::Type, "expected integer"),
            ],
        );
        assert_eq!(
            err.to_string(),
            "Validation failed for Movie: title: field is required; release_year: expected integer"
        );
    }

    #[test]
    fn serializes_kind_as_snake_case() {
        let err = ValidationError::single("Course", "credits", ViolationKind::Range, "too large");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["entity"], "Course");
        assert_eq!(json["violations"][0]["field"], "credits");
        assert_eq!(json["violations"][0]["kind"], "range");
    }

    #[test]
    fn has_violation_matches_field_and_kind() {
        let err = ValidationError::single("Movie", "title", ViolationKind::Required, "missing");
        assert!(err.has_violation("title", ViolationKind::Required));
        assert!(!err.has_violation("title", ViolationKind::Type));
        assert!(!err.has_violation("genre", ViolationKind::Required));
    }
}
