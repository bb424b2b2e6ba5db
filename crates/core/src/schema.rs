//! Documentation metadata for schema variants.
//!
//! Plain static data consumed by the API documentation generator. Nothing in
//! the validation path reads it.

use serde::Serialize;
use serde_json::Value;

/// Semantic type of a documented field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    Uuid,
    Timestamp,
}

impl FieldKind {
    /// JSON Schema `type` keyword.
    pub fn json_type(self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::String | FieldKind::Uuid | FieldKind::Timestamp => "string",
        }
    }

    /// JSON Schema `format` keyword, if any.
    pub fn format(self) -> Option<&'static str> {
        match self {
            FieldKind::String => None,
            FieldKind::Integer => Some("int32"),
            FieldKind::Uuid => Some("uuid"),
            FieldKind::Timestamp => Some("date-time"),
        }
    }
}

/// Description and example for one field of one schema variant.
///
/// `example` and `default` hold JSON text so they keep their exact wire form
/// (e.g. `2010` vs `"2010"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDoc {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    pub description: &'static str,
    pub example: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl FieldDoc {
    pub const fn required(
        name: &'static str,
        kind: FieldKind,
        description: &'static str,
        example: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
            description,
            example,
            default: None,
        }
    }

    /// An optional, nullable field.
    pub const fn optional(
        name: &'static str,
        kind: FieldKind,
        description: &'static str,
        example: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: true,
            description,
            example,
            default: None,
        }
    }

    /// Optional on input, filled with `default` (JSON text) when omitted.
    pub const fn defaulted(self, default: &'static str) -> Self {
        Self {
            required: false,
            nullable: false,
            default: Some(default),
            ..self
        }
    }

    /// The same field as it appears on a partial-update schema.
    pub const fn for_patch(self, example: &'static str) -> Self {
        Self {
            required: false,
            default: None,
            example,
            ..self
        }
    }

    pub fn example_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(self.example)
    }

    pub fn default_value(&self) -> Option<Result<Value, serde_json::Error>> {
        self.default.map(serde_json::from_str)
    }
}

/// Server-assigned `id` field of a Read schema.
pub const fn id_field(description: &'static str, example: &'static str) -> FieldDoc {
    FieldDoc::required("id", FieldKind::Uuid, description, example)
}

pub const fn created_at_field(example: &'static str) -> FieldDoc {
    FieldDoc::required(
        "created_at",
        FieldKind::Timestamp,
        "Creation timestamp (UTC).",
        example,
    )
}

pub const fn updated_at_field(example: &'static str) -> FieldDoc {
    FieldDoc::required(
        "updated_at",
        FieldKind::Timestamp,
        "Last update timestamp (UTC).",
        example,
    )
}

/// Documentation for one schema variant (e.g. `MovieCreate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaDoc {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldDoc],
    /// Full representative objects, as JSON text.
    pub examples: &'static [&'static str],
}

impl SchemaDoc {
    pub fn field(&self, name: &str) -> Option<&FieldDoc> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }

    pub fn example_values(&self) -> Result<Vec<Value>, serde_json::Error> {
        self.examples.iter().map(|e| serde_json::from_str(e)).collect()
    }
}

/// The four variants of one entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Schemas {
    pub base: SchemaDoc,
    pub create: SchemaDoc,
    pub update: SchemaDoc,
    pub read: SchemaDoc,
}

impl Schemas {
    pub fn all(&self) -> [&SchemaDoc; 4] {
        [&self.base, &self.create, &self.update, &self.read]
    }
}
