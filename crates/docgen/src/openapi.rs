//! OpenAPI 3.1 rendering of the entity documentation metadata.
//!
//! Paths per family:
//!
//! ```text
//! GET    {prefix}/{collection}        -> list   (200: [Read])
//! POST   {prefix}/{collection}        -> create (201: Read, 400: ValidationError)
//! GET    {prefix}/{collection}/{id}   -> get    (200: Read)
//! PATCH  {prefix}/{collection}/{id}   -> update (200: Read, 400: ValidationError)
//! ```

use catalog_core::entities::{families, Family};
use catalog_core::schema::{FieldDoc, SchemaDoc};
use serde_json::{json, Map, Value};

use crate::config::DocgenConfig;

pub const OPENAPI_VERSION: &str = "3.1.0";

/// Name of the shared error component.
pub const VALIDATION_ERROR_SCHEMA: &str = "ValidationError";

/// Build the complete OpenAPI document.
pub fn document(config: &DocgenConfig) -> Result<Value, serde_json::Error> {
    let mut paths = Map::new();
    let mut schemas = Map::new();

    for family in families() {
        for doc in family.schemas.all() {
            schemas.insert(doc.name.to_string(), schema_object(doc)?);
        }
        let collection_path = format!("{}/{}", config.api_prefix, family.collection);
        paths.insert(collection_path.clone(), collection_item(&family));
        paths.insert(format!("{collection_path}/{{id}}"), member_item(&family));
    }
    schemas.insert(VALIDATION_ERROR_SCHEMA.to_string(), validation_error_schema());

    tracing::debug!(
        paths = paths.len(),
        schemas = schemas.len(),
        "Rendered OpenAPI document"
    );

    Ok(json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": config.title,
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": paths,
        "components": { "schemas": schemas },
    }))
}

/// Render one schema variant as a JSON Schema object.
pub fn schema_object(doc: &SchemaDoc) -> Result<Value, serde_json::Error> {
    let mut properties = Map::new();
    for field in doc.fields {
        properties.insert(field.name.to_string(), property(field)?);
    }

    let mut schema = Map::new();
    schema.insert("title".into(), json!(doc.name));
    schema.insert("description".into(), json!(doc.description));
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));

    let required: Vec<&str> = doc.required_fields().collect();
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    schema.insert("examples".into(), json!(doc.example_values()?));

    Ok(Value::Object(schema))
}

fn property(field: &FieldDoc) -> Result<Value, serde_json::Error> {
    let json_type = field.kind.json_type();
    let mut prop = Map::new();
    if field.nullable {
        prop.insert("type".into(), json!([json_type, "null"]));
    } else {
        prop.insert("type".into(), json!(json_type));
    }
    if let Some(format) = field.kind.format() {
        prop.insert("format".into(), json!(format));
    }
    prop.insert("description".into(), json!(field.description));
    prop.insert("examples".into(), json!([field.example_value()?]));
    if let Some(default) = field.default_value() {
        prop.insert("default".into(), default?);
    }
    Ok(Value::Object(prop))
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn validation_failure() -> Value {
    json!({
        "description": "The payload failed validation.",
        "content": json_content(schema_ref(VALIDATION_ERROR_SCHEMA)),
    })
}

/// `/{collection}`: list and create.
fn collection_item(family: &Family) -> Value {
    let read = family.schemas.read.name;
    let plural = pascal_case(family.collection);
    json!({
        "get": {
            "operationId": format!("list{plural}"),
            "tags": [family.name],
            "summary": format!("List {}", family.collection.replace('-', " ")),
            "responses": {
                "200": {
                    "description": "All stored entities.",
                    "content": json_content(json!({ "type": "array", "items": schema_ref(read) })),
                },
            },
        },
        "post": {
            "operationId": format!("create{}", family.name),
            "tags": [family.name],
            "summary": format!("Create a {}", family.name),
            "requestBody": {
                "required": true,
                "content": json_content(schema_ref(family.schemas.create.name)),
            },
            "responses": {
                "201": {
                    "description": "Created. The server assigns id, created_at and updated_at.",
                    "content": json_content(schema_ref(read)),
                },
                "400": validation_failure(),
            },
        },
    })
}

/// `/{collection}/{id}`: fetch and partial update.
fn member_item(family: &Family) -> Value {
    let read = family.schemas.read.name;
    json!({
        "parameters": [{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "format": "uuid" },
        }],
        "get": {
            "operationId": format!("get{}", family.name),
            "tags": [family.name],
            "summary": format!("Fetch a {} by id", family.name),
            "responses": {
                "200": {
                    "description": "The stored entity.",
                    "content": json_content(schema_ref(read)),
                },
            },
        },
        "patch": {
            "operationId": format!("update{}", family.name),
            "tags": [family.name],
            "summary": format!("Partially update a {}", family.name),
            "requestBody": {
                "required": true,
                "content": json_content(schema_ref(family.schemas.update.name)),
            },
            "responses": {
                "200": {
                    "description": "Updated. updated_at is refreshed.",
                    "content": json_content(schema_ref(read)),
                },
                "400": validation_failure(),
            },
        },
    })
}

fn validation_error_schema() -> Value {
    json!({
        "title": VALIDATION_ERROR_SCHEMA,
        "description": "A payload failed required-field, type, format or range checks.",
        "type": "object",
        "properties": {
            "entity": { "type": "string", "examples": ["Movie"] },
            "violations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "field": { "type": "string", "examples": ["release_year"] },
                        "kind": {
                            "type": "string",
                            "enum": ["required", "type", "format", "range"],
                        },
                        "message": { "type": "string", "examples": ["expected integer, found string"] },
                    },
                    "required": ["field", "kind", "message"],
                },
            },
        },
        "required": ["entity", "violations"],
    })
}

/// `crew-members` -> `CrewMembers`.
fn pascal_case(kebab: &str) -> String {
    kebab
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
