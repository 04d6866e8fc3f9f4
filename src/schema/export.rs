//! Document store validator export.
//!
//! The validator is derived from the same field table the engine checks
//! against, so the store and the application cannot drift apart. It
//! describes records exactly as [`Record::to_record`] emits them with alias
//! keying; timestamps are therefore RFC 3339 strings, not BSON dates.
//!
//! [`Record::to_record`]: crate::Record::to_record

use serde_json::{Map, Value, json};

use super::{
    field::{Kind, Schema},
    timestamp,
};
use crate::domain::Keyword;

/// Builds the `$jsonSchema` collection validator for a record type.
///
/// Properties are keyed by alias, the storage convention. Undeclared
/// properties are rejected at the top level.
#[must_use]
pub fn collection_validator(schema: &Schema) -> Value {
    let mut root = object_schema(schema);
    root.insert("additionalProperties".to_string(), Value::Bool(false));
    json!({ "$jsonSchema": root })
}

fn object_schema(schema: &Schema) -> Map<String, Value> {
    let mut doc = Map::new();
    doc.insert("bsonType".to_string(), json!("object"));

    let required: Vec<&str> = schema.required_fields().map(|field| field.alias).collect();
    if !required.is_empty() {
        doc.insert("required".to_string(), json!(required));
    }

    let properties: Map<String, Value> = schema
        .fields
        .iter()
        .map(|field| (field.alias.to_string(), property(field.kind)))
        .collect();
    doc.insert("properties".to_string(), Value::Object(properties));
    doc
}

fn property(kind: Kind) -> Value {
    match kind {
        Kind::Text { min, max } => {
            let mut doc = Map::new();
            doc.insert("bsonType".to_string(), json!("string"));
            if let Some(min) = min {
                doc.insert("minLength".to_string(), json!(min));
            }
            if let Some(max) = max {
                doc.insert("maxLength".to_string(), json!(max));
            }
            Value::Object(doc)
        }
        Kind::Integer { min, max } => {
            let mut doc = Map::new();
            doc.insert("bsonType".to_string(), json!("int"));
            if let Some(min) = min {
                doc.insert("minimum".to_string(), json!(min));
            }
            if let Some(max) = max {
                doc.insert("maximum".to_string(), json!(max));
            }
            Value::Object(doc)
        }
        Kind::Timestamp => json!({ "bsonType": "string", "pattern": timestamp::PATTERN }),
        Kind::Vocabulary(allowed) => json!({ "enum": allowed }),
        Kind::Keywords => json!({
            "bsonType": "array",
            "items": {
                "bsonType": "string",
                "minLength": Keyword::MIN_LEN,
                "maxLength": Keyword::MAX_LEN,
            },
        }),
        Kind::Numbers => json!({
            "bsonType": "array",
            "items": { "bsonType": "double" },
        }),
        Kind::Object(schema) => Value::Object(object_schema(schema)),
        Kind::Objects(schema) => json!({
            "bsonType": "array",
            "items": object_schema(schema),
        }),
    }
}
