use clap::Parser;
use news_records::{Config, schema::collection_validator};
use serde_json::json;

use super::{RecordKind, to_json_string};

#[derive(Debug, Parser)]
#[command(about = "Print the document store validator for a record type")]
pub struct Schema {
    /// The type of record to describe
    kind: RecordKind,
}

impl Schema {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let schema = self.kind.schema();
        let document = json!({
            "collection": schema.collection.unwrap_or(schema.entity),
            "validator": collection_validator(schema),
        });

        println!("{}", to_json_string(&document, config)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_collection() {
        for kind in [RecordKind::Issue, RecordKind::Article, RecordKind::MediaSource] {
            assert!(kind.schema().collection.is_some());
        }
    }

    #[test]
    fn media_source_validator_matches_store_layout() {
        let validator = collection_validator(RecordKind::MediaSource.schema());
        let schema = &validator["$jsonSchema"];

        assert_eq!(schema["required"], json!(["_id", "name", "perspective"]));
        assert_eq!(
            schema["properties"]["foundedYear"],
            json!({"bsonType": "int", "minimum": 1800, "maximum": 2026})
        );
        assert_eq!(
            schema["properties"]["perspective"]["enum"],
            json!(["left", "center_left", "center", "center_right", "right"])
        );
        assert_eq!(
            schema["properties"]["category_list"]["items"]["required"],
            json!(["name", "url"])
        );
    }
}
