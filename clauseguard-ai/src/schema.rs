use serde::de::DeserializeOwned;
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use clauseguard_common::Error;

use crate::models::{FieldType, SchemaField};

/// Declared shape of a flow's output, handed to the provider and used to parse the reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Identifier sent to providers that name their schemas
    pub name: String,

    pub description: String,

    pub fields: Vec<SchemaField>,
}

impl OutputSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields,
        }
    }

    /// JSON Schema representation (OpenAI, Anthropic).
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut field_schema = Map::new();
            field_schema.insert("description".to_string(), Value::String(field.description.clone()));
            match field.field_type {
                FieldType::String => {
                    field_schema.insert("type".to_string(), Value::String("string".to_string()));
                }
                FieldType::Number => {
                    field_schema.insert("type".to_string(), Value::String("number".to_string()));
                }
                FieldType::Boolean => {
                    field_schema.insert("type".to_string(), Value::String("boolean".to_string()));
                }
                FieldType::StringArray => {
                    field_schema.insert("type".to_string(), Value::String("array".to_string()));
                    field_schema.insert("items".to_string(), serde_json::json!({ "type": "string" }));
                }
            }

            properties.insert(field.name.clone(), Value::Object(field_schema));

            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), Value::Array(required));
        schema.insert("additionalProperties".to_string(), Value::Bool(false));

        Value::Object(schema)
    }

    /// OpenAPI-subset representation accepted by Gemini's `responseSchema`.
    pub fn to_gemini_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let field_schema = match field.field_type {
                FieldType::String => serde_json::json!({ "type": "STRING", "description": field.description }),
                FieldType::Number => serde_json::json!({ "type": "NUMBER", "description": field.description }),
                FieldType::Boolean => serde_json::json!({ "type": "BOOLEAN", "description": field.description }),
                FieldType::StringArray => serde_json::json!({
                    "type": "ARRAY",
                    "description": field.description,
                    "items": { "type": "STRING" }
                }),
            };
            properties.insert(field.name.clone(), field_schema);
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }

        serde_json::json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        })
    }

    /// Parses a raw model reply into `T`.
    ///
    /// Any failure (no JSON object, missing field, wrong type) is a `ModelOutput` error
    /// naming the offending path.
    pub fn parse<T: DeserializeOwned>(&self, raw: &str) -> Result<T, Error> {
        let json = extract_json_object(raw).ok_or_else(|| {
            Error::ModelOutput(format!("{}: reply did not contain a JSON object", self.name))
        })?;

        let mut de = serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(&mut de).map_err(|e| {
            let path = e.path().to_string();
            Error::ModelOutput(format!("{}: {} (at `{}`)", self.name, e.into_inner(), path))
        })
    }
}

/// Slices the outermost `{ ... }` out of a reply, ignoring code fences or chatter around it.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        score: f64,
        flagged: bool,
    }

    fn schema() -> OutputSchema {
        OutputSchema::new(
            "sample",
            "test schema",
            vec![
                SchemaField::required("score", FieldType::Number, "a score"),
                SchemaField::required("flagged", FieldType::Boolean, "a flag"),
                SchemaField::required("notes", FieldType::StringArray, "notes"),
            ],
        )
    }

    #[test]
    fn json_schema_lists_required_fields() {
        let v = schema().to_json_schema();
        assert_eq!(v["type"], "object");
        assert_eq!(v["properties"]["notes"]["items"]["type"], "string");
        assert_eq!(v["required"], serde_json::json!(["score", "flagged", "notes"]));
        assert_eq!(v["additionalProperties"], false);
    }

    #[test]
    fn gemini_schema_uses_upper_case_types() {
        let v = schema().to_gemini_schema();
        assert_eq!(v["type"], "OBJECT");
        assert_eq!(v["properties"]["score"]["type"], "NUMBER");
        assert_eq!(v["properties"]["notes"]["type"], "ARRAY");
    }

    #[test]
    fn parses_reply_wrapped_in_code_fence() {
        let raw = "Here you go:\n```json\n{\"score\": 12, \"flagged\": false}\n```";
        let parsed: Sample = schema().parse(raw).unwrap();
        assert_eq!(parsed, Sample { score: 12.0, flagged: false });
    }

    #[test]
    fn missing_field_is_model_output_error() {
        let err = schema().parse::<Sample>("{\"score\": 12}").unwrap_err();
        match err {
            Error::ModelOutput(msg) => assert!(msg.contains("flagged"), "{}", msg),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn wrong_type_names_the_path() {
        let err = schema()
            .parse::<Sample>("{\"score\": \"high\", \"flagged\": true}")
            .unwrap_err();
        match err {
            Error::ModelOutput(msg) => assert!(msg.contains("score"), "{}", msg),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn prose_reply_is_rejected() {
        assert!(matches!(
            schema().parse::<Sample>("I cannot help with that."),
            Err(Error::ModelOutput(_))
        ));
        assert_eq!(extract_json_object("} {"), None);
    }
}
