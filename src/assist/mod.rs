// ABOUTME: AI assist adapter - bridges free text to form fields
// Pure coercion/merge rules here, the HTTP client lives in client.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub mod client;

pub use client::AssistClient;

use crate::schema::{split_languages, FieldId, FieldValue};

/// Outcome of one parse attempt. `fields` maps wire field names to raw
/// extracted values; keys the schema does not declare are dropped during
/// coercion rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiParseResult {
    pub success: bool,
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl AiParseResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            fields: serde_json::Map::new(),
            errors: vec![message.into()],
        }
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

/// Turn raw extracted values into typed field assignments.
///
/// Rules: unknown keys are dropped; `languages` accepts either an array or a
/// comma-delimited string; everything else is coerced to text; null and
/// empty values produce no assignment at all, so a field the user already
/// filled by hand is never clobbered by a blank extraction.
pub fn coerce_fields(fields: &serde_json::Map<String, Value>) -> Vec<(FieldId, FieldValue)> {
    let mut assignments = Vec::new();

    for (key, raw) in fields {
        let Some(field) = FieldId::from_wire(key) else {
            debug!("Dropping unknown AI field {:?}", key);
            continue;
        };

        if raw.is_null() {
            continue;
        }

        let value = if field == FieldId::Languages {
            match raw {
                Value::Array(items) => {
                    let list: Vec<String> = items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect();
                    FieldValue::List(list)
                }
                Value::String(s) => FieldValue::List(split_languages(s)),
                other => FieldValue::List(split_languages(&scalar_to_text(other))),
            }
        } else {
            FieldValue::Text(match raw {
                Value::String(s) => s.clone(),
                other => scalar_to_text(other),
            })
        };

        if value.is_empty() {
            continue;
        }

        assignments.push((field, value));
    }

    assignments
}

fn scalar_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_languages_string_is_split_and_trimmed() {
        let assignments = coerce_fields(&fields(json!({"languages": "Spanish, Mandarin "})));
        assert_eq!(
            assignments,
            vec![(
                FieldId::Languages,
                FieldValue::List(vec!["Spanish".into(), "Mandarin".into()])
            )]
        );
    }

    #[test]
    fn test_languages_array_passes_through() {
        let assignments = coerce_fields(&fields(json!({"languages": ["French"]})));
        assert_eq!(
            assignments,
            vec![(FieldId::Languages, FieldValue::List(vec!["French".into()]))]
        );
    }

    #[test]
    fn test_null_and_empty_values_produce_no_assignment() {
        let assignments = coerce_fields(&fields(json!({
            "requestorName": null,
            "orgName": "",
            "address": "  ",
            "comments": "bring badge"
        })));
        assert_eq!(
            assignments,
            vec![(FieldId::Comments, FieldValue::Text("bring badge".into()))]
        );
    }

    #[test]
    fn test_unknown_keys_dropped_silently() {
        let assignments = coerce_fields(&fields(json!({
            "patientName": "should never appear",
            "serviceType": "onsite"
        })));
        assert_eq!(
            assignments,
            vec![(FieldId::ServiceType, FieldValue::Text("onsite".into()))]
        );
    }

    #[test]
    fn test_numeric_scalar_coerced_to_text() {
        let assignments = coerce_fields(&fields(json!({"duration": 1.5})));
        assert_eq!(
            assignments,
            vec![(FieldId::Duration, FieldValue::Text("1.5".into()))]
        );
    }
}
