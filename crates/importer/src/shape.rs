//! The recognized shapes of a tool export document.
//!
//! Export files come in three shapes depending on which UI produced them.
//! Rather than probing keys ad hoc, a document is classified once into an
//! explicit shape; anything else is an unrecognized-shape error instead of
//! a silent fall-through.

use crate::error::ImportError;
use serde_json::Value;

/// Fields a tool payload must carry to be importable.
const REQUIRED_FIELDS: [&str; 3] = ["id", "name", "content"];

/// One importable tool definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPayload {
    /// Stable identifier; the upsert key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Tool source code.
    pub content: String,
    /// Free-form metadata object; empty object when absent.
    pub meta: Value,
}

/// A classified export document.
#[derive(Debug)]
pub enum ExportShape {
    /// `[{"tool": {...}, "userId": "..."}]`; the first element is used.
    WrappedList {
        /// The extracted tool payload.
        tool: ToolPayload,
        /// Owning user carried by the export, when present.
        user_id: Option<String>,
    },
    /// `{"tool": {...}, "userId": "..."}`.
    Wrapped {
        /// The extracted tool payload.
        tool: ToolPayload,
        /// Owning user carried by the export, when present.
        user_id: Option<String>,
    },
    /// A direct flat tool object with no wrapper.
    Direct(ToolPayload),
    /// A metadata document (`description` + `manifest`), not a tool.
    Metadata,
}

impl ExportShape {
    /// Classify a parsed JSON document into one of the recognized shapes.
    ///
    /// # Errors
    ///
    /// [`ImportError::UnrecognizedShape`] when the document matches no
    /// shape, [`ImportError::MissingFields`] when a tool payload was
    /// found but lacks required fields.
    pub fn classify(value: &Value) -> Result<Self, ImportError> {
        match value {
            Value::Array(items) => match items.first() {
                Some(Value::Object(first)) if first.contains_key("tool") => {
                    Ok(ExportShape::WrappedList {
                        tool: extract_payload(&first["tool"])?,
                        user_id: string_field(Some(first), "userId"),
                    })
                }
                Some(Value::Object(first)) => Err(ImportError::UnrecognizedShape(format!(
                    "array whose first element has keys [{}]",
                    keys_of(first)
                ))),
                Some(other) => Err(ImportError::UnrecognizedShape(format!(
                    "array of {}",
                    type_name(other)
                ))),
                None => Err(ImportError::UnrecognizedShape("empty array".to_string())),
            },
            Value::Object(map) => {
                if map.contains_key("tool") {
                    Ok(ExportShape::Wrapped {
                        tool: extract_payload(&map["tool"])?,
                        user_id: string_field(Some(map), "userId"),
                    })
                } else if REQUIRED_FIELDS.iter().any(|f| map.contains_key(*f)) {
                    Ok(ExportShape::Direct(extract_payload(value)?))
                } else if map.contains_key("description") && map.contains_key("manifest") {
                    Ok(ExportShape::Metadata)
                } else {
                    Err(ImportError::UnrecognizedShape(format!(
                        "object with keys [{}]",
                        keys_of(map)
                    )))
                }
            }
            other => Err(ImportError::UnrecognizedShape(format!(
                "top-level {}",
                type_name(other)
            ))),
        }
    }

    /// Resolve the shape into an importable payload and owning user.
    ///
    /// Returns `None` for metadata documents, which are skipped rather
    /// than imported.
    pub fn into_tool(self, default_user_id: &str) -> Option<(ToolPayload, String)> {
        match self {
            ExportShape::WrappedList { tool, user_id } | ExportShape::Wrapped { tool, user_id } => {
                Some((tool, user_id.unwrap_or_else(|| default_user_id.to_string())))
            }
            ExportShape::Direct(tool) => Some((tool, default_user_id.to_string())),
            ExportShape::Metadata => None,
        }
    }
}

/// Pull the required fields out of a tool object, naming every missing
/// one at once.
fn extract_payload(tool: &Value) -> Result<ToolPayload, ImportError> {
    let map = match tool.as_object() {
        Some(map) => map,
        None => {
            return Err(ImportError::UnrecognizedShape(format!(
                "tool payload is a {}",
                type_name(tool)
            )))
        }
    };

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !matches!(map.get(**field), Some(Value::String(_))))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingFields(missing));
    }

    Ok(ToolPayload {
        id: map["id"].as_str().unwrap_or_default().to_string(),
        name: map["name"].as_str().unwrap_or_default().to_string(),
        content: map["content"].as_str().unwrap_or_default().to_string(),
        meta: map.get("meta").cloned().unwrap_or_else(|| Value::Object(Default::default())),
    })
}

fn string_field(map: Option<&serde_json::Map<String, Value>>, key: &str) -> Option<String> {
    map.and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn keys_of(map: &serde_json::Map<String, Value>) -> String {
    map.keys().cloned().collect::<Vec<_>>().join(", ")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_a_wrapped_array() {
        let value = json!([{
            "tool": {"id": "t1", "name": "calc", "content": "def run(): ..."},
            "userId": "u-42"
        }]);
        let shape = ExportShape::classify(&value).unwrap();
        let (tool, user) = shape.into_tool("default").unwrap();
        assert_eq!(tool.id, "t1");
        assert_eq!(user, "u-42");
    }

    #[test]
    fn classifies_a_wrapped_object_without_user() {
        let value = json!({"tool": {"id": "t2", "name": "web", "content": "..."}});
        let shape = ExportShape::classify(&value).unwrap();
        let (tool, user) = shape.into_tool("default").unwrap();
        assert_eq!(tool.name, "web");
        assert_eq!(user, "default");
    }

    #[test]
    fn classifies_a_direct_tool_object() {
        let value = json!({
            "id": "t3",
            "name": "search",
            "content": "...",
            "meta": {"description": "a search tool"}
        });
        let shape = ExportShape::classify(&value).unwrap();
        let (tool, user) = shape.into_tool("default").unwrap();
        assert_eq!(tool.id, "t3");
        assert_eq!(tool.meta["description"], "a search tool");
        assert_eq!(user, "default");
    }

    #[test]
    fn metadata_documents_are_skipped_not_imported() {
        let value = json!({"description": "pack", "manifest": {}});
        let shape = ExportShape::classify(&value).unwrap();
        assert!(matches!(shape, ExportShape::Metadata));
        assert!(shape.into_tool("default").is_none());
    }

    #[test]
    fn missing_required_fields_are_all_named() {
        let value = json!({"tool": {"id": "t4"}});
        let err = ExportShape::classify(&value).unwrap_err();
        match err {
            ImportError::MissingFields(fields) => {
                assert_eq!(fields, vec!["name".to_string(), "content".to_string()]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_shapes_are_an_explicit_error() {
        for value in [json!(42), json!([]), json!({"foo": 1}), json!([1, 2])] {
            assert!(matches!(
                ExportShape::classify(&value),
                Err(ImportError::UnrecognizedShape(_))
            ));
        }
    }

    #[test]
    fn direct_object_with_partial_fields_is_rejected_not_unrecognized() {
        // Looks like a direct tool (has "id") but is incomplete.
        let value = json!({"id": "t5", "description": "no name or content"});
        assert!(matches!(
            ExportShape::classify(&value),
            Err(ImportError::MissingFields(_))
        ));
    }
}
