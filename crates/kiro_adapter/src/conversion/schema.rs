//! JSON Schema sanitization.
//!
//! The backend answers 400 "Improperly formed request" when a tool schema carries
//! `"required": []` or any `additionalProperties`. Both are removed at every schema
//! level reachable through `properties` values or array elements.

use serde_json::{Map, Value};

/// Return a sanitized copy of a tool input schema.
///
/// Absent, non-object and empty schemas become `{}`. Non-empty `required` arrays
/// and non-object array elements (enum literals) are kept as-is. Traversal uses an
/// explicit stack, so schema depth is bounded only by memory.
pub fn sanitize_json_schema(schema: &Value) -> Value {
    let mut root = match schema {
        Value::Object(object) if !object.is_empty() => object.clone(),
        _ => return Value::Object(Map::new()),
    };

    let mut pending: Vec<&mut Map<String, Value>> = vec![&mut root];
    while let Some(node) = pending.pop() {
        strip_rejected_keywords(node);

        for (key, value) in node {
            match value {
                Value::Object(properties) if key == "properties" => {
                    pending.extend(properties.values_mut().filter_map(Value::as_object_mut));
                }
                Value::Array(items) => {
                    pending.extend(items.iter_mut().filter_map(Value::as_object_mut));
                }
                _ => {}
            }
        }
    }

    Value::Object(root)
}

fn strip_rejected_keywords(node: &mut Map<String, Value>) {
    if node
        .get("required")
        .and_then(Value::as_array)
        .is_some_and(Vec::is_empty)
    {
        node.remove("required");
    }
    node.remove("additionalProperties");
}
