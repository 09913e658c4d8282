//! Text extraction from polymorphic message content.

use kiro_core::{Content, ContentPart};
use serde_json::Value;

/// Flatten content into plain text.
///
/// Parts are concatenated in order with no separator: raw strings, text blocks,
/// and the `text` field of unknown objects. Tool and image blocks contribute
/// nothing. Non-string scalars are stringified; null yields an empty string.
pub fn extract_text_content(content: &Content) -> String {
    match content {
        Content::Text(text) => text.clone(),
        Content::Parts(parts) => parts.iter().filter_map(ContentPart::as_text).collect(),
        Content::Scalar(Value::Null) => String::new(),
        Content::Scalar(Value::String(text)) => text.clone(),
        Content::Scalar(Value::Array(items)) => items.iter().filter_map(loose_part_text).collect(),
        Content::Scalar(other) => other.to_string(),
    }
}

/// Same as [`extract_text_content`], treating absent content as empty
pub fn extract_optional_text(content: Option<&Content>) -> String {
    content.map(extract_text_content).unwrap_or_default()
}

// Arrays that failed to decode as parts (e.g. they contain numbers).
fn loose_part_text(item: &Value) -> Option<&str> {
    match item {
        Value::String(text) => Some(text),
        Value::Object(object) => object.get("text").and_then(Value::as_str),
        _ => None,
    }
}
