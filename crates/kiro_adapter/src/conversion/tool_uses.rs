//! Tool invocation extraction for assistant turns.

use kiro_core::{Content, ContentBlock, ContentPart, ToolCall};
use log::warn;
use serde_json::{Map, Value};

use crate::models::KiroToolUse;

/// Collect tool invocations from an assistant turn.
///
/// Entries from `tool_calls` come first, then `tool_use` parts of the content, each
/// group in its original order. Nothing is deduplicated.
pub fn extract_tool_uses_from_message(
    content: &Content,
    tool_calls: Option<&[ToolCall]>,
) -> Vec<KiroToolUse> {
    let mut tool_uses: Vec<KiroToolUse> = tool_calls
        .unwrap_or_default()
        .iter()
        .map(|call| KiroToolUse {
            tool_use_id: call.id.clone(),
            name: call.name().to_string(),
            input: parse_arguments(call),
        })
        .collect();

    if let Some(parts) = content.parts() {
        tool_uses.extend(parts.iter().filter_map(|part| match part {
            ContentPart::Block(ContentBlock::ToolUse { id, name, input }) => Some(KiroToolUse {
                tool_use_id: id.clone(),
                name: name.clone(),
                input: input.clone(),
            }),
            _ => None,
        }));
    }

    tool_uses
}

/// Decode the raw argument text of a call. Empty or malformed text becomes `{}`.
fn parse_arguments(call: &ToolCall) -> Value {
    let raw = call.arguments().trim();
    if raw.is_empty() {
        return Value::Object(Map::new());
    }

    match serde_json::from_str(raw) {
        Ok(input) => input,
        Err(err) => {
            warn!(
                "Tool call '{}' ({}) has invalid JSON arguments, sending empty input: {}",
                call.name(),
                call.id,
                err
            );
            Value::Object(Map::new())
        }
    }
}
