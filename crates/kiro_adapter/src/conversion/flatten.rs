//! Tool content flattening.
//!
//! A request without tool definitions may not carry tool uses or tool results;
//! the backend rejects it. Such turns keep the information as readable text.

use kiro_core::{Content, ContentBlock, ContentPart, ToolCall, ToolResult, UnifiedMessage};
use log::debug;

use super::images::resolve_images;
use super::text::{extract_optional_text, extract_text_content};
use super::tool_results::EMPTY_RESULT_PLACEHOLDER;

const EMPTY_MESSAGE_PLACEHOLDER: &str = "(empty)";

/// Render tool calls as text blocks separated by a blank line
pub fn tool_calls_to_text(tool_calls: &[ToolCall]) -> String {
    tool_calls
        .iter()
        .map(|call| tool_use_text(&call.id, call.name(), call.arguments()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render tool results as text blocks separated by a blank line
pub fn tool_results_to_text(tool_results: &[ToolResult]) -> String {
    tool_results
        .iter()
        .map(|result| tool_result_text(&result.tool_use_id, result.content.as_ref()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn tool_use_text(id: &str, name: &str, arguments: &str) -> String {
    if id.is_empty() {
        format!("[Tool: {name}]\n{arguments}")
    } else {
        format!("[Tool: {name} ({id})]\n{arguments}")
    }
}

fn tool_result_text(id: &str, content: Option<&Content>) -> String {
    let mut text = extract_optional_text(content);
    if text.is_empty() {
        text = EMPTY_RESULT_PLACEHOLDER.to_string();
    }

    if id.is_empty() {
        format!("[Tool Result]\n{text}")
    } else {
        format!("[Tool Result ({id})]\n{text}")
    }
}

/// Replace every tool call and tool result with its text rendering.
///
/// Applies to `tool_calls`, `tool_results` and `tool_use`/`tool_result` parts of
/// the content. Affected turns end up with plain text content and no tool lists.
/// Their images move to `images`: the decoder-provided list if non-empty, else the
/// images found in content. Returns the new sequence and whether any turn changed.
pub fn strip_all_tool_content(messages: &[UnifiedMessage]) -> (Vec<UnifiedMessage>, bool) {
    let mut converted = 0usize;

    let result = messages
        .iter()
        .map(|message| match flatten_message(message) {
            Some(flattened) => {
                converted += 1;
                flattened
            }
            None => message.clone(),
        })
        .collect();

    if converted > 0 {
        debug!(
            "Converted tool content to text in {} messages (no tools defined)",
            converted
        );
    }

    (result, converted > 0)
}

fn flatten_message(message: &UnifiedMessage) -> Option<UnifiedMessage> {
    let embedded: Vec<&ContentBlock> = message
        .content
        .parts()
        .unwrap_or_default()
        .iter()
        .filter_map(|part| match part {
            ContentPart::Block(block @ ContentBlock::ToolUse { .. })
            | ContentPart::Block(block @ ContentBlock::ToolResult { .. }) => Some(block),
            _ => None,
        })
        .collect();

    if !message.has_tool_calls() && !message.has_tool_results() && embedded.is_empty() {
        return None;
    }

    let mut sections = Vec::new();

    let text = extract_text_content(&message.content);
    if !text.is_empty() {
        sections.push(text);
    }

    if let Some(calls) = message.tool_calls.as_deref().filter(|c| !c.is_empty()) {
        sections.push(tool_calls_to_text(calls));
    }
    if let Some(results) = message.tool_results.as_deref().filter(|r| !r.is_empty()) {
        sections.push(tool_results_to_text(results));
    }

    for block in embedded {
        match block {
            ContentBlock::ToolUse { id, name, input } => {
                sections.push(tool_use_text(id, name, &input.to_string()));
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
            } => sections.push(tool_result_text(tool_use_id, content.as_ref())),
            _ => {}
        }
    }

    let content = if sections.is_empty() {
        EMPTY_MESSAGE_PLACEHOLDER.to_string()
    } else {
        sections.join("\n\n")
    };

    let images = resolve_images(&message.content, message.images.as_deref());

    Some(UnifiedMessage {
        role: message.role,
        content: Content::Text(content),
        tool_calls: None,
        tool_results: None,
        images: if images.is_empty() { None } else { Some(images) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiro_core::UnifiedImage;
    use serde_json::json;

    #[test]
    fn test_tool_calls_to_text() {
        let calls = vec![
            ToolCall::new("call_1", "bash", r#"{"command": "ls"}"#),
            ToolCall::new("", "read", r#"{"path": "a"}"#),
        ];

        assert_eq!(
            tool_calls_to_text(&calls),
            "[Tool: bash (call_1)]\n{\"command\": \"ls\"}\n\n[Tool: read]\n{\"path\": \"a\"}"
        );
    }

    #[test]
    fn test_tool_results_to_text() {
        let results = vec![
            ToolResult::new("call_1", "file.txt"),
            ToolResult::without_content("call_2"),
            ToolResult::new("", "anonymous"),
        ];

        assert_eq!(
            tool_results_to_text(&results),
            "[Tool Result (call_1)]\nfile.txt\n\n\
             [Tool Result (call_2)]\n(empty result)\n\n\
             [Tool Result]\nanonymous"
        );
    }

    #[test]
    fn test_leaves_plain_messages_untouched() {
        let messages = vec![UnifiedMessage::user("Hello"), UnifiedMessage::assistant("Hi")];

        let (result, converted) = strip_all_tool_content(&messages);

        assert_eq!(result, messages);
        assert!(!converted);
    }

    #[test]
    fn test_flattens_tool_calls_and_results() {
        let messages = vec![
            UnifiedMessage::assistant("Let me check")
                .with_tool_calls(vec![ToolCall::new("call_1", "bash", "{}")]),
            UnifiedMessage::user("").with_tool_results(vec![ToolResult::new("call_1", "ok")]),
        ];

        let (result, converted) = strip_all_tool_content(&messages);

        assert!(converted);
        assert_eq!(
            result[0].content,
            Content::text("Let me check\n\n[Tool: bash (call_1)]\n{}")
        );
        assert!(result[0].tool_calls.is_none());
        assert_eq!(result[1].content, Content::text("[Tool Result (call_1)]\nok"));
        assert!(result[1].tool_results.is_none());
    }

    #[test]
    fn test_flattens_embedded_blocks() {
        let content: Content = serde_json::from_value(json!([
            {"type": "text", "text": "Results:"},
            {"type": "tool_result", "tool_use_id": "toolu_1", "content": "42"}
        ]))
        .unwrap();
        let messages = vec![UnifiedMessage::user(content)];

        let (result, converted) = strip_all_tool_content(&messages);

        assert!(converted);
        assert_eq!(
            result[0].content,
            Content::text("Results:\n\n[Tool Result (toolu_1)]\n42")
        );
    }

    #[test]
    fn test_embedded_tool_use_renders_input_json() {
        let messages = vec![UnifiedMessage::assistant(vec![ContentPart::tool_use(
            "toolu_1",
            "search",
            json!({"q": "rust"}),
        )])];

        let (result, _) = strip_all_tool_content(&messages);

        assert_eq!(
            result[0].content,
            Content::text("[Tool: search (toolu_1)]\n{\"q\":\"rust\"}")
        );
    }

    #[test]
    fn test_empty_tool_lists_do_not_trigger() {
        let messages = vec![UnifiedMessage::user("hi")
            .with_tool_calls(vec![])
            .with_tool_results(vec![])];

        let (result, converted) = strip_all_tool_content(&messages);

        assert_eq!(result, messages);
        assert!(!converted);
    }

    #[test]
    fn test_keeps_images_from_content() {
        let content: Content = serde_json::from_value(json!([
            {"type": "image", "source": {
                "type": "base64", "media_type": "image/png", "data": "AAA"
            }},
            {"type": "tool_result", "tool_use_id": "t", "content": "done"}
        ]))
        .unwrap();

        let (result, _) = strip_all_tool_content(&[UnifiedMessage::user(content)]);

        let images = result[0].images.as_ref().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].media_type, "image/png");
    }

    #[test]
    fn test_decoded_images_are_not_duplicated() {
        let content: Content = serde_json::from_value(json!([
            {"type": "image", "source": {
                "type": "base64", "media_type": "image/png", "data": "X"
            }},
            {"type": "text", "text": "see attached"}
        ]))
        .unwrap();
        let message = UnifiedMessage::user(content)
            .with_images(vec![UnifiedImage {
                media_type: "image/png".to_string(),
                data: "X".to_string(),
            }])
            .with_tool_results(vec![ToolResult::new("call_1", "done")]);

        let (result, converted) = strip_all_tool_content(&[message]);

        assert!(converted);
        let images = result[0].images.as_ref().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].data, "X");
    }
}
