//! Tool result conversion to the backend shape.

use kiro_core::{Content, ContentBlock, ContentPart, ToolResult};

use super::text::extract_optional_text;
use crate::models::{KiroTextContent, KiroToolResult, TOOL_RESULT_STATUS_SUCCESS};

/// Substituted for empty result text; the backend rejects empty content blocks
pub const EMPTY_RESULT_PLACEHOLDER: &str = "(empty result)";

/// Convert unified tool results to backend form, preserving count and order.
///
/// Status is always "success" and empty or missing content becomes
/// [`EMPTY_RESULT_PLACEHOLDER`].
pub fn convert_tool_results_to_kiro_format(tool_results: &[ToolResult]) -> Vec<KiroToolResult> {
    tool_results
        .iter()
        .map(|result| to_kiro_tool_result(&result.tool_use_id, result.content.as_ref()))
        .collect()
}

/// Collect `tool_result` parts embedded in content. Plain text yields nothing.
pub fn extract_tool_results_from_content(content: &Content) -> Vec<KiroToolResult> {
    let Some(parts) = content.parts() else {
        return Vec::new();
    };

    parts
        .iter()
        .filter_map(|part| match part {
            ContentPart::Block(ContentBlock::ToolResult {
                tool_use_id,
                content,
            }) => Some(to_kiro_tool_result(tool_use_id, content.as_ref())),
            _ => None,
        })
        .collect()
}

fn to_kiro_tool_result(tool_use_id: &str, content: Option<&Content>) -> KiroToolResult {
    let mut text = extract_optional_text(content);
    if text.is_empty() {
        text = EMPTY_RESULT_PLACEHOLDER.to_string();
    }

    KiroToolResult {
        tool_use_id: tool_use_id.to_string(),
        status: TOOL_RESULT_STATUS_SUCCESS.to_string(),
        content: vec![KiroTextContent { text }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results(value: serde_json::Value) -> Vec<ToolResult> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_converts_single_tool_result() {
        let result =
            convert_tool_results_to_kiro_format(&[ToolResult::new("call_123", "Result text")]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].tool_use_id, "call_123");
        assert_eq!(result[0].status, "success");
        assert_eq!(result[0].content.len(), 1);
        assert_eq!(result[0].content[0].text, "Result text");
    }

    #[test]
    fn test_converts_multiple_tool_results_in_order() {
        let input = vec![
            ToolResult::new("call_1", "Result 1"),
            ToolResult::new("call_2", "Result 2"),
            ToolResult::new("call_3", "Result 3"),
        ];

        let result = convert_tool_results_to_kiro_format(&input);

        let ids: Vec<&str> = result.iter().map(|r| r.tool_use_id.as_str()).collect();
        assert_eq!(ids, vec!["call_1", "call_2", "call_3"]);
        assert_eq!(result[2].content[0].text, "Result 3");
    }

    #[test]
    fn test_returns_empty_list_for_empty_input() {
        assert!(convert_tool_results_to_kiro_format(&[]).is_empty());
    }

    #[test]
    fn test_replaces_empty_null_and_missing_content() {
        let input = results(json!([
            {"type": "tool_result", "tool_use_id": "a", "content": ""},
            {"type": "tool_result", "tool_use_id": "b", "content": null},
            {"type": "tool_result", "tool_use_id": "c"},
            {"type": "tool_result", "tool_use_id": "d", "content": []}
        ]));

        for converted in convert_tool_results_to_kiro_format(&input) {
            assert_eq!(converted.content[0].text, EMPTY_RESULT_PLACEHOLDER);
        }
    }

    #[test]
    fn test_handles_missing_tool_use_id() {
        let input = results(json!([{"type": "tool_result", "content": "Result text"}]));

        let result = convert_tool_results_to_kiro_format(&input);

        assert_eq!(result[0].tool_use_id, "");
        assert_eq!(result[0].content[0].text, "Result text");
    }

    #[test]
    fn test_extracts_text_from_list_content() {
        let input = results(json!([{
            "type": "tool_result",
            "tool_use_id": "call_123",
            "content": [{"type": "text", "text": "Part 1"}, {"type": "text", "text": " Part 2"}]
        }]));

        let result = convert_tool_results_to_kiro_format(&input);

        assert_eq!(result[0].content[0].text, "Part 1 Part 2");
    }

    #[test]
    fn test_status_ignores_input_status() {
        let mut failed = ToolResult::new("call_1", "boom");
        failed.status = "error".to_string();

        let result = convert_tool_results_to_kiro_format(&[failed]);

        assert_eq!(result[0].status, "success");
    }

    #[test]
    fn test_preserves_long_and_unicode_content() {
        let long = "A".repeat(10_000);
        let unicode = "Привет мир! 你好世界! 🎉";
        let input = vec![ToolResult::new("a", long.as_str()), ToolResult::new("b", unicode)];

        let result = convert_tool_results_to_kiro_format(&input);

        assert_eq!(result[0].content[0].text, long);
        assert_eq!(result[1].content[0].text, unicode);
    }

    #[test]
    fn test_extracts_tool_results_from_list() {
        let content: Content = serde_json::from_value(json!([
            {"type": "tool_result", "tool_use_id": "call_1", "content": "Result 1"},
            {"type": "text", "text": "Some text"},
            {"type": "tool_result", "tool_use_id": "call_2", "content": "Result 2"}
        ]))
        .unwrap();

        let result = extract_tool_results_from_content(&content);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].tool_use_id, "call_1");
        assert_eq!(result[1].tool_use_id, "call_2");
        assert_eq!(result[1].status, "success");
    }

    #[test]
    fn test_returns_empty_for_string_content() {
        assert!(extract_tool_results_from_content(&Content::text("Just a string")).is_empty());
    }

    #[test]
    fn test_returns_empty_for_list_without_tool_results() {
        let content = Content::Parts(vec![ContentPart::text("Hello")]);
        assert!(extract_tool_results_from_content(&content).is_empty());
    }
}
