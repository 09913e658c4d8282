//! Kiro API Models
//!
//! Request types for the Kiro backend. Key names and nesting are a fixed wire
//! contract; optional keys are omitted rather than sent as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConversionResult;

/// Status reported for every tool result
pub const TOOL_RESULT_STATUS_SUCCESS: &str = "success";

/// One turn of conversation history
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum HistoryTurn {
    UserInputMessage(UserInputMessage),
    AssistantResponseMessage(AssistantResponseMessage),
}

impl HistoryTurn {
    pub fn as_user(&self) -> Option<&UserInputMessage> {
        match self {
            Self::UserInputMessage(message) => Some(message),
            Self::AssistantResponseMessage(_) => None,
        }
    }

    pub fn as_assistant(&self) -> Option<&AssistantResponseMessage> {
        match self {
            Self::UserInputMessage(_) => None,
            Self::AssistantResponseMessage(message) => Some(message),
        }
    }
}

/// User turn
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInputMessage {
    pub content: String,
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<KiroImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input_message_context: Option<UserInputMessageContext>,
}

impl UserInputMessage {
    pub fn new(content: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model_id: model_id.into(),
            origin: None,
            images: None,
            user_input_message_context: None,
        }
    }
}

/// Tool results (and, on the current message, tool definitions) attached to a user turn
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserInputMessageContext {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_results: Vec<KiroToolResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<KiroTool>,
}

impl UserInputMessageContext {
    pub fn is_empty(&self) -> bool {
        self.tool_results.is_empty() && self.tools.is_empty()
    }
}

/// Assistant turn
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponseMessage {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_uses: Option<Vec<KiroToolUse>>,
}

/// Tool result in backend form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KiroToolResult {
    pub tool_use_id: String,
    pub status: String,
    pub content: Vec<KiroTextContent>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KiroTextContent {
    pub text: String,
}

/// Tool invocation in backend form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KiroToolUse {
    pub tool_use_id: String,
    pub name: String,
    pub input: Value,
}

/// Tool definition in backend form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KiroTool {
    pub tool_specification: ToolSpecification,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpecification {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InputSchema {
    pub json: Value,
}

/// Inline image in backend form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KiroImage {
    pub format: String,
    pub source: KiroImageSource,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KiroImageSource {
    pub bytes: String,
}

/// Complete generateAssistantResponse request body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KiroPayload {
    pub conversation_state: ConversationState,
}

impl KiroPayload {
    pub fn to_json(&self) -> ConversionResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self, pretty: bool) -> ConversionResult<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub chat_trigger_type: String,
    pub conversation_id: String,
    pub current_message: CurrentMessage,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryTurn>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMessage {
    pub user_input_message: UserInputMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_turn_omits_optional_keys() {
        let turn = HistoryTurn::UserInputMessage(UserInputMessage::new("Hello", "model-x"));
        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            json!({"userInputMessage": {"content": "Hello", "modelId": "model-x"}})
        );
    }

    #[test]
    fn test_assistant_turn_wire_shape() {
        let turn = HistoryTurn::AssistantResponseMessage(AssistantResponseMessage {
            content: "ok".to_string(),
            tool_uses: Some(vec![KiroToolUse {
                tool_use_id: "t1".to_string(),
                name: "shell".to_string(),
                input: json!({"command": "ls"}),
            }]),
        });

        assert_eq!(
            serde_json::to_value(&turn).unwrap(),
            json!({
                "assistantResponseMessage": {
                    "content": "ok",
                    "toolUses": [{"toolUseId": "t1", "name": "shell", "input": {"command": "ls"}}]
                }
            })
        );
    }

    #[test]
    fn test_tool_wire_shape() {
        let tool = KiroTool {
            tool_specification: ToolSpecification {
                name: "echo".to_string(),
                description: "Echo input".to_string(),
                input_schema: InputSchema {
                    json: json!({"type": "object"}),
                },
            },
        };

        assert_eq!(
            serde_json::to_value(&tool).unwrap(),
            json!({
                "toolSpecification": {
                    "name": "echo",
                    "description": "Echo input",
                    "inputSchema": {"json": {"type": "object"}}
                }
            })
        );
    }

    #[test]
    fn test_context_skips_empty_lists() {
        let context = UserInputMessageContext::default();
        assert!(context.is_empty());
        assert_eq!(serde_json::to_value(&context).unwrap(), json!({}));
    }
}
