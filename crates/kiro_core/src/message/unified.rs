//! Unified message and tool types
//!
//! The dialect-independent representation produced by the OpenAI and Anthropic
//! decoders. Tool calls appear on assistant turns and tool results on user turns by
//! convention; nothing here rejects other combinations.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::Content;

/// Conversation role
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Tool invocation issued by the assistant (OpenAI `tool_calls` shape)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

/// Function name plus raw JSON argument text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: function_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn arguments(&self) -> &str {
        &self.function.arguments
    }
}

/// Result of a tool invocation, sent back on a user turn
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolResult {
    #[serde(rename = "type", default = "tool_result_type")]
    pub result_type: String,
    #[serde(default)]
    pub tool_use_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default = "success_status")]
    pub status: String,
}

impl ToolResult {
    pub fn new(tool_use_id: impl Into<String>, content: impl Into<Content>) -> Self {
        Self {
            result_type: tool_result_type(),
            tool_use_id: tool_use_id.into(),
            content: Some(content.into()),
            status: success_status(),
        }
    }

    /// A result whose content field was never sent
    pub fn without_content(tool_use_id: impl Into<String>) -> Self {
        Self {
            content: None,
            ..Self::new(tool_use_id, "")
        }
    }
}

/// Decoded inline image
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UnifiedImage {
    pub media_type: String,
    pub data: String,
}

/// One conversation turn
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UnifiedMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Content,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_results: Option<Vec<ToolResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<UnifiedImage>>,
}

impl UnifiedMessage {
    pub fn new(role: Role, content: impl Into<Content>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: None,
            tool_results: None,
            images: None,
        }
    }

    pub fn system(content: impl Into<Content>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<Content>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<Content>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }

    pub fn with_tool_results(mut self, tool_results: Vec<ToolResult>) -> Self {
        self.tool_results = Some(tool_results);
        self
    }

    pub fn with_images(mut self, images: Vec<UnifiedImage>) -> Self {
        self.images = Some(images);
        self
    }

    /// True when tool_calls is present and non-empty
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls.as_ref().is_some_and(|calls| !calls.is_empty())
    }

    /// True when tool_results is present and non-empty
    pub fn has_tool_results(&self) -> bool {
        self.tool_results
            .as_ref()
            .is_some_and(|results| !results.is_empty())
    }
}

/// Tool definition offered to the model
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UnifiedTool {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "empty_schema")]
    pub input_schema: Value,
}

impl UnifiedTool {
    pub fn new(name: impl Into<String>, description: Option<&str>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
            input_schema,
        }
    }
}

fn function_type() -> String {
    "function".to_string()
}

fn tool_result_type() -> String {
    "tool_result".to_string()
}

fn success_status() -> String {
    "success".to_string()
}

fn empty_schema() -> Value {
    Value::Object(Map::new())
}
