//! Request payload assembly.
//!
//! Runs the conversion passes in order and produces the complete
//! `conversationState` body for the backend.

use kiro_core::{ConverterConfig, Role, UnifiedMessage, UnifiedTool};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::conversion::{
    build_kiro_history, convert_tool_results_to_kiro_format, convert_tools_to_kiro_format,
    ensure_assistant_before_tool_results, extract_text_content, extract_tool_results_from_content,
    inject_thinking_tags, merge_adjacent_messages, message_images,
    process_tools_with_long_descriptions, strip_all_tool_content, thinking_system_prompt_addition,
};
use crate::error::{ConversionError, ConversionResult};
use crate::models::{
    ConversationState, CurrentMessage, HistoryTurn, KiroPayload, UserInputMessage,
    UserInputMessageContext,
};

pub const CHAT_TRIGGER_TYPE_MANUAL: &str = "MANUAL";
pub const ORIGIN_AI_EDITOR: &str = "AI_EDITOR";

const CONTINUE_PROMPT: &str = "Continue";
const EMPTY_CONTENT_PLACEHOLDER: &str = "(empty)";

/// Everything needed to build one backend request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub model_id: String,
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub messages: Vec<UnifiedMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<UnifiedTool>>,
}

impl ConversionRequest {
    pub fn new(
        model_id: impl Into<String>,
        conversation_id: impl Into<String>,
        messages: Vec<UnifiedMessage>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            conversation_id: conversation_id.into(),
            system_prompt: None,
            messages,
            tools: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<UnifiedTool>) -> Self {
        self.tools = Some(tools);
        self
    }
}

/// Built payload plus what callers may want to log or reuse
#[derive(Debug, Clone, PartialEq)]
pub struct KiroPayloadResult {
    pub payload: KiroPayload,
    /// Documentation offloaded from long tool descriptions; already part of the
    /// system text inside `payload`
    pub tool_documentation: String,
    /// Whether orphaned tool results were dropped
    pub stripped_tool_results: bool,
}

/// Build a complete backend request from a unified conversation.
///
/// Fails only when the conversation has no user or assistant message.
pub fn build_kiro_payload(
    request: &ConversionRequest,
    config: &ConverterConfig,
) -> ConversionResult<KiroPayloadResult> {
    let (tools, tool_documentation) =
        process_tools_with_long_descriptions(request.tools.as_deref(), config);
    let has_tools = tools.as_ref().is_some_and(|t| !t.is_empty());

    let (system_messages, messages): (Vec<UnifiedMessage>, Vec<UnifiedMessage>) = request
        .messages
        .iter()
        .cloned()
        .partition(|m| m.role == Role::System);

    let messages = if has_tools {
        messages
    } else {
        strip_all_tool_content(&messages).0
    };
    let merged = merge_adjacent_messages(&messages);
    let (mut messages, stripped_tool_results) = ensure_assistant_before_tool_results(&merged);

    let system_text = build_system_text(
        request.system_prompt.as_deref(),
        &system_messages,
        &tool_documentation,
        config,
    );

    let last = messages.pop().ok_or(ConversionError::EmptyConversation)?;
    let current = if last.role == Role::Assistant {
        debug!("Last message is from assistant, sending '{}' as current message", CONTINUE_PROMPT);
        messages.push(last);
        UnifiedMessage::user(CONTINUE_PROMPT)
    } else {
        last
    };

    let mut history = build_kiro_history(&messages, &request.model_id);

    let mut content = extract_text_content(&current.content);
    if !system_text.is_empty() && !prepend_to_first_user_turn(&mut history, &system_text) {
        content = prepend_system_text(&system_text, &content);
    }
    if content.is_empty() {
        content = EMPTY_CONTENT_PLACEHOLDER.to_string();
    }
    let content = inject_thinking_tags(&content, config);

    let mut user_input = UserInputMessage::new(content, request.model_id.clone());
    user_input.origin = Some(ORIGIN_AI_EDITOR.to_string());

    let images = message_images(&current.content, current.images.as_deref());
    if !images.is_empty() {
        user_input.images = Some(images);
    }

    let tool_results = match current.tool_results.as_deref() {
        Some(results) if !results.is_empty() => convert_tool_results_to_kiro_format(results),
        _ => extract_tool_results_from_content(&current.content),
    };
    let context = UserInputMessageContext {
        tool_results,
        tools: convert_tools_to_kiro_format(tools.as_deref()),
    };
    if !context.is_empty() {
        user_input.user_input_message_context = Some(context);
    }

    info!(
        "Built Kiro payload: model={}, history={}, tools={}",
        request.model_id,
        history.len(),
        tools.as_ref().map_or(0, Vec::len)
    );

    Ok(KiroPayloadResult {
        payload: KiroPayload {
            conversation_state: ConversationState {
                chat_trigger_type: CHAT_TRIGGER_TYPE_MANUAL.to_string(),
                conversation_id: request.conversation_id.clone(),
                current_message: CurrentMessage {
                    user_input_message: user_input,
                },
                history,
            },
        },
        tool_documentation,
        stripped_tool_results,
    })
}

fn build_system_text(
    system_prompt: Option<&str>,
    system_messages: &[UnifiedMessage],
    tool_documentation: &str,
    config: &ConverterConfig,
) -> String {
    let mut sections: Vec<String> = Vec::new();
    sections.extend(system_prompt.map(str::to_string));
    sections.extend(
        system_messages
            .iter()
            .map(|message| extract_text_content(&message.content)),
    );
    sections.push(tool_documentation.to_string());
    sections.push(thinking_system_prompt_addition(config));

    sections.retain(|section| !section.is_empty());
    sections.join("\n\n")
}

fn prepend_to_first_user_turn(history: &mut [HistoryTurn], system_text: &str) -> bool {
    let first_user = history.iter_mut().find_map(|turn| match turn {
        HistoryTurn::UserInputMessage(message) => Some(message),
        HistoryTurn::AssistantResponseMessage(_) => None,
    });

    match first_user {
        Some(message) => {
            message.content = prepend_system_text(system_text, &message.content);
            true
        }
        None => false,
    }
}

fn prepend_system_text(system_text: &str, content: &str) -> String {
    if content.is_empty() {
        system_text.to_string()
    } else {
        format!("{system_text}\n\n{content}")
    }
}
