//! Conversation history assembly.

use kiro_core::{Role, UnifiedMessage};

use super::images::message_images;
use super::text::extract_text_content;
use super::tool_results::convert_tool_results_to_kiro_format;
use super::tool_uses::extract_tool_uses_from_message;
use crate::models::{
    AssistantResponseMessage, HistoryTurn, UserInputMessage, UserInputMessageContext,
};

/// Build backend history turns from merged and repaired messages.
///
/// System turns produce no record. A user turn carries a context only when it has
/// tool_results, and images only when it has any; an assistant turn carries
/// `toolUses` only when non-empty. No further validation is done.
pub fn build_kiro_history(messages: &[UnifiedMessage], model_id: &str) -> Vec<HistoryTurn> {
    messages
        .iter()
        .filter_map(|message| match message.role {
            Role::System => None,
            Role::User => Some(HistoryTurn::UserInputMessage(user_turn(message, model_id))),
            Role::Assistant => Some(HistoryTurn::AssistantResponseMessage(assistant_turn(
                message,
            ))),
        })
        .collect()
}

fn user_turn(message: &UnifiedMessage, model_id: &str) -> UserInputMessage {
    let mut turn = UserInputMessage::new(extract_text_content(&message.content), model_id);

    let images = message_images(&message.content, message.images.as_deref());
    if !images.is_empty() {
        turn.images = Some(images);
    }

    if let Some(tool_results) = message.tool_results.as_deref().filter(|r| !r.is_empty()) {
        turn.user_input_message_context = Some(UserInputMessageContext {
            tool_results: convert_tool_results_to_kiro_format(tool_results),
            ..Default::default()
        });
    }

    turn
}

fn assistant_turn(message: &UnifiedMessage) -> AssistantResponseMessage {
    let tool_uses =
        extract_tool_uses_from_message(&message.content, message.tool_calls.as_deref());

    AssistantResponseMessage {
        content: extract_text_content(&message.content),
        tool_uses: if tool_uses.is_empty() {
            None
        } else {
            Some(tool_uses)
        },
    }
}
