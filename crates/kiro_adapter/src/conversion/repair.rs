//! Orphaned tool result repair.
//!
//! Clients such as Cline and Roo truncate long histories and can send a user turn
//! whose tool results answer an assistant turn that is no longer present. The
//! backend rejects those with "Improperly formed request", and the original tool
//! name cannot be recovered, so the results are dropped here.

use kiro_core::{Role, UnifiedMessage};
use log::warn;

/// Strip tool_results from every turn not directly preceded by an assistant turn
/// with at least one tool call.
///
/// Only the immediately preceding turn is inspected and tool IDs are not matched.
/// Text content and the turn's own tool_calls are kept. Returns the repaired
/// sequence and whether anything was stripped.
pub fn ensure_assistant_before_tool_results(
    messages: &[UnifiedMessage],
) -> (Vec<UnifiedMessage>, bool) {
    let mut result = Vec::with_capacity(messages.len());
    let mut stripped_any = false;

    for (index, message) in messages.iter().enumerate() {
        let previous = index.checked_sub(1).map(|i| &messages[i]);
        let has_valid_predecessor = previous
            .is_some_and(|prev| prev.role == Role::Assistant && prev.has_tool_calls());

        if message.has_tool_results() && !has_valid_predecessor {
            let tool_results = message.tool_results.as_deref().unwrap_or_default();
            let tool_ids: Vec<&str> = tool_results
                .iter()
                .map(|r| r.tool_use_id.as_str())
                .collect();
            warn!(
                "Stripping {} orphaned tool_results from message {} \
                 (no preceding assistant message with tool_calls). Tool IDs: {:?}",
                tool_results.len(),
                index,
                tool_ids
            );

            result.push(UnifiedMessage {
                tool_results: None,
                ..message.clone()
            });
            stripped_any = true;
        } else {
            result.push(message.clone());
        }
    }

    (result, stripped_any)
}
