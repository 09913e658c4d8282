//! Coalescing of adjacent same-role turns.
//!
//! The backend expects strictly alternating turns. Clients frequently send runs of
//! user or assistant messages (one per tool call, one per attachment); each run is
//! folded into a single message without dropping any tool call or tool result.

use kiro_core::{Content, UnifiedMessage};
use log::debug;

use super::images::resolve_images;
use super::text::extract_text_content;

/// Merge maximal runs of consecutive messages sharing a role.
///
/// Text joins with a newline; when either side is a part list the result is the
/// concatenation of both part lists. tool_calls and tool_results concatenate in
/// encounter order. Once either side carries an `images` list, each side
/// contributes its resolved images (the list, else images found in its content).
/// Input is left untouched.
pub fn merge_adjacent_messages(messages: &[UnifiedMessage]) -> Vec<UnifiedMessage> {
    let mut merged: Vec<UnifiedMessage> = Vec::with_capacity(messages.len());
    let mut merge_count = 0usize;

    for message in messages {
        match merged.last_mut() {
            Some(last) if last.role == message.role => {
                merge_into(last, message.clone());
                merge_count += 1;
            }
            _ => merged.push(message.clone()),
        }
    }

    if merge_count > 0 {
        debug!(
            "Merged {} adjacent messages ({} -> {})",
            merge_count,
            messages.len(),
            merged.len()
        );
    }

    merged
}

fn merge_into(target: &mut UnifiedMessage, next: UnifiedMessage) {
    if has_images(target) || has_images(&next) {
        let mut images = resolve_images(&target.content, target.images.as_deref());
        images.extend(resolve_images(&next.content, next.images.as_deref()));
        target.images = Some(images);
    } else {
        append_optional(&mut target.images, next.images);
    }

    target.content = merge_content(std::mem::take(&mut target.content), next.content);
    append_optional(&mut target.tool_calls, next.tool_calls);
    append_optional(&mut target.tool_results, next.tool_results);
}

fn has_images(message: &UnifiedMessage) -> bool {
    message.images.as_ref().is_some_and(|images| !images.is_empty())
}

fn merge_content(left: Content, right: Content) -> Content {
    match (left, right) {
        (Content::Parts(mut parts), right) => {
            parts.extend(right.into_parts());
            Content::Parts(parts)
        }
        (left, Content::Parts(right)) => {
            let mut parts = left.into_parts();
            parts.extend(right);
            Content::Parts(parts)
        }
        (left, right) => {
            let left = extract_text_content(&left);
            let right = extract_text_content(&right);
            let text = match (left.is_empty(), right.is_empty()) {
                (_, true) => left,
                (true, false) => right,
                (false, false) => format!("{left}\n{right}"),
            };
            Content::Text(text)
        }
    }
}

fn append_optional<T>(target: &mut Option<Vec<T>>, next: Option<Vec<T>>) {
    if let Some(items) = next {
        target.get_or_insert_with(Vec::new).extend(items);
    }
}
