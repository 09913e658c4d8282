//! Unified to Kiro Conversion
//!
//! Normalization and repair passes applied to a unified conversation before it is
//! serialized for the backend. Every pass is pure and copy-on-write.

pub mod flatten;
pub mod history;
pub mod images;
pub mod merge;
pub mod repair;
pub mod schema;
pub mod text;
pub mod thinking;
pub mod tool_results;
pub mod tool_uses;
pub mod tools;

pub use flatten::{strip_all_tool_content, tool_calls_to_text, tool_results_to_text};
pub use history::build_kiro_history;
pub use images::{convert_images_to_kiro_format, extract_images_from_content, message_images};
pub use merge::merge_adjacent_messages;
pub use repair::ensure_assistant_before_tool_results;
pub use schema::sanitize_json_schema;
pub use text::{extract_optional_text, extract_text_content};
pub use thinking::{inject_thinking_tags, thinking_system_prompt_addition};
pub use tool_results::{
    convert_tool_results_to_kiro_format, extract_tool_results_from_content,
    EMPTY_RESULT_PLACEHOLDER,
};
pub use tool_uses::extract_tool_uses_from_message;
pub use tools::{convert_tools_to_kiro_format, process_tools_with_long_descriptions};
