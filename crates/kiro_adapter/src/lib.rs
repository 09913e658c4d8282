//! Kiro API Adapter
//!
//! Converts unified chat conversations into Kiro `generateAssistantResponse`
//! request bodies. Conversations are merged, repaired and sanitized first so that
//! truncated or loosely formed client histories are still accepted by the backend.

pub mod conversion;
pub mod error;
pub mod models;
pub mod payload;

pub use error::{ConversionError, ConversionResult};

// Re-export from models
pub use models::{
    AssistantResponseMessage, ConversationState, CurrentMessage, HistoryTurn, InputSchema,
    KiroImage, KiroImageSource, KiroPayload, KiroTextContent, KiroTool, KiroToolResult,
    KiroToolUse, ToolSpecification, UserInputMessage, UserInputMessageContext,
};

// Re-export from conversion
pub use conversion::{
    build_kiro_history, convert_images_to_kiro_format, convert_tool_results_to_kiro_format,
    convert_tools_to_kiro_format, ensure_assistant_before_tool_results,
    extract_images_from_content, extract_text_content, extract_tool_results_from_content,
    extract_tool_uses_from_message, inject_thinking_tags, merge_adjacent_messages,
    process_tools_with_long_descriptions, sanitize_json_schema, strip_all_tool_content,
    thinking_system_prompt_addition, tool_calls_to_text, tool_results_to_text,
};

pub use payload::{build_kiro_payload, ConversionRequest, KiroPayloadResult};
