//! Message module - Unified conversation model
//!
//! Client dialect decoders produce these types; every conversion pass consumes them.

mod content;
mod unified;

pub use content::{Content, ContentBlock, ContentPart, ImageSource, ImageUrl};
pub use unified::{
    FunctionCall, Role, ToolCall, ToolResult, UnifiedImage, UnifiedMessage, UnifiedTool,
};
