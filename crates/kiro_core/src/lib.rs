//! kiro_core - Shared types for the Kiro conversion engine
//!
//! This crate provides the foundational types used by every conversion pass:
//! - `message` - the dialect-independent unified conversation model
//! - `config` - engine settings (description limit, reasoning injection)
//! - `paths` - well-known config file locations

pub mod config;
pub mod message;
pub mod paths;

// Re-export commonly used types
pub use config::{ConfigError, ConverterConfig};
pub use message::{
    Content, ContentBlock, ContentPart, FunctionCall, ImageSource, ImageUrl, Role, ToolCall,
    ToolResult, UnifiedImage, UnifiedMessage, UnifiedTool,
};
