//! Error types for payload assembly.
//!
//! The individual conversion passes never fail; only building a complete
//! request can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Conversation has no user or assistant message to send")]
    EmptyConversation,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ConversionResult<T> = Result<T, ConversionError>;
