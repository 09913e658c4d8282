//! Content - Text-or-parts message content
//!
//! Client dialects send content either as a plain string or as an ordered list of
//! parts. Parts are plain strings, typed blocks (text, tool_use, tool_result, image),
//! or arbitrary objects the engine only reads a `text` field from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message content: a plain string, an ordered part list, or any other JSON scalar.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Content {
    /// Plain text
    Text(String),

    /// Ordered sequence of parts
    Parts(Vec<ContentPart>),

    /// Anything else a client sent (numbers, booleans, objects, null)
    Scalar(Value),
}

impl Default for Content {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Content {
    /// Create plain text content
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the part list if this content is one
    pub fn parts(&self) -> Option<&[ContentPart]> {
        match self {
            Self::Parts(parts) => Some(parts),
            _ => None,
        }
    }

    /// Converts this content into a part list.
    ///
    /// Plain text becomes a single text block; empty text and null produce no parts.
    /// A list that did not decode as parts keeps its strings and objects, one part
    /// each, and drops the other entries. Other scalars are stringified into a text
    /// block.
    pub fn into_parts(self) -> Vec<ContentPart> {
        match self {
            Self::Parts(parts) => parts,
            Self::Text(text) if text.is_empty() => Vec::new(),
            Self::Text(text) => vec![ContentPart::text(text)],
            Self::Scalar(Value::Null) => Vec::new(),
            Self::Scalar(Value::Array(items)) => items.into_iter().filter_map(loose_part).collect(),
            Self::Scalar(value) => vec![ContentPart::text(value.to_string())],
        }
    }
}

fn loose_part(item: Value) -> Option<ContentPart> {
    match item {
        Value::String(text) => Some(ContentPart::Raw(text)),
        Value::Object(object) => Some(
            serde_json::from_value(Value::Object(object.clone()))
                .map(ContentPart::Block)
                .unwrap_or(ContentPart::Other(object)),
        ),
        _ => None,
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<ContentPart>> for Content {
    fn from(parts: Vec<ContentPart>) -> Self {
        Self::Parts(parts)
    }
}

/// A single entry of a part list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ContentPart {
    /// Bare string part
    Raw(String),

    /// Typed block recognised by the engine
    Block(ContentBlock),

    /// Object of a kind the engine does not model
    Other(Map<String, Value>),
}

impl ContentPart {
    /// Create a text block part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Block(ContentBlock::Text { text: text.into() })
    }

    /// Create a tool_use block part
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self::Block(ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        })
    }

    /// Create a tool_result block part
    pub fn tool_result(tool_use_id: impl Into<String>, content: Option<Content>) -> Self {
        Self::Block(ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content,
        })
    }

    /// Text carried by this part, if any.
    ///
    /// Tool and image blocks never contribute text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Raw(text) => Some(text),
            Self::Block(ContentBlock::Text { text }) => Some(text),
            Self::Block(_) => None,
            Self::Other(object) => object.get("text").and_then(Value::as_str),
        }
    }
}

/// Typed content block, discriminated by its `type` field
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default = "empty_object")]
        input: Value,
    },
    ToolResult {
        #[serde(default)]
        tool_use_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Content>,
    },
    Image {
        source: ImageSource,
    },
    ImageUrl {
        image_url: ImageUrl,
    },
}

/// Image source (base64 or URL)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    /// Base64 encoded image data
    Base64 {
        #[serde(default)]
        media_type: Option<String>,
        data: String,
    },
    /// URL to the image
    Url { url: String },
}

/// OpenAI-style image reference; usually a `data:` URL
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
