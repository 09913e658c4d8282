//! Input document read by every subcommand.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use kiro_core::{UnifiedMessage, UnifiedTool};
use serde::Deserialize;

pub const DEFAULT_MODEL: &str = "auto";

/// `{"model"?, "system"?, "messages", "tools"?}`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RequestDocument {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub messages: Vec<UnifiedMessage>,
    #[serde(default)]
    pub tools: Option<Vec<UnifiedTool>>,
}

impl RequestDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse request document")
    }

    /// Read from a file, or stdin when `path` is absent or `-`
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let text = match path {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read request from stdin")?;
                text
            }
        };
        Self::from_json(&text)
    }

    /// Model from the command line, else from the document, else `auto`
    pub fn resolve_model(&self, override_model: Option<&str>) -> String {
        override_model
            .or(self.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
            .to_string()
    }
}
