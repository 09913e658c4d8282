use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::config_json_path;

pub const DEFAULT_TOOL_DESCRIPTION_MAX_LENGTH: usize = 10_000;
pub const DEFAULT_FAKE_REASONING_MAX_TOKENS: u32 = 4_000;

pub const ENV_TOOL_DESCRIPTION_MAX_LENGTH: &str = "TOOL_DESCRIPTION_MAX_LENGTH";
pub const ENV_FAKE_REASONING: &str = "FAKE_REASONING";
pub const ENV_FAKE_REASONING_MAX_TOKENS: &str = "FAKE_REASONING_MAX_TOKENS";

const CONFIG_FILE_PATH: &str = "config.toml";

/// Settings read by the conversion passes.
///
/// Built once at startup and passed by reference into the pipeline; passes never
/// consult the environment themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Tool descriptions longer than this many characters are moved into the
    /// system prompt. `0` disables the split.
    pub tool_description_max_length: usize,
    /// Prepend the reasoning scaffold to the outgoing user message
    pub fake_reasoning_enabled: bool,
    /// Token budget announced in the scaffold
    pub fake_reasoning_max_tokens: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            tool_description_max_length: DEFAULT_TOOL_DESCRIPTION_MAX_LENGTH,
            fake_reasoning_enabled: false,
            fake_reasoning_max_tokens: DEFAULT_FAKE_REASONING_MAX_TOKENS,
        }
    }
}

impl ConverterConfig {
    /// Load from ~/.kiro-converter/config.json, else ./config.toml, then apply
    /// environment overrides. Unreadable files fall back to defaults.
    pub fn load() -> Self {
        let mut config = Self::default();

        let mut loaded = false;
        let json_path = config_json_path();
        if json_path.exists() {
            match Self::load_from_path(&json_path) {
                Ok(file_config) => {
                    config = file_config;
                    loaded = true;
                }
                Err(err) => warn!("Ignoring {}: {}", json_path.display(), err),
            }
        }

        if !loaded && Path::new(CONFIG_FILE_PATH).exists() {
            match Self::load_from_path(Path::new(CONFIG_FILE_PATH)) {
                Ok(file_config) => config = file_config,
                Err(err) => warn!("Ignoring {}: {}", CONFIG_FILE_PATH, err),
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load a single JSON or TOML file, chosen by extension
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`).
    ///
    /// Values that do not parse are skipped with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_TOOL_DESCRIPTION_MAX_LENGTH) {
            match value.trim().parse::<usize>() {
                Ok(limit) => self.tool_description_max_length = limit,
                Err(_) => warn!(
                    "Ignoring {}={:?}: not a non-negative integer",
                    ENV_TOOL_DESCRIPTION_MAX_LENGTH, value
                ),
            }
        }
        if let Some(value) = lookup(ENV_FAKE_REASONING) {
            self.fake_reasoning_enabled = parse_bool_env(&value);
        }
        if let Some(value) = lookup(ENV_FAKE_REASONING_MAX_TOKENS) {
            match value.trim().parse::<u32>() {
                Ok(tokens) => self.fake_reasoning_max_tokens = tokens,
                Err(_) => warn!(
                    "Ignoring {}={:?}: not a non-negative integer",
                    ENV_FAKE_REASONING_MAX_TOKENS, value
                ),
            }
        }
    }

    pub fn with_tool_description_max_length(mut self, limit: usize) -> Self {
        self.tool_description_max_length = limit;
        self
    }

    pub fn with_fake_reasoning(mut self, enabled: bool, max_tokens: u32) -> Self {
        self.fake_reasoning_enabled = enabled;
        self.fake_reasoning_max_tokens = max_tokens;
        self
    }
}
