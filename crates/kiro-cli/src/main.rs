mod request;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kiro_adapter::{
    build_kiro_history, build_kiro_payload, convert_tools_to_kiro_format,
    ensure_assistant_before_tool_results, merge_adjacent_messages,
    process_tools_with_long_descriptions, ConversionRequest, HistoryTurn,
};
use kiro_core::{ConverterConfig, Role, UnifiedMessage};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::request::RequestDocument;

#[derive(Parser, Debug)]
#[command(name = "kiro-cli")]
#[command(about = "Convert unified chat requests into Kiro backend payloads")]
#[command(version)]
struct Cli {
    /// Config file (.json or .toml); defaults to ~/.kiro-converter/config.json or ./config.toml
    #[arg(long, global = true, env = "KIRO_CONVERTER_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Request document; `-` or absent reads stdin
    #[arg(long, short, global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the complete request body
    Payload {
        /// Model identifier (overrides the document's `model`)
        #[arg(long)]
        model: Option<String>,
        /// Conversation ID; a random UUID when absent
        #[arg(long)]
        conversation_id: Option<String>,
    },
    /// Merge, repair and convert the messages into history turns
    History {
        /// Model identifier (overrides the document's `model`)
        #[arg(long)]
        model: Option<String>,
    },
    /// Split long tool descriptions and convert tool definitions
    Tools,
}

#[derive(Serialize)]
struct ToolsOutput<T: Serialize> {
    tools: T,
    tool_documentation: String,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    match path {
        Some(path) => {
            let mut config = ConverterConfig::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => Ok(ConverterConfig::load()),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

/// System turns are dropped before merging, as in the full payload
fn history_turns(messages: &[UnifiedMessage], model_id: &str) -> (Vec<HistoryTurn>, bool) {
    let conversation: Vec<UnifiedMessage> = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .cloned()
        .collect();

    let merged = merge_adjacent_messages(&conversation);
    let (repaired, stripped) = ensure_assistant_before_tool_results(&merged);
    (build_kiro_history(&repaired, model_id), stripped)
}

fn run(cli: Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref())?;
    debug!("Converter config: {:?}", config);

    let document = RequestDocument::read(cli.input.as_deref())?;

    match cli.command {
        Commands::Payload {
            model,
            conversation_id,
        } => {
            let model_id = document.resolve_model(model.as_deref());
            let conversation_id = conversation_id.unwrap_or_else(|| Uuid::new_v4().to_string());

            let request = ConversionRequest {
                model_id,
                conversation_id,
                system_prompt: document.system,
                messages: document.messages,
                tools: document.tools,
            };

            let result =
                build_kiro_payload(&request, &config).context("Failed to build Kiro payload")?;
            if result.stripped_tool_results {
                info!("Orphaned tool results were removed from the conversation");
            }
            Ok(result.payload.to_json_string(cli.pretty)?)
        }
        Commands::History { model } => {
            let model_id = document.resolve_model(model.as_deref());

            let (history, stripped) = history_turns(&document.messages, &model_id);
            info!(
                "Built history from {} messages (stripped orphaned tool results: {})",
                document.messages.len(),
                stripped
            );

            to_json(&history, cli.pretty)
        }
        Commands::Tools => {
            let (tools, tool_documentation) =
                process_tools_with_long_descriptions(document.tools.as_deref(), &config);
            let output = ToolsOutput {
                tools: convert_tools_to_kiro_format(tools.as_deref()),
                tool_documentation,
            };
            to_json(&output, cli.pretty)
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let output = run(cli)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_payload_command() {
        let cli = Cli::try_parse_from([
            "kiro-cli",
            "--pretty",
            "payload",
            "--model",
            "claude-sonnet-4",
            "--conversation-id",
            "conv-1",
            "--input",
            "request.json",
        ])
        .unwrap();

        assert!(cli.pretty);
        assert_eq!(cli.input, Some(PathBuf::from("request.json")));
        match cli.command {
            Commands::Payload {
                model,
                conversation_id,
            } => {
                assert_eq!(model.as_deref(), Some("claude-sonnet-4"));
                assert_eq!(conversation_id.as_deref(), Some("conv-1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_tools_command_with_defaults() {
        let cli = Cli::try_parse_from(["kiro-cli", "tools"]).unwrap();

        assert!(!cli.pretty);
        assert!(cli.input.is_none());
        assert!(matches!(cli.command, Commands::Tools));
    }

    #[test]
    fn requires_subcommand() {
        assert!(Cli::try_parse_from(["kiro-cli"]).is_err());
    }

    #[test]
    fn to_json_respects_pretty_flag() {
        let value = serde_json::json!({"a": 1});

        assert_eq!(to_json(&value, false).unwrap(), r#"{"a":1}"#);
        assert_eq!(to_json(&value, true).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn history_drops_system_turns_before_merging() {
        let messages = vec![
            UnifiedMessage::user("a"),
            UnifiedMessage::system("s"),
            UnifiedMessage::user("b"),
        ];

        let (history, stripped) = history_turns(&messages, "model-x");

        assert!(!stripped);
        assert_eq!(
            serde_json::to_value(&history).unwrap(),
            serde_json::json!([{"userInputMessage": {"content": "a\nb", "modelId": "model-x"}}])
        );
    }
}
