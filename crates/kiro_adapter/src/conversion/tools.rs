//! Tool definition processing.
//!
//! Long descriptions are moved into a documentation block for the system prompt so
//! they are not repeated inline on every request; the remaining definitions are
//! converted to backend tool specifications.

use kiro_core::{ConverterConfig, UnifiedTool};
use log::debug;

use super::schema::sanitize_json_schema;
use crate::models::{InputSchema, KiroTool, ToolSpecification};

const TOOL_DOCUMENTATION_HEADING: &str = "# Tool Documentation";

/// Move descriptions longer than `config.tool_description_max_length` characters
/// into a documentation string.
///
/// Each offloaded tool keeps a pointer to its `## Tool: {name}` section. Returns
/// `(None, "")` for an absent or empty list; a limit of 0 returns the tools
/// unchanged with no documentation.
pub fn process_tools_with_long_descriptions(
    tools: Option<&[UnifiedTool]>,
    config: &ConverterConfig,
) -> (Option<Vec<UnifiedTool>>, String) {
    let tools = match tools {
        Some(tools) if !tools.is_empty() => tools,
        _ => return (None, String::new()),
    };

    let limit = config.tool_description_max_length;
    if limit == 0 {
        return (Some(tools.to_vec()), String::new());
    }

    let mut sections = Vec::new();
    let processed = tools
        .iter()
        .map(|tool| {
            let description = tool.description.as_deref().unwrap_or_default();
            let length = description.chars().count();
            if length <= limit {
                return tool.clone();
            }

            debug!(
                "Tool '{}' has long description ({} chars > {}), moving to system prompt",
                tool.name, length, limit
            );
            sections.push(format!("## Tool: {}\n{}\n", tool.name, description));

            UnifiedTool {
                description: Some(reference_description(&tool.name)),
                ..tool.clone()
            }
        })
        .collect();

    let documentation = if sections.is_empty() {
        String::new()
    } else {
        format!("{}\n\n{}", TOOL_DOCUMENTATION_HEADING, sections.join("\n"))
    };

    (Some(processed), documentation)
}

/// Inline stand-in for an offloaded description
pub fn reference_description(tool_name: &str) -> String {
    format!("... [Full documentation in system prompt under '## Tool: {tool_name}']")
}

/// Convert unified tools to backend tool specifications with sanitized schemas.
///
/// Missing or empty descriptions become `Tool: {name}`; the backend rejects
/// empty ones.
pub fn convert_tools_to_kiro_format(tools: Option<&[UnifiedTool]>) -> Vec<KiroTool> {
    tools
        .unwrap_or_default()
        .iter()
        .map(|tool| {
            let description = match tool.description.as_deref() {
                Some(description) if !description.is_empty() => description.to_string(),
                _ => {
                    debug!("Tool '{}' has empty description, using placeholder", tool.name);
                    format!("Tool: {}", tool.name)
                }
            };

            KiroTool {
                tool_specification: ToolSpecification {
                    name: tool.name.clone(),
                    description,
                    input_schema: InputSchema {
                        json: sanitize_json_schema(&tool.input_schema),
                    },
                },
            }
        })
        .collect()
}
