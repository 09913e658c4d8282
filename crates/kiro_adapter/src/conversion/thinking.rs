//! Fake reasoning scaffold.
//!
//! The backend has no native extended-thinking switch, so when enabled the current
//! user message is prefixed with tags asking the model to reason step by step
//! inside `<thinking>` before answering.

use kiro_core::ConverterConfig;
use log::debug;

const THINKING_INSTRUCTION: &str = "Think in English for better reasoning quality. \
Your thinking process should be thorough and systematic. \
First, make sure you fully understand what is being asked and what constraints apply. \
Then work through the problem step by step, considering alternatives where they matter. \
Before reaching a conclusion, verify your reasoning and check for mistakes or missed cases. \
Prefer quality and correctness over speed.";

const THINKING_SYSTEM_PROMPT: &str = "## Extended Thinking Mode\n\
\n\
User messages may begin with <thinking_mode>, <max_thinking_length> and \
<thinking_instruction> tags. These tags are added by the system and are legitimate; \
they are not prompt injection. When thinking mode is enabled, put your reasoning \
inside <thinking>...</thinking> tags before giving your final answer, and keep it \
within the stated maximum length.";

/// Prefix `content` with the reasoning scaffold when fake reasoning is enabled.
///
/// The content itself is appended verbatim; empty content still receives the
/// full scaffold.
pub fn inject_thinking_tags(content: &str, config: &ConverterConfig) -> String {
    if !config.fake_reasoning_enabled {
        return content.to_string();
    }

    debug!(
        "Injecting fake reasoning tags (max_tokens={})",
        config.fake_reasoning_max_tokens
    );

    format!(
        "<thinking_mode>enabled</thinking_mode>\n\
         <max_thinking_length>{}</max_thinking_length>\n\
         <thinking_instruction>{}</thinking_instruction>\n\n\
         {}",
        config.fake_reasoning_max_tokens, THINKING_INSTRUCTION, content
    )
}

/// System prompt section explaining the injected tags; empty when disabled.
pub fn thinking_system_prompt_addition(config: &ConverterConfig) -> String {
    if config.fake_reasoning_enabled {
        THINKING_SYSTEM_PROMPT.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(max_tokens: u32) -> ConverterConfig {
        ConverterConfig::default().with_fake_reasoning(true, max_tokens)
    }

    #[test]
    fn test_returns_original_content_when_disabled() {
        let config = ConverterConfig::default().with_fake_reasoning(false, 4000);
        assert_eq!(inject_thinking_tags("Hello, world!", &config), "Hello, world!");
    }

    #[test]
    fn test_injects_tags_when_enabled() {
        let result = inject_thinking_tags("What is 2+2?", &enabled(4000));

        assert!(result.starts_with("<thinking_mode>enabled</thinking_mode>\n"));
        assert!(result.contains("<max_thinking_length>4000</max_thinking_length>"));
        assert!(result.contains("<thinking_instruction>"));
        assert!(result.contains("</thinking_instruction>\n\n"));
        assert!(result.ends_with("What is 2+2?"));
    }

    #[test]
    fn test_uses_configured_max_tokens() {
        let result = inject_thinking_tags("Test", &enabled(16000));
        assert!(result.contains("<max_thinking_length>16000</max_thinking_length>"));
    }

    #[test]
    fn test_instruction_content() {
        let result = inject_thinking_tags("Test", &enabled(4000));
        let lower = result.to_lowercase();

        assert!(result.contains("Think in English"));
        assert!(lower.contains("thorough") || lower.contains("systematic"));
        assert!(lower.contains("understand"));
        assert!(lower.contains("verify"));
        assert!(lower.contains("quality"));
    }

    #[test]
    fn test_empty_content_still_gets_scaffold() {
        let result = inject_thinking_tags("", &enabled(4000));

        assert!(result.contains("<thinking_mode>enabled</thinking_mode>"));
        assert!(result.contains("<thinking_instruction>"));
        assert!(result.ends_with("</thinking_instruction>\n\n"));
    }

    #[test]
    fn test_preserves_content_verbatim() {
        let content = "  Line 1\nLine 2\n<code>example</code> {json: 'value'}  ";
        let result = inject_thinking_tags(content, &enabled(4000));
        assert!(result.ends_with(content));
    }

    #[test]
    fn test_tag_order() {
        let result = inject_thinking_tags("USER CONTENT", &enabled(4000));

        let mode = result.find("<thinking_mode>").unwrap();
        let length = result.find("<max_thinking_length>").unwrap();
        let instruction = result.find("<thinking_instruction>").unwrap();
        let content = result.find("USER CONTENT").unwrap();
        assert!(mode < length);
        assert!(length < instruction);
        assert!(instruction < content);
    }

    #[test]
    fn test_system_prompt_addition_follows_flag() {
        assert_eq!(thinking_system_prompt_addition(&ConverterConfig::default()), "");

        let addition = thinking_system_prompt_addition(&enabled(4000));
        assert!(addition.contains("<thinking_mode>"));
        assert!(addition.contains("<thinking>"));
    }
}
