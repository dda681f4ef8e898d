//! Prompt Preview - what the settings surface shows for the current rules

use crate::domain::entities::Rule;
use crate::domain::value_objects::ContentKind;

use super::composer::{build_image_prompt, build_text_prompt};
use super::filter::select_applicable;

/// Placeholder shown where page content would go
pub const PREVIEW_PLACEHOLDER: &str = "\n<CONTENT_HERE>\n";

/// Context length used for previews; the preview only needs a plausible size
pub const PREVIEW_CONTEXT_LENGTH: usize = 1024;

/// Text and image prompts as the inference backend would receive them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPreview {
    pub text_prompt: String,
    pub image_prompt: String,
}

impl PromptPreview {
    /// Compose both prompts from the last fetched rule list
    pub fn assemble(language: &str, rules: &[Rule]) -> Self {
        let text_rules = select_applicable(rules, ContentKind::Text);
        let image_rules = select_applicable(rules, ContentKind::Images);

        Self {
            text_prompt: build_text_prompt(
                language,
                text_rules.as_slice(),
                PREVIEW_PLACEHOLDER,
                PREVIEW_CONTEXT_LENGTH,
            )
            .trim()
            .to_string(),
            image_prompt: build_image_prompt(language, image_rules.as_slice())
                .trim()
                .to_string(),
        }
    }
}
