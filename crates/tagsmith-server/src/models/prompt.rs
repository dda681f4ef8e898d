//! Prompt Composition Models
//!
//! Preview for the settings surface and composed prompts for the
//! inference backend.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use tagsmith::ContentKind;

/// Query parameters for the preview endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct PreviewQuery {
    /// Tag language (defaults to the server's INFERRED_TAG_LANG)
    pub lang: Option<String>,
}

/// Preview of both prompts built from the stored rules
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreviewResponse {
    pub text_prompt: String,
    pub image_prompt: String,
}

/// Compose request from the inference side
#[derive(Debug, Deserialize, ToSchema)]
pub struct PromptRequest {
    pub kind: ContentKind,
    /// Tag language (defaults to the server's INFERRED_TAG_LANG)
    pub lang: Option<String>,
    /// Content to substitute into a text prompt; left as a placeholder if absent
    pub content: Option<String>,
    /// Context length override, in tokens
    pub context_length: Option<usize>,
}

/// Composed prompt
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromptResponse {
    pub prompt: String,
    pub included_rules: usize,
    pub omitted_rules: usize,
    /// Tokens left for content (text prompts only)
    pub content_budget: Option<usize>,
}
