//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use tagsmith::{AppliesTo, ContentKind};

use crate::models::{
    // Rule models
    CreateRuleRequest,
    // Prompt models
    PreviewResponse,
    PromptRequest,
    PromptResponse,
    RuleResponse,
    UpdateRuleRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health_check,
        // Rule endpoints
        super::rule::list_rules,
        super::rule::create_rule,
        super::rule::update_rule,
        super::rule::delete_rule,
        // Prompt endpoints
        super::prompt::preview_prompts,
        super::prompt::compose_prompt,
    ),
    info(
        title = "Tagsmith API",
        version = "0.1.0",
        description = "Tagging rules and prompt composition for automatic content tagging.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Rule", description = "Rule - Custom tagging rule management"),
        (name = "Prompt", description = "Prompt - Preview and compose tagging prompts"),
    ),
    components(
        schemas(
            super::HealthCheck,
            // Rule
            AppliesTo,
            CreateRuleRequest,
            UpdateRuleRequest,
            RuleResponse,
            // Prompt
            ContentKind,
            PreviewResponse,
            PromptRequest,
            PromptResponse,
        )
    ),
)]
pub struct ApiDoc;
