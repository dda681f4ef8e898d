//! Prompt Routes - Compose tagging prompts from the stored rules
//!
//! The preview mirrors what the settings surface renders; the compose
//! endpoint is what an inference worker calls before tagging content.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use tagsmith::{
    build_image_prompt, compose_text_prompt, select_applicable, ContentKind, PromptPreview,
};

use super::rule::error_response;
use crate::models::{PreviewQuery, PreviewResponse, PromptRequest, PromptResponse};
use crate::AppState;

/// Marker left in text prompts composed without content
const CONTENT_PLACEHOLDER: &str = "<CONTENT_HERE>";

/// Preview text and image prompts
///
/// GET /tagsmith/preview?lang=english
#[utoipa::path(
    get,
    path = "/tagsmith/preview",
    params(PreviewQuery),
    responses(
        (status = 200, description = "Prompt preview", body = PreviewResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Prompt"
)]
pub async fn preview_prompts(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<PreviewResponse>, (StatusCode, String)> {
    let rules = state
        .rule_service
        .list_all()
        .await
        .map_err(error_response)?;

    let lang = query
        .lang
        .as_deref()
        .unwrap_or(&state.inference.inferred_tag_lang);
    let preview = PromptPreview::assemble(lang, &rules);

    Ok(Json(PreviewResponse {
        text_prompt: preview.text_prompt,
        image_prompt: preview.image_prompt,
    }))
}

/// Compose the prompt for one content kind
///
/// POST /tagsmith/prompt
#[utoipa::path(
    post,
    path = "/tagsmith/prompt",
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Composed prompt", body = PromptResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Prompt"
)]
pub async fn compose_prompt(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, (StatusCode, String)> {
    let rules = state
        .rule_service
        .list_all()
        .await
        .map_err(error_response)?;

    let lang = request
        .lang
        .as_deref()
        .unwrap_or(&state.inference.inferred_tag_lang);
    let texts = select_applicable(&rules, request.kind);

    let response = match request.kind {
        ContentKind::Text => {
            let context_length = request
                .context_length
                .unwrap_or(state.inference.context_length);
            let composed = compose_text_prompt(
                lang,
                texts.as_slice(),
                CONTENT_PLACEHOLDER,
                context_length,
            );

            if composed.omitted_rules > 0 {
                tracing::warn!(
                    "Omitted {} of {} text rules to fit context length {}",
                    composed.omitted_rules,
                    texts.len(),
                    context_length
                );
            }

            PromptResponse {
                prompt: match request.content.as_deref() {
                    Some(content) => composed.fill(content),
                    None => composed.prompt.clone(),
                },
                included_rules: composed.included_rules,
                omitted_rules: composed.omitted_rules,
                content_budget: Some(composed.content_budget),
            }
        }
        ContentKind::Images => PromptResponse {
            prompt: build_image_prompt(lang, texts.as_slice()),
            included_rules: texts.len(),
            omitted_rules: 0,
            content_budget: None,
        },
    };

    tracing::info!(
        "Composed {} prompt with {} rules",
        request.kind,
        response.included_rules
    );

    Ok(Json(response))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tagsmith/preview", get(preview_prompts))
        .route("/tagsmith/prompt", post(compose_prompt))
}
