//! Rule Routes - Tagging Rule Management
//!
//! HTTP handlers that delegate to RuleService for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use tagsmith::DomainError;

use crate::models::{CreateRuleRequest, RuleResponse, UpdateRuleRequest};
use crate::AppState;

/// Map domain errors onto HTTP statuses
pub(crate) fn error_response(e: DomainError) -> (StatusCode, String) {
    let status = match e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Repository(_) | DomainError::Transport(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}

/// List all Rules
#[utoipa::path(
    get,
    path = "/tagsmith/rules",
    responses(
        (status = 200, description = "Rules in precedence order", body = Vec<RuleResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rule"
)]
pub async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<Vec<RuleResponse>>, (StatusCode, String)> {
    let rules = state
        .rule_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(rules.into_iter().map(Into::into).collect()))
}

/// Create new Rule
#[utoipa::path(
    post,
    path = "/tagsmith/rules",
    request_body = CreateRuleRequest,
    responses(
        (status = 200, description = "Rule created successfully", body = RuleResponse),
        (status = 400, description = "Empty rule text"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rule"
)]
pub async fn create_rule(
    State(state): State<AppState>,
    Json(payload): Json<CreateRuleRequest>,
) -> Result<Json<RuleResponse>, (StatusCode, String)> {
    let rule = state
        .rule_service
        .create(payload.text, payload.applies_to)
        .await
        .map_err(error_response)?;

    Ok(Json(rule.into()))
}

/// Update Rule
#[utoipa::path(
    put,
    path = "/tagsmith/rules/{id}",
    params(
        ("id" = Uuid, Path, description = "Rule ID")
    ),
    request_body = UpdateRuleRequest,
    responses(
        (status = 200, description = "Rule updated successfully", body = RuleResponse),
        (status = 400, description = "Empty rule text"),
        (status = 404, description = "Rule not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rule"
)]
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRuleRequest>,
) -> Result<Json<RuleResponse>, (StatusCode, String)> {
    let rule = state
        .rule_service
        .update(id, payload.text, payload.applies_to)
        .await
        .map_err(error_response)?;

    Ok(Json(rule.into()))
}

/// Delete Rule
#[utoipa::path(
    delete,
    path = "/tagsmith/rules/{id}",
    params(
        ("id" = Uuid, Path, description = "Rule ID")
    ),
    responses(
        (status = 204, description = "Rule deleted"),
        (status = 404, description = "Rule not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Rule"
)]
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .rule_service
        .delete(id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tagsmith/rules", get(list_rules).post(create_rule))
        .route("/tagsmith/rules/:id", put(update_rule).delete(delete_rule))
}
