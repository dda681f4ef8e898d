//! Tagsmith API Routes
//!
//! - /tagsmith/rules - Tagging rule management
//! - /tagsmith/preview - Prompt preview for the settings surface
//! - /tagsmith/prompt - Composed prompt for the inference backend

pub mod prompt;
pub mod rule;
pub mod swagger;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth, AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthCheck)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Tagsmith API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full application router
pub fn app(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(rule::router())
        .merge(prompt::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", swagger::ApiDoc::openapi()),
        )
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::adapters::InMemoryRuleRepository;
    use crate::application::RuleService;
    use crate::config::InferenceConfig;

    fn test_state(api_key: Option<&str>) -> AppState {
        let repo: Arc<dyn tagsmith::RuleRepository> = Arc::new(InMemoryRuleRepository::new());
        AppState {
            rule_service: Arc::new(RuleService::new(repo)),
            inference: InferenceConfig::default(),
            api_key: api_key.map(str::to_string),
        }
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create(app: &Router, text: &str, applies_to: &str) -> Value {
        let (status, rule) = send(
            app,
            Method::POST,
            "/tagsmith/rules",
            Some(json!({ "text": text, "applies_to": applies_to })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        rule
    }

    #[tokio::test]
    async fn test_rule_crud_flow() {
        let app = app(test_state(None));

        let rule = create(&app, "Be concise", "all").await;
        let id = rule["id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/tagsmith/rules/{id}"),
            Some(json!({ "text": "Be very concise", "applies_to": "images" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], rule["id"]);
        assert_eq!(updated["applies_to"], "images");

        let (status, list) = send(&app, Method::GET, "/tagsmith/rules", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["text"], "Be very concise");

        let uri = format!("/tagsmith/rules/{id}");
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_defaults_scope_and_rejects_blank() {
        let app = app(test_state(None));

        let (status, rule) = send(
            &app,
            Method::POST,
            "/tagsmith/rules",
            Some(json!({ "text": "Be concise" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rule["applies_to"], "all");

        let (status, _) = send(
            &app,
            Method::POST,
            "/tagsmith/rules",
            Some(json!({ "text": "  ", "applies_to": "text" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_scope_rejected_at_boundary() {
        let app = app(test_state(None));
        let (status, _) = send(
            &app,
            Method::POST,
            "/tagsmith/rules",
            Some(json!({ "text": "Be concise", "applies_to": "video" })),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_update_unknown_rule_is_not_found() {
        let app = app(test_state(None));
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/tagsmith/rules/{}", uuid::Uuid::new_v4()),
            Some(json!({ "text": "Be concise", "applies_to": "all" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_preview_uses_scoped_rules() {
        let app = app(test_state(None));
        create(&app, "Tag politics content", "text").await;
        create(&app, "Describe dominant color", "images").await;
        create(&app, "Be concise", "all").await;

        let (status, preview) = send(&app, Method::GET, "/tagsmith/preview?lang=german", None).await;
        assert_eq!(status, StatusCode::OK);

        let text = preview["text_prompt"].as_str().unwrap();
        assert!(text.contains("- Tag politics content\n- Be concise\n"));
        assert!(text.contains("The tags language must be in german."));
        assert!(text.contains("<CONTENT_HERE>"));

        let image = preview["image_prompt"].as_str().unwrap();
        assert!(image.contains("- Describe dominant color\n- Be concise\n"));
    }

    #[tokio::test]
    async fn test_compose_fills_content() {
        let app = app(test_state(None));
        create(&app, "Tag politics content", "text").await;

        let (status, composed) = send(
            &app,
            Method::POST,
            "/tagsmith/prompt",
            Some(json!({ "kind": "text", "content": "Election results are in" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(composed["included_rules"], 1);
        assert_eq!(composed["omitted_rules"], 0);

        let prompt = composed["prompt"].as_str().unwrap();
        assert!(prompt.contains("The tags language must be in english."));
        assert!(prompt.contains("CONTENT START HERE\nElection results are in\nCONTENT END HERE"));
        assert!(!prompt.contains("<CONTENT_HERE>"));
    }

    #[tokio::test]
    async fn test_compose_image_prompt() {
        let app = app(test_state(None));
        create(&app, "Tag politics content", "text").await;
        create(&app, "Describe dominant color", "images").await;

        let (status, composed) = send(
            &app,
            Method::POST,
            "/tagsmith/prompt",
            Some(json!({ "kind": "images", "lang": "french" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(composed["included_rules"], 1);
        assert!(composed["content_budget"].is_null());
        assert!(composed["prompt"]
            .as_str()
            .unwrap()
            .contains("- Describe dominant color\n"));
    }

    #[tokio::test]
    async fn test_auth_required_when_key_set() {
        let app = app(test_state(Some("secret")));

        let (status, _) = send(&app, Method::GET, "/tagsmith/rules", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/tagsmith/rules")
                    .header(header::AUTHORIZATION, "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_openapi_documents_every_route() {
        let doc = swagger::ApiDoc::openapi();
        for path in [
            "/health",
            "/tagsmith/rules",
            "/tagsmith/rules/{id}",
            "/tagsmith/preview",
            "/tagsmith/prompt",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
