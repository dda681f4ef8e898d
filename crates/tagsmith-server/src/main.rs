use sqlx::PgPool;
use std::sync::Arc;

use tagsmith::RuleRepository;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;

use adapters::{InMemoryRuleRepository, PgRuleRepository};
use application::RuleService;
use config::{InferenceConfig, ServerConfig, StorageKind};

/// Application service over whichever repository the config selects
pub type AppRuleService = RuleService<dyn RuleRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub rule_service: Arc<AppRuleService>,
    pub inference: InferenceConfig,
    pub api_key: Option<String>,
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Tagsmith API initializing...");

    let config = ServerConfig::from_secrets(&secrets)?;

    if config.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("No TAGSMITH_API_KEY set - authentication disabled");
    }

    let repo: Arc<dyn RuleRepository> = match config.storage {
        StorageKind::Postgres => {
            sqlx::migrate!()
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {e}"))?;
            tracing::info!("Database migrations completed");
            Arc::new(PgRuleRepository::new(pool))
        }
        StorageKind::Memory => {
            tracing::warn!("TAGSMITH_STORAGE=memory - rules are lost on restart");
            Arc::new(InMemoryRuleRepository::new())
        }
    };

    tracing::info!(
        "Tagging prompts in {} with context length {}",
        config.inference.inferred_tag_lang,
        config.inference.context_length
    );

    let state = AppState {
        rule_service: Arc::new(RuleService::new(repo)),
        inference: config.inference,
        api_key: config.api_key,
    };

    let router = routes::app(state);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Tagsmith API ready");

    Ok(router.into())
}
