//! Server configuration read from Shuttle secrets

use anyhow::{Context, Result};
use shuttle_runtime::SecretStore;

const DEFAULT_TAG_LANG: &str = "english";
const DEFAULT_CONTEXT_LENGTH: usize = 2048;

/// Where rules are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

/// Inference settings used when composing prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Language the model should emit tags in
    pub inferred_tag_lang: String,
    /// Context length of the inference backend, in tokens
    pub context_length: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            inferred_tag_lang: DEFAULT_TAG_LANG.to_string(),
            context_length: DEFAULT_CONTEXT_LENGTH,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: Option<String>,
    pub storage: StorageKind,
    pub inference: InferenceConfig,
}

impl ServerConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Result<Self> {
        Self::from_lookup(|key| secrets.get(key))
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage = match get("TAGSMITH_STORAGE").as_deref() {
            None | Some("postgres") => StorageKind::Postgres,
            Some("memory") => StorageKind::Memory,
            Some(other) => anyhow::bail!(
                "Unknown TAGSMITH_STORAGE: {}. Valid: postgres, memory",
                other
            ),
        };

        let context_length = match get("INFERENCE_CONTEXT_LENGTH") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| {
                    format!("INFERENCE_CONTEXT_LENGTH must be a positive integer, got {raw:?}")
                })?,
            None => DEFAULT_CONTEXT_LENGTH,
        };

        Ok(Self {
            api_key: get("TAGSMITH_API_KEY").filter(|k| !k.is_empty()),
            storage,
            inference: InferenceConfig {
                inferred_tag_lang: get("INFERRED_TAG_LANG")
                    .unwrap_or_else(|| DEFAULT_TAG_LANG.to_string()),
                context_length,
            },
        })
    }
}
