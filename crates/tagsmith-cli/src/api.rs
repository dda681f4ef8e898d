//! Tagsmith API Client
//!
//! Speaks the rule store contract over HTTP.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tagsmith::{AppliesTo, DomainError, PromptPreview, Rule, RuleStore, RuleText};

/// API Client for Tagsmith
pub struct TagsmithClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Deserialize)]
struct RuleResponse {
    id: Uuid,
    text: String,
    applies_to: AppliesTo,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RuleResponse> for Rule {
    type Error = DomainError;

    fn try_from(resp: RuleResponse) -> Result<Self, Self::Error> {
        Ok(Rule {
            id: resp.id,
            text: RuleText::parse(resp.text)?,
            applies_to: resp.applies_to,
            created_at: resp.created_at,
            updated_at: resp.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PreviewResponse {
    text_prompt: String,
    image_prompt: String,
}

#[derive(Debug, Serialize)]
struct RuleRequest<'a> {
    text: &'a str,
    applies_to: AppliesTo,
}

impl TagsmithClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Test connection with health check
    pub async fn health(&self) -> anyhow::Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Verify the API key against a protected endpoint
    pub async fn check_auth(&self) -> Result<(), DomainError> {
        self.list().await.map(|_| ())
    }

    /// Prompts as composed by the server from its own configuration
    pub async fn remote_preview(&self, lang: Option<&str>) -> Result<PromptPreview, DomainError> {
        let mut url = format!("{}/tagsmith/preview", self.base_url);
        if let Some(lang) = lang {
            url.push_str(&format!("?lang={}", urlencoding::encode(lang)));
        }

        let resp = self.send(self.client.get(&url), None).await?;
        let preview: PreviewResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to parse response: {e}")))?;

        Ok(PromptPreview {
            text_prompt: preview.text_prompt,
            image_prompt: preview.image_prompt,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, id: Option<Uuid>) -> Result<Response, DomainError> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to connect to Tagsmith API: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(error_for_status(status, body, id))
    }

    async fn parse_rule(resp: Response) -> Result<Rule, DomainError> {
        let rule: RuleResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to parse response: {e}")))?;
        rule.try_into()
    }
}

/// Map a failed HTTP status onto the domain error taxonomy
fn error_for_status(status: StatusCode, body: String, id: Option<Uuid>) -> DomainError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => DomainError::Validation(body),
        StatusCode::NOT_FOUND => match id {
            Some(id) => DomainError::not_found("Rule", id),
            None => DomainError::not_found_str("Rule", &body),
        },
        _ => DomainError::Transport(format!("API error ({}): {}", status, body)),
    }
}

#[async_trait]
impl RuleStore for TagsmithClient {
    async fn list(&self) -> Result<Vec<Rule>, DomainError> {
        let url = format!("{}/tagsmith/rules", self.base_url);
        let resp = self.send(self.client.get(&url), None).await?;

        let rules: Vec<RuleResponse> = resp
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to parse response: {e}")))?;

        rules.into_iter().map(Rule::try_from).collect()
    }

    async fn create(&self, text: String, applies_to: AppliesTo) -> Result<Rule, DomainError> {
        let url = format!("{}/tagsmith/rules", self.base_url);
        let request = RuleRequest {
            text: &text,
            applies_to,
        };
        let resp = self.send(self.client.post(&url).json(&request), None).await?;
        Self::parse_rule(resp).await
    }

    async fn update(
        &self,
        id: Uuid,
        text: String,
        applies_to: AppliesTo,
    ) -> Result<Rule, DomainError> {
        let url = format!("{}/tagsmith/rules/{}", self.base_url, id);
        let request = RuleRequest {
            text: &text,
            applies_to,
        };
        let resp = self
            .send(self.client.put(&url).json(&request), Some(id))
            .await?;
        Self::parse_rule(resp).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let url = format!("{}/tagsmith/rules/{}", self.base_url, id);
        self.send(self.client.delete(&url), Some(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagsmith::ErrorKind;

    #[test]
    fn test_status_mapping() {
        let id = Uuid::new_v4();
        assert_eq!(
            error_for_status(StatusCode::BAD_REQUEST, "empty".into(), None).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            error_for_status(StatusCode::UNPROCESSABLE_ENTITY, "bad scope".into(), None).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            error_for_status(StatusCode::NOT_FOUND, String::new(), Some(id)),
            DomainError::not_found("Rule", id)
        );
        assert_eq!(
            error_for_status(StatusCode::UNAUTHORIZED, String::new(), None).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            error_for_status(StatusCode::BAD_GATEWAY, String::new(), Some(id)).kind(),
            ErrorKind::Transport
        );
    }

    #[test]
    fn test_response_with_blank_text_rejected() {
        let resp: RuleResponse = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "text": " ",
            "applies_to": "all",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(Rule::try_from(resp).is_err());
    }
}
