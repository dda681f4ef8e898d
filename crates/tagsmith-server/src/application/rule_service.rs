//! Rule Application Service (Use Case)
//!
//! Orchestrates domain operations for Rule management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use tagsmith::{AppliesTo, DomainError, Rule, RuleRepository, RuleStore, RuleText};

/// Application service for Rule operations
pub struct RuleService<R: RuleRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: RuleRepository + ?Sized> RuleService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Get all Rules in precedence order
    pub async fn list_all(&self) -> Result<Vec<Rule>, DomainError> {
        self.repo.find_all().await
    }

    /// Create a new Rule
    pub async fn create(&self, text: String, applies_to: AppliesTo) -> Result<Rule, DomainError> {
        let rule = Rule::new(RuleText::parse(text)?, applies_to);
        let saved = self.repo.save(&rule).await?;

        tracing::info!("Created Rule: {} [{}]", saved.id, saved.applies_to);

        Ok(saved)
    }

    /// Replace text and scope of a Rule
    pub async fn update(
        &self,
        id: Uuid,
        text: String,
        applies_to: AppliesTo,
    ) -> Result<Rule, DomainError> {
        let text = RuleText::parse(text)?;
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rule", id))?;

        // a delete landing after the read must not bring the rule back
        let saved = self
            .repo
            .update(&current.revise(text, applies_to))
            .await?
            .ok_or_else(|| DomainError::not_found("Rule", id))?;

        tracing::info!("Updated Rule: {} [{}]", saved.id, saved.applies_to);

        Ok(saved)
    }

    /// Delete a Rule
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            return Err(DomainError::not_found("Rule", id));
        }
        tracing::info!("Deleted Rule: {}", id);
        Ok(())
    }
}

#[async_trait]
impl<R: RuleRepository + ?Sized> RuleStore for RuleService<R> {
    async fn list(&self) -> Result<Vec<Rule>, DomainError> {
        self.list_all().await
    }

    async fn create(&self, text: String, applies_to: AppliesTo) -> Result<Rule, DomainError> {
        RuleService::create(self, text, applies_to).await
    }

    async fn update(
        &self,
        id: Uuid,
        text: String,
        applies_to: AppliesTo,
    ) -> Result<Rule, DomainError> {
        RuleService::update(self, id, text, applies_to).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        RuleService::delete(self, id).await
    }
}
