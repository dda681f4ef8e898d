//! In-memory implementation of RuleRepository
//!
//! Keeps rules in insertion order. Selected with `TAGSMITH_STORAGE=memory`
//! and used behind service and route tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use tagsmith::{DomainError, Rule, RuleRepository};

#[derive(Default)]
pub struct InMemoryRuleRepository {
    rules: RwLock<Vec<Rule>>,
}

impl InMemoryRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RuleRepository for InMemoryRuleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rule>, DomainError> {
        let rules = self.rules.read().await;
        Ok(rules.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Rule>, DomainError> {
        Ok(self.rules.read().await.clone())
    }

    async fn save(&self, rule: &Rule) -> Result<Rule, DomainError> {
        let mut rules = self.rules.write().await;
        if rules.iter().any(|r| r.id == rule.id) {
            return Err(DomainError::Repository(format!(
                "Rule {} already exists",
                rule.id
            )));
        }
        rules.push(rule.clone());
        Ok(rule.clone())
    }

    async fn update(&self, rule: &Rule) -> Result<Option<Rule>, DomainError> {
        let mut rules = self.rules.write().await;
        Ok(rules.iter_mut().find(|r| r.id == rule.id).map(|existing| {
            *existing = rule.clone();
            rule.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rules = self.rules.write().await;
        let before = rules.len();
        rules.retain(|r| r.id != id);
        Ok(rules.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagsmith::{AppliesTo, RuleText};

    fn rule(text: &str) -> Rule {
        Rule::new(RuleText::parse(text).unwrap(), AppliesTo::All)
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let repo = InMemoryRuleRepository::new();
        let first = repo.save(&rule("first")).await.unwrap();
        repo.save(&rule("second")).await.unwrap();

        let revised = first.revise(RuleText::parse("first, revised").unwrap(), AppliesTo::Text);
        assert!(repo.update(&revised).await.unwrap().is_some());

        let texts: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.text.into_inner())
            .collect();
        assert_eq!(texts, vec!["first, revised", "second"]);
    }

    #[tokio::test]
    async fn test_delete_reports_absence() {
        let repo = InMemoryRuleRepository::new();
        let saved = repo.save(&rule("only")).await.unwrap();

        assert!(repo.delete(saved.id).await.unwrap());
        assert!(!repo.delete(saved.id).await.unwrap());
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_never_inserts() {
        let repo = InMemoryRuleRepository::new();
        let saved = repo.save(&rule("gone")).await.unwrap();
        repo.delete(saved.id).await.unwrap();

        assert!(repo.update(&saved).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_existing_id() {
        let repo = InMemoryRuleRepository::new();
        let saved = repo.save(&rule("once")).await.unwrap();

        assert!(repo.save(&saved).await.is_err());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
