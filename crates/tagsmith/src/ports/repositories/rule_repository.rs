//! Rule Repository Port
//!
//! Abstract interface for Rule persistence operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Rule};

/// Repository interface for Rule entities
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Find a Rule by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rule>, DomainError>;

    /// Find all Rules in insertion order
    async fn find_all(&self) -> Result<Vec<Rule>, DomainError>;

    /// Insert a new Rule at the end of the list
    async fn save(&self, rule: &Rule) -> Result<Rule, DomainError>;

    /// Replace an existing Rule in place
    ///
    /// Returns `None` when no Rule with that id exists, including one deleted
    /// after it was read. Never inserts.
    async fn update(&self, rule: &Rule) -> Result<Option<Rule>, DomainError>;

    /// Delete a Rule by ID
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
