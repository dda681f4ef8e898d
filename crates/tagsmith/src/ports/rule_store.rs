//! Rule Store Port
//!
//! The contract every caller uses to read and mutate tagging rules,
//! whether it runs next to the database or talks to it over HTTP.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::{AppliesTo, Rule};

/// Rule store interface
///
/// The store owns the rules. `list` returns them in precedence order, which
/// is also the order their texts appear in composed prompts.
///
/// # Example
///
/// ```rust,ignore
/// use tagsmith::ports::RuleStore;
///
/// struct HttpRuleStore { /* reqwest client */ }
///
/// #[async_trait]
/// impl RuleStore for HttpRuleStore {
///     async fn list(&self) -> Result<Vec<Rule>, DomainError> {
///         // GET /tagsmith/rules
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// All rules in precedence order
    async fn list(&self) -> Result<Vec<Rule>, DomainError>;

    /// Create a rule
    ///
    /// Fails with `DomainError::Validation` if `text` is blank.
    async fn create(&self, text: String, applies_to: AppliesTo) -> Result<Rule, DomainError>;

    /// Replace text and scope of an existing rule
    ///
    /// Fails with `DomainError::NotFound` if `id` is unknown.
    async fn update(
        &self,
        id: Uuid,
        text: String,
        applies_to: AppliesTo,
    ) -> Result<Rule, DomainError>;

    /// Delete a rule
    ///
    /// Fails with `DomainError::NotFound` if `id` is unknown, including a
    /// second delete of the same id.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
