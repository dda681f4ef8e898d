//! Rule - Tagging rule DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use tagsmith::{AppliesTo, Rule};

// ============================================
// Request/Response DTOs
// ============================================

/// Create Rule request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRuleRequest {
    pub text: String,
    /// Defaults to `all`
    #[serde(default)]
    pub applies_to: AppliesTo,
}

/// Update Rule request (full record)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRuleRequest {
    pub text: String,
    pub applies_to: AppliesTo,
}

/// Rule response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RuleResponse {
    pub id: Uuid,
    pub text: String,
    pub applies_to: AppliesTo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rule> for RuleResponse {
    fn from(rule: Rule) -> Self {
        Self {
            id: rule.id,
            text: rule.text.into_inner(),
            applies_to: rule.applies_to,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}
