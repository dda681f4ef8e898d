//! Rule - User-authored tagging instruction
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{AppliesTo, RuleText};

/// Rule - A custom instruction injected into tagging prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: Uuid,
    pub text: RuleText,
    pub applies_to: AppliesTo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rule {
    /// Create a new rule with generated ID and timestamps
    pub fn new(text: RuleText, applies_to: AppliesTo) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text,
            applies_to,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace text and scope, keeping identity and creation time
    pub fn revise(self, text: RuleText, applies_to: AppliesTo) -> Self {
        Self {
            text,
            applies_to,
            updated_at: Utc::now(),
            ..self
        }
    }
}
