//! PostgreSQL implementation of RuleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use tagsmith::{AppliesTo, DomainError, Rule, RuleRepository, RuleText};

/// PostgreSQL implementation of RuleRepository
pub struct PgRuleRepository {
    pool: PgPool,
}

impl PgRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct RuleRow {
    id: Uuid,
    text: String,
    applies_to: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<RuleRow> for Rule {
    type Error = DomainError;

    fn try_from(row: RuleRow) -> Result<Self, Self::Error> {
        let applies_to: AppliesTo = row
            .applies_to
            .parse()
            .map_err(DomainError::Repository)?;

        Ok(Self {
            id: row.id,
            text: RuleText::parse(row.text)?,
            applies_to,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const RULE_COLUMNS: &str = "id, text, applies_to, created_at, updated_at";

#[async_trait]
impl RuleRepository for PgRuleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rule>, DomainError> {
        let row = sqlx::query_as::<_, RuleRow>(&format!(
            "SELECT {RULE_COLUMNS} FROM tagging_rules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(Rule::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Rule>, DomainError> {
        let rows = sqlx::query_as::<_, RuleRow>(&format!(
            "SELECT {RULE_COLUMNS} FROM tagging_rules ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(Rule::try_from).collect()
    }

    async fn save(&self, rule: &Rule) -> Result<Rule, DomainError> {
        let row = sqlx::query_as::<_, RuleRow>(&format!(
            r#"
            INSERT INTO tagging_rules (id, text, applies_to, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RULE_COLUMNS}
            "#
        ))
        .bind(rule.id)
        .bind(rule.text.as_str())
        .bind(rule.applies_to.to_string())
        .bind(rule.created_at)
        .bind(rule.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn update(&self, rule: &Rule) -> Result<Option<Rule>, DomainError> {
        // seq is untouched so the rule keeps its position
        let row = sqlx::query_as::<_, RuleRow>(&format!(
            r#"
            UPDATE tagging_rules
            SET text = $2, applies_to = $3, updated_at = $4
            WHERE id = $1
            RETURNING {RULE_COLUMNS}
            "#
        ))
        .bind(rule.id)
        .bind(rule.text.as_str())
        .bind(rule.applies_to.to_string())
        .bind(rule.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(Rule::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tagging_rules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIGRATION: &str =
        include_str!("../../../migrations/20250101000000_create_tagging_rules.sql");

    #[test]
    fn test_blank_check_covers_all_whitespace() {
        // tabs and newlines are blank for RuleText, so the column check must agree
        assert!(RuleText::parse("\t\n ").is_err());
        assert!(MIGRATION.contains("text !~ '^[[:space:]]*$'"));
        assert!(!MIGRATION.contains("btrim(text)"));
    }

    #[test]
    fn test_row_with_unknown_scope_is_repository_error() {
        let now = chrono::Utc::now();
        let row = RuleRow {
            id: Uuid::new_v4(),
            text: "Be concise".to_string(),
            applies_to: "video".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            Rule::try_from(row),
            Err(DomainError::Repository(_))
        ));
    }
}
