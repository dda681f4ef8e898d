//! Settings session
//!
//! Client-side state for managing tagging rules: the cached rule list, a
//! create draft, per-row edit drafts and the notifications produced by each
//! mutation. The store stays the source of truth; the cache only changes
//! through a refetch.

use std::sync::Arc;
use uuid::Uuid;

use tagsmith::{AppliesTo, DomainError, PromptPreview, Rule, RuleStore, RuleText};

/// Shown in place of the list when the store holds no rules
pub const EMPTY_STATE_MESSAGE: &str = "You don't have any custom rules yet.";

/// Lifecycle of a single row's pending mutation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

/// A fetched rule plus its in-progress edit
#[derive(Debug, Clone)]
pub struct RuleRow {
    pub rule: Rule,
    pub draft_text: String,
    pub draft_applies_to: AppliesTo,
    pub state: RowState,
}

impl RuleRow {
    fn from_rule(rule: Rule) -> Self {
        Self {
            draft_text: rule.text.as_str().to_string(),
            draft_applies_to: rule.applies_to,
            rule,
            state: RowState::Idle,
        }
    }

    fn is_edited(&self) -> bool {
        self.draft_text != self.rule.text.as_str() || self.draft_applies_to != self.rule.applies_to
    }
}

/// The "new rule" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    /// Kept across successful creates
    pub applies_to: AppliesTo,
    /// Inline field error
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Validation errors carry a user-facing message; everything else is shown
/// through its Display impl.
fn user_message(err: &DomainError) -> String {
    match err {
        DomainError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}

pub struct SettingsSession<S: RuleStore + ?Sized> {
    store: Arc<S>,
    rows: Vec<RuleRow>,
    pub draft: Draft,
    notifications: Vec<Notification>,
}

impl<S: RuleStore + ?Sized> SettingsSession<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            rows: Vec::new(),
            draft: Draft::default(),
            notifications: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[RuleRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drain notifications raised since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Refetch the rule list.
    ///
    /// Rows whose id survives keep their unsaved edits. On failure the
    /// previous list stays in place.
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        let rules = match self.store.list().await {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!("Failed to fetch rules: {}", e);
                self.notifications.push(Notification::error(user_message(&e)));
                return Err(e);
            }
        };

        let mut previous = std::mem::take(&mut self.rows);
        self.rows = rules
            .into_iter()
            .map(|rule| {
                let kept = previous
                    .iter()
                    .position(|row| row.rule.id == rule.id)
                    .map(|i| previous.swap_remove(i))
                    .filter(RuleRow::is_edited);

                match kept {
                    Some(old) => RuleRow {
                        rule,
                        draft_text: old.draft_text,
                        draft_applies_to: old.draft_applies_to,
                        state: RowState::Idle,
                    },
                    None => RuleRow::from_rule(rule),
                }
            })
            .collect();

        Ok(())
    }

    /// Set the edit draft of a cached row
    pub fn edit(
        &mut self,
        id: Uuid,
        text: Option<String>,
        applies_to: Option<AppliesTo>,
    ) -> Result<(), DomainError> {
        let row = self.row_mut(id)?;
        if let Some(text) = text {
            row.draft_text = text;
        }
        if let Some(applies_to) = applies_to {
            row.draft_applies_to = applies_to;
        }
        Ok(())
    }

    /// Submit the create draft.
    ///
    /// Blank text never reaches the store. The text is cleared only on
    /// success and the chosen scope stays for the next rule.
    pub async fn submit_new(&mut self) -> Result<(), DomainError> {
        let text = match RuleText::parse(self.draft.text.clone()) {
            Ok(text) => text,
            Err(e) => {
                self.draft.error = Some(user_message(&e));
                return Err(e);
            }
        };
        self.draft.error = None;

        match self
            .store
            .create(text.into_inner(), self.draft.applies_to)
            .await
        {
            Ok(rule) => {
                tracing::info!("Created rule {}", rule.id);
                self.notifications
                    .push(Notification::success("Rule has been created!"));
                self.draft.text.clear();
                self.refetch_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                if let DomainError::Validation(msg) = &e {
                    self.draft.error = Some(msg.clone());
                }
                self.notifications.push(Notification::error(user_message(&e)));
                Err(e)
            }
        }
    }

    /// Submit a row's edit draft as the full replacement record
    pub async fn submit_update(&mut self, id: Uuid) -> Result<(), DomainError> {
        let (text, applies_to) = match self.row_mut(id) {
            Ok(row) => match RuleText::parse(row.draft_text.clone()) {
                Ok(text) => {
                    row.state = RowState::Submitting;
                    (text, row.draft_applies_to)
                }
                Err(e) => {
                    row.state = RowState::Failed(user_message(&e));
                    return Err(e);
                }
            },
            Err(e) => {
                self.notifications.push(Notification::error(user_message(&e)));
                return Err(e);
            }
        };

        let result = self.store.update(id, text.into_inner(), applies_to).await;
        self.finish(id, result.map(|_| ()), "Rule has been updated!")
            .await
    }

    /// Delete a row; there is no confirmation step
    pub async fn submit_delete(&mut self, id: Uuid) -> Result<(), DomainError> {
        match self.row_mut(id) {
            Ok(row) => row.state = RowState::Submitting,
            Err(e) => {
                self.notifications.push(Notification::error(user_message(&e)));
                return Err(e);
            }
        }

        let result = self.store.delete(id).await;
        self.finish(id, result, "Rule has been deleted!").await
    }

    async fn finish(
        &mut self,
        id: Uuid,
        result: Result<(), DomainError>,
        success: &str,
    ) -> Result<(), DomainError> {
        match result {
            Ok(()) => {
                tracing::info!("{} ({})", success, id);
                if let Ok(row) = self.row_mut(id) {
                    row.state = RowState::Idle;
                }
                self.notifications.push(Notification::success(success));
                self.refetch_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                let message = user_message(&e);
                if let Ok(row) = self.row_mut(id) {
                    row.state = RowState::Failed(message.clone());
                }
                self.notifications.push(Notification::error(message));
                Err(e)
            }
        }
    }

    /// The mutation already succeeded; a failed refetch only leaves the
    /// cached list stale and is reported through its own notification.
    async fn refetch_after_mutation(&mut self) {
        let _ = self.refresh().await;
    }

    /// Prompts the inference backend would receive for the cached rules
    pub fn preview(&self, language: &str) -> PromptPreview {
        let rules: Vec<Rule> = self.rows.iter().map(|row| row.rule.clone()).collect();
        PromptPreview::assemble(language, &rules)
    }

    fn row_mut(&mut self, id: Uuid) -> Result<&mut RuleRow, DomainError> {
        self.rows
            .iter_mut()
            .find(|row| row.rule.id == id)
            .ok_or_else(|| DomainError::not_found("Rule", id))
    }
}
