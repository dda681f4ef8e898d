//! Rule Filter - pick the rules that apply to one content kind

use crate::domain::entities::Rule;
use crate::domain::value_objects::ContentKind;

/// Texts of the rules applicable to `target`, in store order
pub fn select_applicable(rules: &[Rule], target: ContentKind) -> Vec<&str> {
    rules
        .iter()
        .filter(|rule| rule.applies_to.covers(target))
        .map(|rule| rule.text.as_str())
        .collect()
}
