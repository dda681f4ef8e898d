//! AppliesTo - Which content kinds a tagging rule is scoped to

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Content kind a prompt is composed for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Images,
}

/// Rule scope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppliesTo {
    /// Both text and image prompts
    #[default]
    All,
    Text,
    Images,
}

impl AppliesTo {
    /// Whether a rule with this scope belongs in a prompt for `kind`
    pub fn covers(self, kind: ContentKind) -> bool {
        match self {
            AppliesTo::All => true,
            AppliesTo::Text => kind == ContentKind::Text,
            AppliesTo::Images => kind == ContentKind::Images,
        }
    }
}

impl std::fmt::Display for AppliesTo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppliesTo::All => write!(f, "all"),
            AppliesTo::Text => write!(f, "text"),
            AppliesTo::Images => write!(f, "images"),
        }
    }
}

impl std::str::FromStr for AppliesTo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(AppliesTo::All),
            "text" => Ok(AppliesTo::Text),
            "images" => Ok(AppliesTo::Images),
            _ => Err(format!(
                "Unknown rule scope: {}. Valid: all, text, images",
                s
            )),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Text => write!(f, "text"),
            ContentKind::Images => write!(f, "images"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ContentKind::Text),
            "images" | "image" => Ok(ContentKind::Images),
            _ => Err(format!("Unknown content kind: {}. Valid: text, images", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_kind() {
        assert!(AppliesTo::All.covers(ContentKind::Text));
        assert!(AppliesTo::All.covers(ContentKind::Images));
    }

    #[test]
    fn test_scoped_rules_cover_only_their_kind() {
        assert!(AppliesTo::Text.covers(ContentKind::Text));
        assert!(!AppliesTo::Text.covers(ContentKind::Images));
        assert!(AppliesTo::Images.covers(ContentKind::Images));
        assert!(!AppliesTo::Images.covers(ContentKind::Text));
    }

    #[test]
    fn test_parse_rejects_unknown_scope() {
        assert_eq!("Images".parse::<AppliesTo>(), Ok(AppliesTo::Images));
        assert!("video".parse::<AppliesTo>().is_err());
        assert!(serde_json::from_str::<AppliesTo>("\"video\"").is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&AppliesTo::All).unwrap(), "\"all\"");
        assert_eq!(
            serde_json::from_str::<AppliesTo>("\"images\"").unwrap(),
            AppliesTo::Images
        );
    }
}
