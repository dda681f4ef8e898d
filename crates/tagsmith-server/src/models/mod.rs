//! Tagsmith Data Models
//!
//! - Rule: Tagging rule CRUD
//! - Prompt: Preview and composed prompts

mod prompt;
mod rule;

pub use prompt::*;
pub use rule::*;
