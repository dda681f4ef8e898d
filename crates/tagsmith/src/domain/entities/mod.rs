//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Rule: User-authored tagging instruction

mod rule;

pub use rule::*;
