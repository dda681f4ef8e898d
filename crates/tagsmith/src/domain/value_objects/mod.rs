//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod applies_to;
mod rule_text;

pub use applies_to::*;
pub use rule_text::*;
