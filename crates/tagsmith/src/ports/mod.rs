//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (repositories, rule stores).
//!
//! Implementations of these traits live in the infrastructure layer.

pub mod repositories;
mod rule_store;

// Re-exports
pub use repositories::*;
pub use rule_store::RuleStore;
