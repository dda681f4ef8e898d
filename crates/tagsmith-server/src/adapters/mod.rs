//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod memory;
pub mod postgres;

// Re-exports
pub use memory::InMemoryRuleRepository;
pub use postgres::PgRuleRepository;
