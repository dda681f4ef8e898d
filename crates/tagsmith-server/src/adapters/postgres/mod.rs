//! PostgreSQL Repository Implementations

mod rule_repository;

pub use rule_repository::PgRuleRepository;
