//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and the HTTP surface.

mod rule_service;

pub use rule_service::RuleService;
