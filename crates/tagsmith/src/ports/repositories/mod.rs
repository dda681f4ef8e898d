//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod rule_repository;

pub use rule_repository::*;
