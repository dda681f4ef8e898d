//! Tagsmith Domain Library
//!
//! Tagging rules and the prompt composition engine for automatic
//! content tagging.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Rule)
//!   - `value_objects/`: Immutable value types (AppliesTo, ContentKind, RuleText)
//!   - `services/`: Rule filter, prompt composer, prompt preview
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `RuleStore`: Rule CRUD contract shared by server and clients
//!
//! # Usage
//!
//! ```rust,ignore
//! use tagsmith::{build_text_prompt, select_applicable, ContentKind};
//!
//! let texts = select_applicable(&rules, ContentKind::Text);
//! let prompt = build_text_prompt("english", &texts, "\n<CONTENT_HERE>\n", 2048);
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    build_image_prompt, build_text_prompt, compose_text_prompt, estimate_tokens,
    select_applicable, AppliesTo, ContentKind, DomainError, ErrorKind, PromptPreview, Rule,
    RuleText, TextPrompt, PREVIEW_CONTEXT_LENGTH, PREVIEW_PLACEHOLDER,
};
pub use ports::{RuleRepository, RuleStore};
