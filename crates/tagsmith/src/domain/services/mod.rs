//! Domain Services
//!
//! Stateless logic over domain entities: rule filtering and prompt
//! composition.

mod composer;
mod filter;
mod preview;

pub use composer::*;
pub use filter::*;
pub use preview::*;
