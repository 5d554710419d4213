//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod categorize;
pub mod events;
pub mod expenses;
pub mod export;
pub mod summary;

// Re-export all handlers for use in router
pub use audit::*;
pub use categorize::*;
pub use events::*;
pub use expenses::*;
pub use export::*;
pub use summary::*;
