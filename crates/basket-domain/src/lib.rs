//! Basket Domain Layer
//!
//! Core types shared by every other crate in the workspace. Infrastructure
//! (HTTP clients, storage, spreadsheets) lives elsewhere; this crate only
//! defines what a shopping item record is and the boundary traits the
//! infrastructure implements.
//!
//! ## Key Concepts
//!
//! - **ShoppingItemRecord**: the structured result of analyzing one line of
//!   free-text shopping input
//! - **Priority**: HIGH / MEDIUM / LOW urgency, with room for values the
//!   model invents
//! - **CompletionProvider**: the seam to a remote text-completion service

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod priority;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use priority::Priority;
pub use record::{ShoppingItemRecord, COLUMN_ORDER};
pub use traits::{CompletionProvider, CompletionRequest};
