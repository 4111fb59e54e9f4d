//! Domain model types (pure).
//!
//! All types in this module are pure data.

pub mod country;
pub mod error;
pub mod key_action;

// Re-export for convenience
pub use country::{Column, Country, FieldValue};
pub use error::{AppError, DatasetError};
pub use key_action::KeyAction;
