//! Helpers shared across layers.
//!
//! - [`code_generator`] - random short code generation
//! - [`db_error`] - mapping of `sqlx` errors onto [`crate::domain::repositories::StoreError`]

pub mod code_generator;
pub mod db_error;
