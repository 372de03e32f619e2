//! Store implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::UrlStore`].
//!
//! # Stores
//!
//! - [`PgUrlStore`] - PostgreSQL `urls` table via SQLx
//! - [`InMemoryUrlStore`] - `DashMap` store for tests and local runs

pub mod memory_url_store;
pub mod pg_url_store;

pub use memory_url_store::InMemoryUrlStore;
pub use pg_url_store::PgUrlStore;
