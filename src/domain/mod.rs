//! Domain layer: the short URL record and the store contract.
//!
//! Nothing here depends on Postgres, Redis or HTTP. Concrete stores live in
//! [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
