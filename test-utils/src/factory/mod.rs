//! Factories that insert entities with unique defaults.
//!
//! Each factory persists an entity with sensible default values, generating
//! unique identifiers (slugs, SKUs, emails) from a shared counter so multiple
//! calls never collide within a test database.

pub mod cart;
pub mod helpers;
pub mod product;
pub mod user;
pub mod variant;
