//! Domain models and operation-specific parameter types.
//!
//! Controllers convert DTOs into these types before calling services;
//! repositories return them so business logic never touches raw entities
//! where a richer model exists.

pub mod cart;
pub mod order;
pub mod product;
pub mod stock;
pub mod variant;
