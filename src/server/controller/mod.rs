//! HTTP request handlers.
//!
//! Controllers deserialize request DTOs, run the auth guard, convert DTOs
//! into parameter models, call a service, and serialize the result with a
//! status code. No business logic lives here.

pub mod auth;
pub mod cart;
pub mod order;
pub mod product;
pub mod shipping;
pub mod variant;
