//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations
//! for each domain in the application. Repositories are generic over
//! `sea_orm::ConnectionTrait` so the same code runs against the pooled
//! connection or inside an open transaction, and they convert entities to
//! domain models at the infrastructure boundary.

pub mod cart;
pub mod credential;
pub mod order;
pub mod product;
pub mod stock;
pub mod user;
pub mod variant;

#[cfg(test)]
mod test;
