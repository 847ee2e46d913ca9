//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller (API) layer and the data
//! (repository) layer. They are responsible for:
//!
//! - **Business Logic**: core rules and validation
//! - **Orchestration**: coordinating repositories and external collaborators
//! - **Domain Models**: working with domain models rather than DTOs or entities
//! - **Transaction Management**: retried transactions for multi-step writes

pub mod auth;
pub mod cart;
pub mod notify;
pub mod order;
pub mod product;
pub mod shipping;
pub mod stock;
pub mod variant;
