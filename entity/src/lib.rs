//! SeaORM entity models for the storefront database.
//!
//! One module per table. The `prelude` re-exports every `Entity` under its
//! conventional name for use in queries.

pub mod prelude;

pub mod cart;
pub mod cart_item;
pub mod credential_lock;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod product_image;
pub mod shipping_credential;
pub mod user;
pub mod variant;
pub mod variant_image;
pub mod variant_size;
