use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for adding an item to the cart.
///
/// `price` is the unit price in minor currency units captured by the client
/// from the product page; the server snapshots it on the line item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddCartItemDto {
    pub product_id: i32,
    pub variant_id: i32,
    pub size_id: i32,
    pub sku: String,
    pub title: Option<String>,
    pub image: Option<String>,
    pub price: i64,
    pub quantity: i32,
}

/// Request body for decrementing an item's quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DecrementCartItemDto {
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItemDto {
    pub id: i32,
    pub product_id: i32,
    pub variant_id: i32,
    pub size_id: i32,
    pub sku: String,
    pub title: Option<String>,
    pub image: Option<String>,
    pub price_at: i64,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartDto {
    pub id: i32,
    pub items: Vec<CartItemDto>,
    pub subtotal: i64,
    pub shipping: i64,
    pub discount: i64,
    pub total: i64,
    pub currency: String,
}
