use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for converting the active cart into an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutDto {
    pub payment_method: String,
    pub ship_name: String,
    pub ship_phone: String,
    pub ship_street: String,
    pub ship_city: String,
    pub ship_state: String,
    pub ship_postal_code: String,
    #[serde(default = "default_country")]
    pub ship_country: String,
    /// Client-supplied key so a retried checkout never charges twice.
    pub idempotency_key: Option<String>,
}

fn default_country() -> String {
    "India".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub product_id: i32,
    pub variant_id: i32,
    pub title: Option<String>,
    pub sku: String,
    pub price: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: i32,
    pub status: String,
    pub items: Vec<OrderItemDto>,
    pub subtotal: i64,
    pub discount: i64,
    pub shipping: i64,
    pub tax: i64,
    pub total: i64,
    pub currency: String,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedOrdersDto {
    pub orders: Vec<OrderDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}
