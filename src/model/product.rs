use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::variant::ImageDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductDto {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    /// Listed price in minor currency units.
    pub price: i64,
    #[serde(default)]
    pub discount_percent: i32,
    pub hsn_code: String,
    #[serde(default)]
    pub images: Vec<ImageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub discount_percent: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub price: i64,
    pub discount_percent: i32,
    /// Derived from price and discount at read time; never stored.
    pub final_price: i64,
    pub hsn_code: String,
    pub is_active: bool,
    pub available_stock: i64,
    pub has_stock: bool,
    pub images: Vec<ImageDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedProductsDto {
    pub products: Vec<ProductDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
