use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageDto {
    pub public_id: String,
    pub secure_url: String,
}

/// One size entry in a variant creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SizePayloadDto {
    pub label: String,
    pub stock: i32,
    pub sku: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateVariantDto {
    pub color: String,
    pub sizes: Vec<SizePayloadDto>,
    #[serde(default)]
    pub images: Vec<ImageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMultipleVariantsDto {
    pub variants: Vec<CreateVariantDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateVariantDto {
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update of a single size. Absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSizeDto {
    pub label: Option<String>,
    pub stock: Option<i32>,
    pub sku: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SizeDto {
    pub id: i32,
    pub label: String,
    pub stock: i32,
    pub sku: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VariantDto {
    pub id: i32,
    pub product_id: i32,
    pub color: String,
    pub is_active: bool,
    pub sizes: Vec<SizeDto>,
    pub images: Vec<ImageDto>,
}
