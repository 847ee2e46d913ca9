//! Product domain models and catalog query parameters.

use crate::model::product::{CreateProductDto, ProductDto, UpdateProductDto};
use crate::model::variant::ImageDto;
use crate::server::error::AppError;
use crate::server::model::variant::ImageParams;

#[derive(Debug, Clone)]
pub struct CreateProductParams {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub price: i64,
    pub discount_percent: i32,
    pub hsn_code: String,
    pub images: Vec<ImageParams>,
}

impl CreateProductParams {
    pub fn from_dto(dto: CreateProductDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            slug: dto.slug.trim().to_string(),
            description: dto.description.trim().to_string(),
            category: dto.category.trim().to_string(),
            price: dto.price,
            discount_percent: dto.discount_percent,
            hsn_code: dto.hsn_code.trim().to_string(),
            images: dto.images.into_iter().map(ImageParams::from).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.len() < 2 || self.title.len() > 50 {
            return Err(AppError::BadRequest(
                "Title must be between 2 and 50 characters".to_string(),
            ));
        }
        if !is_valid_slug(&self.slug) {
            return Err(AppError::BadRequest(
                "Slug may only contain lowercase letters, numbers, and hyphens".to_string(),
            ));
        }
        if self.description.len() < 10 || self.description.len() > 250 {
            return Err(AppError::BadRequest(
                "Description must be between 10 and 250 characters".to_string(),
            ));
        }
        if self.price < 1 {
            return Err(AppError::BadRequest("Price must be at least 1".to_string()));
        }
        if !(0..=60).contains(&self.discount_percent) {
            return Err(AppError::BadRequest(
                "Discount must be between 0 and 60 percent".to_string(),
            ));
        }
        if self.hsn_code.is_empty() {
            return Err(AppError::BadRequest("HSN code is required".to_string()));
        }
        Ok(())
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProductParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub discount_percent: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateProductParams {
    pub fn from_dto(dto: UpdateProductDto) -> Self {
        Self {
            title: dto.title.map(|t| t.trim().to_string()),
            description: dto.description.map(|d| d.trim().to_string()),
            category: dto.category.map(|c| c.trim().to_string()),
            price: dto.price,
            discount_percent: dto.discount_percent,
            is_active: dto.is_active,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(price) = self.price {
            if price < 1 {
                return Err(AppError::BadRequest("Price must be at least 1".to_string()));
            }
        }
        if let Some(discount) = self.discount_percent {
            if !(0..=60).contains(&discount) {
                return Err(AppError::BadRequest(
                    "Discount must be between 0 and 60 percent".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Catalog listing filters, straight from the query string.
#[derive(Debug, Clone, Default)]
pub struct ProductQueryParams {
    pub page: u64,
    pub per_page: u64,
    pub category: Option<String>,
    /// Case-insensitive substring match against the title.
    pub query: Option<String>,
    pub in_stock: bool,
}

/// Converts a product row and its images into the API shape, deriving
/// `final_price` at read time.
pub fn product_to_dto(
    product: entity::product::Model,
    images: Vec<entity::product_image::Model>,
) -> ProductDto {
    let final_price = product.final_price();

    ProductDto {
        id: product.id,
        title: product.title,
        slug: product.slug,
        description: product.description,
        category: product.category,
        price: product.price,
        discount_percent: product.discount_percent,
        final_price,
        hsn_code: product.hsn_code,
        is_active: product.is_active,
        available_stock: product.available_stock,
        has_stock: product.has_stock,
        images: images
            .into_iter()
            .map(|image| ImageDto {
                public_id: image.public_id,
                secure_url: image.secure_url,
            })
            .collect(),
    }
}
