//! Variant domain models, SKU normalization, and payload validation.

use crate::model::variant::{
    CreateVariantDto, ImageDto, SizeDto, UpdateSizeDto, UpdateVariantDto, VariantDto,
};
use crate::server::error::AppError;
use std::collections::HashSet;

/// Canonical form of a SKU: trimmed and upper-cased.
///
/// Every comparison and every persisted value goes through this, so the
/// global uniqueness rule is case-insensitive by construction.
pub fn normalize_sku(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageParams {
    pub public_id: String,
    pub secure_url: String,
}

impl From<ImageDto> for ImageParams {
    fn from(dto: ImageDto) -> Self {
        Self {
            public_id: dto.public_id,
            secure_url: dto.secure_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSizeParams {
    pub label: String,
    pub stock: i32,
    /// Already normalized via [`normalize_sku`].
    pub sku: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateVariantParams {
    pub color: String,
    pub sizes: Vec<NewSizeParams>,
    pub images: Vec<ImageParams>,
}

impl CreateVariantParams {
    /// Converts the DTO, normalizing SKUs and trimming text fields.
    pub fn from_dto(dto: CreateVariantDto) -> Self {
        Self {
            color: dto.color.trim().to_string(),
            sizes: dto
                .sizes
                .into_iter()
                .map(|size| NewSizeParams {
                    label: size.label.trim().to_string(),
                    stock: size.stock,
                    sku: normalize_sku(&size.sku),
                    is_active: size.is_active,
                })
                .collect(),
            images: dto.images.into_iter().map(ImageParams::from).collect(),
        }
    }

    /// Validates the payload before any storage access.
    ///
    /// Rejects empty colour/labels/SKUs, negative stock, an empty size list,
    /// and SKUs that collide within the payload after normalization.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.color.is_empty() {
            return Err(AppError::BadRequest("Color is required".to_string()));
        }
        if self.sizes.is_empty() {
            return Err(AppError::BadRequest(
                "At least one size is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for size in &self.sizes {
            if size.label.is_empty() {
                return Err(AppError::BadRequest("Size label is required".to_string()));
            }
            if size.sku.is_empty() {
                return Err(AppError::BadRequest("SKU is required".to_string()));
            }
            if size.stock < 0 {
                return Err(AppError::BadRequest(format!(
                    "Stock for SKU {} cannot be negative",
                    size.sku
                )));
            }
            if !seen.insert(size.sku.clone()) {
                return Err(AppError::BadRequest(format!(
                    "Duplicate SKU in payload: {}",
                    size.sku
                )));
            }
        }

        Ok(())
    }

    /// Normalized SKUs carried by this payload.
    pub fn skus(&self) -> Vec<String> {
        self.sizes.iter().map(|size| size.sku.clone()).collect()
    }
}

/// Validates a batch payload: every variant on its own, plus cross-variant
/// colour and SKU uniqueness inside the batch.
pub fn validate_batch(variants: &[CreateVariantParams]) -> Result<(), AppError> {
    if variants.is_empty() {
        return Err(AppError::BadRequest(
            "At least one variant is required".to_string(),
        ));
    }

    let mut colors = HashSet::new();
    let mut skus = HashSet::new();

    for params in variants {
        params.validate()?;

        if !colors.insert(params.color.to_ascii_lowercase()) {
            return Err(AppError::BadRequest(format!(
                "Duplicate color in payload: {}",
                params.color
            )));
        }
        for sku in params.skus() {
            if !skus.insert(sku.clone()) {
                return Err(AppError::BadRequest(format!(
                    "Duplicate SKU in payload: {}",
                    sku
                )));
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVariantParams {
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateVariantParams {
    pub fn from_dto(dto: UpdateVariantDto) -> Self {
        Self {
            color: dto.color.map(|color| color.trim().to_string()),
            is_active: dto.is_active,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSizeParams {
    pub label: Option<String>,
    pub stock: Option<i32>,
    /// Normalized; `Some` only when the caller is changing the SKU.
    pub sku: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateSizeParams {
    pub fn from_dto(dto: UpdateSizeDto) -> Self {
        Self {
            label: dto.label.map(|label| label.trim().to_string()),
            stock: dto.stock,
            sku: dto.sku.map(|sku| normalize_sku(&sku)),
            is_active: dto.is_active,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(label) = &self.label {
            if label.is_empty() {
                return Err(AppError::BadRequest("Size label is required".to_string()));
            }
        }
        if let Some(sku) = &self.sku {
            if sku.is_empty() {
                return Err(AppError::BadRequest("Invalid SKU".to_string()));
            }
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(AppError::BadRequest("Invalid stock value".to_string()));
            }
        }
        Ok(())
    }
}

/// A variant with its sizes and images, the unit returned by the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantWithSizes {
    pub variant: entity::variant::Model,
    pub sizes: Vec<entity::variant_size::Model>,
    pub images: Vec<entity::variant_image::Model>,
}

impl VariantWithSizes {
    pub fn into_dto(self) -> VariantDto {
        VariantDto {
            id: self.variant.id,
            product_id: self.variant.product_id,
            color: self.variant.color,
            is_active: self.variant.is_active,
            sizes: self
                .sizes
                .into_iter()
                .map(|size| SizeDto {
                    id: size.id,
                    label: size.label,
                    stock: size.stock,
                    sku: size.sku,
                    is_active: size.is_active,
                })
                .collect(),
            images: self
                .images
                .into_iter()
                .map(|image| ImageDto {
                    public_id: image.public_id,
                    secure_url: image.secure_url,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::variant::SizePayloadDto;

    fn payload(sizes: Vec<(&str, i32, &str)>) -> CreateVariantParams {
        CreateVariantParams::from_dto(CreateVariantDto {
            color: "Black".to_string(),
            sizes: sizes
                .into_iter()
                .map(|(label, stock, sku)| SizePayloadDto {
                    label: label.to_string(),
                    stock,
                    sku: sku.to_string(),
                    is_active: true,
                })
                .collect(),
            images: vec![],
        })
    }

    /// Tests that normalization trims and upper-cases.
    #[test]
    fn sku_normalization_is_case_insensitive() {
        assert_eq!(normalize_sku("  ab-12 "), "AB-12");
        assert_eq!(normalize_sku("ab-12"), normalize_sku("AB-12"));
    }

    /// Tests that two sizes resolving to the same normalized SKU are
    /// rejected before any write.
    ///
    /// Expected: Err(BadRequest) naming the duplicate
    #[test]
    fn duplicate_skus_in_payload_fail_validation() {
        let params = payload(vec![("S", 5, "tee-s"), ("M", 3, " TEE-S ")]);

        let err = params.validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("TEE-S")));
    }

    /// Tests that negative stock is rejected.
    #[test]
    fn negative_stock_fails_validation() {
        let params = payload(vec![("S", -1, "tee-s")]);

        assert!(matches!(
            params.validate(),
            Err(AppError::BadRequest(_))
        ));
    }

    /// Tests that an empty size list is rejected.
    #[test]
    fn empty_sizes_fail_validation() {
        let params = payload(vec![]);

        assert!(matches!(
            params.validate(),
            Err(AppError::BadRequest(_))
        ));
    }

    /// Tests that a batch with the same colour twice is rejected even when
    /// all SKUs are distinct.
    #[test]
    fn batch_rejects_duplicate_colors() {
        let a = payload(vec![("S", 1, "a-1")]);
        let b = payload(vec![("M", 1, "b-1")]);

        let err = validate_batch(&[a, b]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("color")));
    }

    /// Tests that a batch with a SKU repeated across variants is rejected.
    #[test]
    fn batch_rejects_cross_variant_duplicate_skus() {
        let mut a = payload(vec![("S", 1, "x-1")]);
        a.color = "red".to_string();
        let b = payload(vec![("M", 1, "X-1")]);

        let err = validate_batch(&[a, b]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("X-1")));
    }
}
