mod create;
mod find_sku_owner;
mod update_delete;

use super::*;
use crate::model::variant::{CreateVariantDto, SizePayloadDto};
use test_utils::{builder::TestBuilder, factory};

/// Builds normalized create params from (label, stock, sku) triples.
fn params(color: &str, sizes: Vec<(&str, i32, &str)>) -> CreateVariantParams {
    CreateVariantParams::from_dto(CreateVariantDto {
        color: color.to_string(),
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
