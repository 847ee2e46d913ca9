use crate::model::product::CreateProductDto;
use crate::server::data::product::ProductRepository;
use crate::server::model::product::{CreateProductParams, ProductQueryParams, UpdateProductParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod images;
mod list;
mod update;

fn create_params(slug: &str) -> CreateProductParams {
    CreateProductParams::from_dto(CreateProductDto {
        title: "Crew Neck Tee".to_string(),
        slug: slug.to_string(),
        description: "A plain crew neck t-shirt".to_string(),
        category: "apparel".to_string(),
        price: 50_000,
        discount_percent: 0,
        hsn_code: "610910".to_string(),
        images: vec![],
    })
}
