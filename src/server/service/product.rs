//! Product catalog service.

use sea_orm::{DatabaseConnection, DbErr};

use crate::model::product::{PaginatedProductsDto, ProductDto};
use crate::server::{
    data::product::ProductRepository,
    error::AppError,
    model::product::{
        product_to_dto, CreateProductParams, ProductQueryParams, UpdateProductParams,
    },
};

fn map_duplicate_slug(err: DbErr) -> AppError {
    if matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ) {
        AppError::Conflict("Slug already exists".to_string())
    } else {
        err.into()
    }
}

pub struct ProductService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product.
    ///
    /// # Returns
    /// - `Ok(ProductDto)`: the created product
    /// - `Err(AppError::BadRequest)`: invalid payload
    /// - `Err(AppError::Conflict)`: slug already taken
    pub async fn create(&self, params: CreateProductParams) -> Result<ProductDto, AppError> {
        params.validate()?;

        let repo = ProductRepository::new(self.db);

        if repo.get_by_slug(&params.slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Slug already exists: {}",
                params.slug
            )));
        }

        let (product, images) = repo.create(params).await.map_err(map_duplicate_slug)?;

        Ok(product_to_dto(product, images))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<ProductDto>, AppError> {
        let repo = ProductRepository::new(self.db);

        let Some(product) = repo.get_by_id(id).await? else {
            return Ok(None);
        };
        let images = repo.get_images(product.id).await?;

        Ok(Some(product_to_dto(product, images)))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<ProductDto>, AppError> {
        let repo = ProductRepository::new(self.db);

        let Some(product) = repo.get_by_slug(slug).await? else {
            return Ok(None);
        };
        let images = repo.get_images(product.id).await?;

        Ok(Some(product_to_dto(product, images)))
    }

    /// Paginated catalog listing with filters.
    pub async fn list(&self, params: ProductQueryParams) -> Result<PaginatedProductsDto, AppError> {
        let repo = ProductRepository::new(self.db);

        let (products, total) = repo.list(&params).await?;

        let total_pages = if params.per_page > 0 {
            total.div_ceil(params.per_page)
        } else {
            0
        };

        let mut dtos = Vec::with_capacity(products.len());
        for product in products {
            let images = repo.get_images(product.id).await?;
            dtos.push(product_to_dto(product, images));
        }

        Ok(PaginatedProductsDto {
            products: dtos,
            total,
            page: params.page,
            per_page: params.per_page,
            total_pages,
        })
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)`: product absent
    pub async fn update(
        &self,
        id: i32,
        params: UpdateProductParams,
    ) -> Result<ProductDto, AppError> {
        params.validate()?;

        let repo = ProductRepository::new(self.db);
        let product = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let updated = repo.update(product, params).await?;
        let images = repo.get_images(updated.id).await?;

        Ok(product_to_dto(updated, images))
    }

    /// Deletes a product; variants and sizes cascade away with it.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = ProductRepository::new(self.db);

        if repo.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        repo.delete(id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::product::CreateProductDto;
    use test_utils::builder::TestBuilder;

    fn create_params(slug: &str, discount: i32) -> CreateProductParams {
        CreateProductParams::from_dto(CreateProductDto {
            title: "Crew Neck Tee".to_string(),
            slug: slug.to_string(),
            description: "A plain crew neck t-shirt".to_string(),
            category: "apparel".to_string(),
            price: 50_000,
            discount_percent: discount,
            hsn_code: "610910".to_string(),
            images: vec![],
        })
    }

    /// Tests that the DTO carries the read-time derived final price.
    ///
    /// Expected: price 50000, final_price 45000 at 10% off
    #[tokio::test]
    async fn dto_derives_final_price() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ProductService::new(db);
        let created = service.create(create_params("derived-tee", 10)).await.unwrap();

        assert_eq!(created.price, 50_000);
        assert_eq!(created.final_price, 45_000);
    }

    /// Tests that a duplicate slug is rejected as a conflict.
    #[tokio::test]
    async fn duplicate_slug_is_conflict() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ProductService::new(db);
        service.create(create_params("taken-slug", 0)).await.unwrap();

        let err = service
            .create(create_params("taken-slug", 0))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    /// Tests that updating an absent product is NotFound.
    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ProductService::new(db);
        let err = service
            .update(999, UpdateProductParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
