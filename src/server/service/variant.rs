//! Variant / SKU registry.
//!
//! Enforces catalog-wide SKU uniqueness and manages the size lifecycle
//! within a variant. The lookup-based pre-check gives friendly conflict
//! errors; the unique index is the real guard, and a duplicate-key error
//! that slips past the pre-check (two admins racing) is translated to the
//! same `Conflict` outcome. Every successful mutation triggers a stock
//! recompute on the parent product.

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};

use crate::server::{
    data::{product::ProductRepository, variant::VariantRepository},
    error::AppError,
    model::{
        stock::StockPolicy,
        variant::{
            validate_batch, CreateVariantParams, ImageParams, NewSizeParams, UpdateSizeParams,
            UpdateVariantParams, VariantWithSizes,
        },
    },
    service::stock::StockAggregator,
};

/// Translates a storage-level duplicate-key error into the conflict outcome
/// the pre-check would have produced.
fn map_duplicate_key(err: DbErr) -> AppError {
    if matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ) {
        AppError::Conflict("SKU conflict (duplicate key)".to_string())
    } else {
        err.into()
    }
}

pub struct VariantService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VariantService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, variant_id: i32) -> Result<Option<VariantWithSizes>, AppError> {
        let repo = VariantRepository::new(self.db);
        Ok(repo.get_by_id(variant_id).await?)
    }

    pub async fn list_by_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<VariantWithSizes>, AppError> {
        let repo = VariantRepository::new(self.db);
        Ok(repo.list_by_product(product_id).await?)
    }

    /// Creates one variant under a product.
    ///
    /// Validates the payload, pre-checks its SKUs against the whole catalog,
    /// then inserts variant + sizes + images in one transaction. If the
    /// parent product has no images, the variant's first image is copied
    /// onto it inside the same transaction. The stock recompute runs after
    /// commit; its failure is logged, never propagated.
    ///
    /// # Returns
    /// - `Ok(VariantWithSizes)`: the created variant
    /// - `Err(AppError::BadRequest)`: invalid payload
    /// - `Err(AppError::NotFound)`: product absent
    /// - `Err(AppError::Conflict)`: a SKU is already taken, naming it
    pub async fn create_variant(
        &self,
        product_id: i32,
        params: CreateVariantParams,
    ) -> Result<VariantWithSizes, AppError> {
        params.validate()?;

        let product = ProductRepository::new(self.db)
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if let Some(sku) = VariantRepository::new(self.db)
            .find_sku_owner(&params.skus(), None)
            .await?
        {
            return Err(AppError::Conflict(format!("SKU already exists: {}", sku)));
        }

        let txn = self.db.begin().await?;

        let created = VariantRepository::new(&txn)
            .create(product.id, &params)
            .await
            .map_err(map_duplicate_key)?;

        self.copy_first_image_if_bare(&txn, product.id, &created)
            .await?;

        txn.commit().await?;

        StockAggregator::new(self.db)
            .recompute_or_log(product.id, StockPolicy::AllSizes)
            .await;

        Ok(created)
    }

    /// Creates several variants under a product, all-or-nothing.
    ///
    /// Beyond the single-variant rules, the payload must not repeat a
    /// colour or a SKU across its variants. Inserts, the image copy, and
    /// the stock recompute run inside one transaction: any failure —
    /// including a duplicate key raised at insert time by a racing admin —
    /// rolls back every insert in the batch.
    pub async fn create_multiple_variants(
        &self,
        product_id: i32,
        variants: Vec<CreateVariantParams>,
    ) -> Result<Vec<VariantWithSizes>, AppError> {
        validate_batch(&variants)?;

        let product = ProductRepository::new(self.db)
            .get_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let payload_skus: Vec<String> = variants.iter().flat_map(|v| v.skus()).collect();
        if let Some(sku) = VariantRepository::new(self.db)
            .find_sku_owner(&payload_skus, None)
            .await?
        {
            return Err(AppError::Conflict(format!("SKU already exists: {}", sku)));
        }

        let txn = self.db.begin().await?;
        let repo = VariantRepository::new(&txn);

        let mut created = Vec::with_capacity(variants.len());
        for params in &variants {
            created.push(
                repo.create(product.id, params)
                    .await
                    .map_err(map_duplicate_key)?,
            );
        }

        if let Some(first) = created.first() {
            self.copy_first_image_if_bare(&txn, product.id, first).await?;
        }

        // Inside the transaction: the batch commits with a consistent cache
        // or not at all.
        StockAggregator::new(&txn)
            .recompute(product.id, StockPolicy::AllSizes)
            .await?;

        txn.commit().await?;

        Ok(created)
    }

    /// Adds a size to an existing variant.
    pub async fn add_size(
        &self,
        variant_id: i32,
        size: NewSizeParams,
    ) -> Result<entity::variant_size::Model, AppError> {
        if size.label.is_empty() {
            return Err(AppError::BadRequest("Size label is required".to_string()));
        }
        if size.sku.is_empty() {
            return Err(AppError::BadRequest("SKU is required".to_string()));
        }
        if size.stock < 0 {
            return Err(AppError::BadRequest("Invalid stock value".to_string()));
        }

        let repo = VariantRepository::new(self.db);
        let existing = repo
            .get_by_id(variant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))?;

        if existing.sizes.iter().any(|s| s.sku == size.sku) {
            return Err(AppError::Conflict(format!(
                "SKU already exists in this variant: {}",
                size.sku
            )));
        }
        if let Some(sku) = repo
            .find_sku_owner(&[size.sku.clone()], Some(variant_id))
            .await?
        {
            return Err(AppError::Conflict(format!("SKU already exists: {}", sku)));
        }

        let position = repo.next_size_position(variant_id).await?;
        let created = repo
            .insert_size(variant_id, &size, position)
            .await
            .map_err(map_duplicate_key)?;

        StockAggregator::new(self.db)
            .recompute_or_log(existing.variant.product_id, StockPolicy::AllSizes)
            .await;

        Ok(created)
    }

    /// Applies a partial update to one size.
    ///
    /// A SKU change re-runs the catalog-wide uniqueness check against all
    /// other variants and against the variant's other sizes.
    pub async fn update_size(
        &self,
        variant_id: i32,
        size_id: i32,
        params: UpdateSizeParams,
    ) -> Result<entity::variant_size::Model, AppError> {
        params.validate()?;

        let repo = VariantRepository::new(self.db);
        let existing = repo
            .get_by_id(variant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))?;

        let size = repo
            .get_size(variant_id, size_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Size not found".to_string()))?;

        if let Some(new_sku) = &params.sku {
            if existing
                .sizes
                .iter()
                .any(|s| s.id != size_id && s.sku == *new_sku)
            {
                return Err(AppError::Conflict(format!(
                    "SKU already exists in this variant: {}",
                    new_sku
                )));
            }
            if let Some(sku) = repo
                .find_sku_owner(&[new_sku.clone()], Some(variant_id))
                .await?
            {
                return Err(AppError::Conflict(format!("SKU already exists: {}", sku)));
            }
        }

        let updated = repo
            .update_size(size, &params)
            .await
            .map_err(map_duplicate_key)?;

        StockAggregator::new(self.db)
            .recompute_or_log(existing.variant.product_id, StockPolicy::AllSizes)
            .await;

        Ok(updated)
    }

    /// Deletes one size and refreshes the product's stock.
    pub async fn delete_size(&self, variant_id: i32, size_id: i32) -> Result<(), AppError> {
        let repo = VariantRepository::new(self.db);
        let existing = repo
            .get_by_id(variant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))?;

        if repo.get_size(variant_id, size_id).await?.is_none() {
            return Err(AppError::NotFound("Size not found".to_string()));
        }

        repo.delete_size(size_id).await?;

        StockAggregator::new(self.db)
            .recompute_or_log(existing.variant.product_id, StockPolicy::AllSizes)
            .await;

        Ok(())
    }

    /// Applies a partial update to a variant.
    ///
    /// Toggling the active flag changes what the aggregation counts, so the
    /// recompute runs here too.
    pub async fn update_variant(
        &self,
        variant_id: i32,
        params: UpdateVariantParams,
    ) -> Result<VariantWithSizes, AppError> {
        let repo = VariantRepository::new(self.db);
        let existing = repo
            .get_by_id(variant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))?;

        let product_id = existing.variant.product_id;
        repo.update(existing.variant, &params).await?;

        StockAggregator::new(self.db)
            .recompute_or_log(product_id, StockPolicy::AllSizes)
            .await;

        let refreshed = repo
            .get_by_id(variant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Variant not found after update".to_string()))?;

        Ok(refreshed)
    }

    /// Deletes a variant and refreshes the parent product's stock.
    pub async fn delete_variant(&self, variant_id: i32) -> Result<(), AppError> {
        let repo = VariantRepository::new(self.db);
        let existing = repo
            .get_by_id(variant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))?;

        repo.delete(variant_id).await?;

        StockAggregator::new(self.db)
            .recompute_or_log(existing.variant.product_id, StockPolicy::AllSizes)
            .await;

        Ok(())
    }

    /// Copies the variant's first image onto a product that has none.
    async fn copy_first_image_if_bare<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        product_id: i32,
        created: &VariantWithSizes,
    ) -> Result<(), AppError> {
        let Some(first_image) = created.images.first() else {
            return Ok(());
        };

        let product_repo = ProductRepository::new(conn);
        if !product_repo.has_images(product_id).await? {
            product_repo
                .add_image(
                    product_id,
                    &ImageParams {
                        public_id: first_image.public_id.clone(),
                        secure_url: first_image.secure_url.clone(),
                    },
                    0,
                )
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::variant::{CreateVariantDto, ImageDto, SizePayloadDto};
    use test_utils::{builder::TestBuilder, factory};

    fn params(color: &str, sizes: Vec<(&str, i32, &str)>) -> CreateVariantParams {
        params_with_images(color, sizes, vec![])
    }

    fn params_with_images(
        color: &str,
        sizes: Vec<(&str, i32, &str)>,
        images: Vec<(&str, &str)>,
    ) -> CreateVariantParams {
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
            images: images
                .into_iter()
                .map(|(public_id, secure_url)| ImageDto {
                    public_id: public_id.to_string(),
                    secure_url: secure_url.to_string(),
                })
                .collect(),
        })
    }

    /// Tests that creating a variant refreshes the product's stock cache.
    ///
    /// Expected: Ok; availableStock mirrors the payload's stock sum
    #[tokio::test]
    async fn create_refreshes_product_stock() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let service = VariantService::new(db);
        service
            .create_variant(
                product.id,
                params("black", vec![("S", 5, "blk-s"), ("M", 0, "blk-m")]),
            )
            .await
            .unwrap();

        let stored = ProductRepository::new(db)
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_stock, 5);
        assert!(stored.has_stock);
    }

    /// Tests that a SKU taken anywhere in the catalog is a conflict and the
    /// catalog is left unchanged.
    ///
    /// Expected: Err(Conflict) naming the SKU; no new variant rows
    #[tokio::test]
    async fn taken_sku_is_conflict_and_leaves_catalog_unchanged() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product_a = factory::product::create_product(db).await.unwrap();
        let product_b = factory::product::create_product(db).await.unwrap();
        let variant = factory::variant::create_variant(db, product_a.id)
            .await
            .unwrap();
        factory::variant::create_size_with_sku(db, variant.id, "S", 5, "TAKEN-9")
            .await
            .unwrap();

        let service = VariantService::new(db);
        let err = service
            .create_variant(product_b.id, params("black", vec![("S", 2, "taken-9")]))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(msg) if msg.contains("TAKEN-9")));
        assert!(service
            .list_by_product(product_b.id)
            .await
            .unwrap()
            .is_empty());
    }

    /// Tests that an imageless product inherits the variant's first image.
    #[tokio::test]
    async fn first_variant_image_copies_to_bare_product() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let service = VariantService::new(db);
        service
            .create_variant(
                product.id,
                params_with_images(
                    "black",
                    vec![("S", 1, "img-s")],
                    vec![("var-img-1", "https://images.example.com/var-img-1.jpg")],
                ),
            )
            .await
            .unwrap();

        let images = ProductRepository::new(db)
            .get_images(product.id)
            .await
            .unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].public_id, "var-img-1");
    }

    /// Tests the all-or-nothing batch: a conflict against the catalog
    /// leaves no partial inserts behind.
    ///
    /// Expected: Err(Conflict); zero variants for the product
    #[tokio::test]
    async fn batch_conflict_rolls_back_every_insert() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product_a = factory::product::create_product(db).await.unwrap();
        let product_b = factory::product::create_product(db).await.unwrap();
        let variant = factory::variant::create_variant(db, product_a.id)
            .await
            .unwrap();
        factory::variant::create_size_with_sku(db, variant.id, "S", 5, "BATCH-DUP")
            .await
            .unwrap();

        let service = VariantService::new(db);
        let err = service
            .create_multiple_variants(
                product_b.id,
                vec![
                    params("black", vec![("S", 1, "batch-a")]),
                    params("white", vec![("S", 1, "batch-dup")]),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert!(service
            .list_by_product(product_b.id)
            .await
            .unwrap()
            .is_empty());
    }

    /// Tests that a successful batch creates every variant and leaves the
    /// stock cache consistent.
    #[tokio::test]
    async fn batch_creates_all_variants_with_consistent_stock() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let service = VariantService::new(db);
        let created = service
            .create_multiple_variants(
                product.id,
                vec![
                    params("black", vec![("S", 2, "multi-blk-s")]),
                    params("white", vec![("S", 3, "multi-wht-s")]),
                ],
            )
            .await
            .unwrap();

        assert_eq!(created.len(), 2);

        let stored = ProductRepository::new(db)
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_stock, 5);
    }

    /// Tests adding a size whose SKU collides inside the same variant.
    ///
    /// Expected: Err(Conflict) mentioning the variant-local collision
    #[tokio::test]
    async fn add_size_rejects_same_variant_sku() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let service = VariantService::new(db);
        let created = service
            .create_variant(product.id, params("black", vec![("S", 5, "local-s")]))
            .await
            .unwrap();

        let err = service
            .add_size(
                created.variant.id,
                NewSizeParams {
                    label: "M".to_string(),
                    stock: 1,
                    sku: "LOCAL-S".to_string(),
                    is_active: true,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(msg) if msg.contains("this variant")));
    }

    /// Tests that deactivating a variant zeroes the product's stock cache.
    #[tokio::test]
    async fn deactivating_variant_zeroes_stock() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let service = VariantService::new(db);
        let created = service
            .create_variant(product.id, params("black", vec![("S", 5, "deact-s")]))
            .await
            .unwrap();

        service
            .update_variant(
                created.variant.id,
                UpdateVariantParams {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = ProductRepository::new(db)
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_stock, 0);
        assert!(!stored.has_stock);
    }

    /// Tests that deleting a size triggers a recompute.
    #[tokio::test]
    async fn deleting_size_refreshes_stock() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let service = VariantService::new(db);
        let created = service
            .create_variant(
                product.id,
                params("black", vec![("S", 5, "del-s"), ("M", 3, "del-m")]),
            )
            .await
            .unwrap();

        service
            .delete_size(created.variant.id, created.sizes[0].id)
            .await
            .unwrap();

        let stored = ProductRepository::new(db)
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_stock, 3);
    }

    /// Tests that updating a size's SKU to one owned by another variant is
    /// a conflict.
    #[tokio::test]
    async fn update_size_rejects_foreign_sku() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let service = VariantService::new(db);
        service
            .create_variant(product.id, params("black", vec![("S", 5, "own-s")]))
            .await
            .unwrap();
        let second = service
            .create_variant(product.id, params("white", vec![("S", 5, "other-s")]))
            .await
            .unwrap();

        let err = service
            .update_size(
                second.variant.id,
                second.sizes[0].id,
                UpdateSizeParams {
                    sku: Some("OWN-S".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    /// Tests that deleting a variant refreshes the parent product's stock.
    #[tokio::test]
    async fn deleting_variant_refreshes_stock() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let service = VariantService::new(db);
        service
            .create_variant(product.id, params("black", vec![("S", 4, "keep-s")]))
            .await
            .unwrap();
        let remove = service
            .create_variant(product.id, params("white", vec![("S", 6, "gone-s")]))
            .await
            .unwrap();

        service.delete_variant(remove.variant.id).await.unwrap();

        let stored = ProductRepository::new(db)
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_stock, 4);
    }
}
