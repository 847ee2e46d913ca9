//! Stock aggregator.
//!
//! Recomputes a product's materialized `available_stock`/`has_stock` fields
//! from the current variant state. The computation reads variants and
//! overwrites the cache, so running it twice without an intervening variant
//! change yields the same result and concurrent runs converge; it is invoked
//! synchronously after every variant or size mutation.

use sea_orm::ConnectionTrait;

use crate::server::{data::stock::StockRepository, error::AppError, model::stock::StockPolicy};

pub struct StockAggregator<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StockAggregator<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Recomputes and persists the product's aggregated stock.
    ///
    /// # Arguments
    /// - `product_id`: product whose cache to refresh
    /// - `policy`: whether size-level active flags participate
    ///
    /// # Returns
    /// - `Ok(total)`: the freshly aggregated stock
    /// - `Err(AppError)`: database error
    pub async fn recompute(
        &self,
        product_id: i32,
        policy: StockPolicy,
    ) -> Result<i64, AppError> {
        let repo = StockRepository::new(self.db);

        let total = repo.sum_available(product_id, policy).await?;
        repo.write(product_id, total).await?;

        Ok(total)
    }

    /// Best-effort recompute for post-commit refreshes.
    ///
    /// The cache is eventually consistent: a failed refresh must not roll
    /// back the variant mutation that triggered it, so the error is logged
    /// and swallowed.
    pub async fn recompute_or_log(&self, product_id: i32, policy: StockPolicy) {
        if let Err(err) = self.recompute(product_id, policy).await {
            tracing::error!(
                "Stock recompute failed for product {}: {}",
                product_id,
                err
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests the concrete recompute scenario: one active variant with sizes
    /// of stock 5 and 0 materializes availableStock 5, hasStock true.
    ///
    /// Expected: Ok(5) and the product row carries 5/true
    #[tokio::test]
    async fn recompute_materializes_sum_onto_product() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (product, _variant, _sizes) = factory::helpers::create_product_with_variant(db, 5, 0)
            .await
            .unwrap();

        let aggregator = StockAggregator::new(db);
        let total = aggregator
            .recompute(product.id, StockPolicy::AllSizes)
            .await
            .unwrap();

        assert_eq!(total, 5);

        let stored = crate::server::data::product::ProductRepository::new(db)
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.available_stock, 5);
        assert!(stored.has_stock);
    }

    /// Tests that recomputing twice with no intervening variant change is a
    /// no-op: same total, same materialized fields.
    #[tokio::test]
    async fn recompute_is_idempotent() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (product, _variant, _sizes) = factory::helpers::create_product_with_variant(db, 4, 2)
            .await
            .unwrap();

        let aggregator = StockAggregator::new(db);
        let first = aggregator
            .recompute(product.id, StockPolicy::AllSizes)
            .await
            .unwrap();
        let second = aggregator
            .recompute(product.id, StockPolicy::AllSizes)
            .await
            .unwrap();

        assert_eq!(first, 6);
        assert_eq!(first, second);
    }

    /// Tests that a product with no variants materializes zero stock.
    #[tokio::test]
    async fn empty_product_has_no_stock() {
        let test = TestBuilder::new()
            .with_catalog_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let product = factory::product::create_product(db).await.unwrap();

        let aggregator = StockAggregator::new(db);
        let total = aggregator
            .recompute(product.id, StockPolicy::AllSizes)
            .await
            .unwrap();

        assert_eq!(total, 0);

        let stored = crate::server::data::product::ProductRepository::new(db)
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.has_stock);
    }
}
