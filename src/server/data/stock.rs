//! Stock aggregation queries.
//!
//! Reads the variant/size rows a recompute sums over, and overwrites the
//! product's materialized stock fields. Only the stock aggregator writes
//! these fields; every other write path goes through it.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, JoinType,
    QueryFilter, QuerySelect, RelationTrait,
};

use crate::server::model::stock::StockPolicy;

pub struct StockRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StockRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Sums stock across the product's active variants.
    ///
    /// The variant-level active flag always applies; `policy` decides
    /// whether size-level activity is also required.
    ///
    /// # Returns
    /// - `Ok(total)`: aggregated stock, zero when no sizes qualify
    /// - `Err(DbErr)`: database error
    pub async fn sum_available(
        &self,
        product_id: i32,
        policy: StockPolicy,
    ) -> Result<i64, DbErr> {
        let mut query = entity::prelude::VariantSize::find()
            .join(
                JoinType::InnerJoin,
                entity::variant_size::Relation::Variant.def(),
            )
            .filter(entity::variant::Column::ProductId.eq(product_id))
            .filter(entity::variant::Column::IsActive.eq(true));

        if policy == StockPolicy::ActiveSizesOnly {
            query = query.filter(entity::variant_size::Column::IsActive.eq(true));
        }

        let sizes = query.all(self.db).await?;

        Ok(sizes.iter().map(|size| size.stock as i64).sum())
    }

    /// Overwrites the product's materialized stock fields.
    ///
    /// Always a plain overwrite, never an increment, so concurrent
    /// recomputes converge on the latest read.
    pub async fn write(&self, product_id: i32, total: i64) -> Result<(), DbErr> {
        entity::product::ActiveModel {
            id: ActiveValue::Unchanged(product_id),
            available_stock: ActiveValue::Set(total),
            has_stock: ActiveValue::Set(total > 0),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }
}
