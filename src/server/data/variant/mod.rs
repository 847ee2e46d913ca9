//! Variant data repository.
//!
//! Handles variant and size rows plus the catalog-wide SKU lookup backing
//! the registry's uniqueness pre-check. The unique index on the SKU column
//! remains the authoritative guard; callers translate its duplicate-key
//! error into the same conflict outcome as the pre-check.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::variant::{
    CreateVariantParams, NewSizeParams, UpdateSizeParams, UpdateVariantParams, VariantWithSizes,
};

#[cfg(test)]
mod test;

pub struct VariantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VariantRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a variant with its sizes and images.
    ///
    /// Sizes keep payload order through their position column. Runs row by
    /// row; callers wanting atomicity pass a transaction connection.
    ///
    /// # Returns
    /// - `Ok(VariantWithSizes)`: the created variant
    /// - `Err(DbErr)`: database error, including unique-index violations
    pub async fn create(
        &self,
        product_id: i32,
        params: &CreateVariantParams,
    ) -> Result<VariantWithSizes, DbErr> {
        let now = Utc::now();

        let variant = entity::variant::ActiveModel {
            product_id: ActiveValue::Set(product_id),
            color: ActiveValue::Set(params.color.clone()),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut sizes = Vec::with_capacity(params.sizes.len());
        for (position, size) in params.sizes.iter().enumerate() {
            sizes.push(self.insert_size(variant.id, size, position as i32).await?);
        }

        let mut images = Vec::with_capacity(params.images.len());
        for (position, image) in params.images.iter().enumerate() {
            let image = entity::variant_image::ActiveModel {
                variant_id: ActiveValue::Set(variant.id),
                public_id: ActiveValue::Set(image.public_id.clone()),
                secure_url: ActiveValue::Set(image.secure_url.clone()),
                position: ActiveValue::Set(position as i32),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            images.push(image);
        }

        Ok(VariantWithSizes {
            variant,
            sizes,
            images,
        })
    }

    /// Gets a variant by ID with its sizes and images.
    pub async fn get_by_id(&self, variant_id: i32) -> Result<Option<VariantWithSizes>, DbErr> {
        let Some(variant) = entity::prelude::Variant::find_by_id(variant_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let sizes = entity::prelude::VariantSize::find()
            .filter(entity::variant_size::Column::VariantId.eq(variant_id))
            .order_by_asc(entity::variant_size::Column::Position)
            .all(self.db)
            .await?;

        let images = entity::prelude::VariantImage::find()
            .filter(entity::variant_image::Column::VariantId.eq(variant_id))
            .order_by_asc(entity::variant_image::Column::Position)
            .all(self.db)
            .await?;

        Ok(Some(VariantWithSizes {
            variant,
            sizes,
            images,
        }))
    }

    /// Lists a product's variants, each with sizes and images.
    pub async fn list_by_product(&self, product_id: i32) -> Result<Vec<VariantWithSizes>, DbErr> {
        let variants = entity::prelude::Variant::find()
            .filter(entity::variant::Column::ProductId.eq(product_id))
            .order_by_asc(entity::variant::Column::Id)
            .all(self.db)
            .await?;

        let mut result = Vec::with_capacity(variants.len());
        for variant in variants {
            let sizes = entity::prelude::VariantSize::find()
                .filter(entity::variant_size::Column::VariantId.eq(variant.id))
                .order_by_asc(entity::variant_size::Column::Position)
                .all(self.db)
                .await?;
            let images = entity::prelude::VariantImage::find()
                .filter(entity::variant_image::Column::VariantId.eq(variant.id))
                .order_by_asc(entity::variant_image::Column::Position)
                .all(self.db)
                .await?;
            result.push(VariantWithSizes {
                variant,
                sizes,
                images,
            });
        }

        Ok(result)
    }

    /// Finds a SKU from the given set that is already taken anywhere in the
    /// catalog, optionally ignoring one variant (for same-variant updates).
    ///
    /// # Returns
    /// - `Ok(Some(sku))`: the first offending SKU found
    /// - `Ok(None)`: none of the SKUs are taken
    pub async fn find_sku_owner(
        &self,
        skus: &[String],
        exclude_variant: Option<i32>,
    ) -> Result<Option<String>, DbErr> {
        if skus.is_empty() {
            return Ok(None);
        }

        let mut query = entity::prelude::VariantSize::find()
            .filter(entity::variant_size::Column::Sku.is_in(skus.iter().cloned()));

        if let Some(variant_id) = exclude_variant {
            query = query.filter(entity::variant_size::Column::VariantId.ne(variant_id));
        }

        Ok(query.one(self.db).await?.map(|size| size.sku))
    }

    /// Appends one size row to a variant.
    pub async fn insert_size(
        &self,
        variant_id: i32,
        size: &NewSizeParams,
        position: i32,
    ) -> Result<entity::variant_size::Model, DbErr> {
        entity::variant_size::ActiveModel {
            variant_id: ActiveValue::Set(variant_id),
            label: ActiveValue::Set(size.label.clone()),
            stock: ActiveValue::Set(size.stock),
            sku: ActiveValue::Set(size.sku.clone()),
            is_active: ActiveValue::Set(size.is_active),
            position: ActiveValue::Set(position),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Position for a size appended at the end of a variant.
    pub async fn next_size_position(&self, variant_id: i32) -> Result<i32, DbErr> {
        let sizes = entity::prelude::VariantSize::find()
            .filter(entity::variant_size::Column::VariantId.eq(variant_id))
            .all(self.db)
            .await?;

        Ok(sizes
            .iter()
            .map(|size| size.position)
            .max()
            .map_or(0, |max| max + 1))
    }

    /// Gets one size row, scoped to its variant.
    pub async fn get_size(
        &self,
        variant_id: i32,
        size_id: i32,
    ) -> Result<Option<entity::variant_size::Model>, DbErr> {
        entity::prelude::VariantSize::find_by_id(size_id)
            .filter(entity::variant_size::Column::VariantId.eq(variant_id))
            .one(self.db)
            .await
    }

    /// Applies a partial update to one size row.
    pub async fn update_size(
        &self,
        size: entity::variant_size::Model,
        params: &UpdateSizeParams,
    ) -> Result<entity::variant_size::Model, DbErr> {
        let mut active_model: entity::variant_size::ActiveModel = size.into();

        if let Some(label) = &params.label {
            active_model.label = ActiveValue::Set(label.clone());
        }
        if let Some(stock) = params.stock {
            active_model.stock = ActiveValue::Set(stock);
        }
        if let Some(sku) = &params.sku {
            active_model.sku = ActiveValue::Set(sku.clone());
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }

        active_model.update(self.db).await
    }

    /// Deletes one size row.
    pub async fn delete_size(&self, size_id: i32) -> Result<(), DbErr> {
        entity::prelude::VariantSize::delete_by_id(size_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Applies a partial update to a variant.
    pub async fn update(
        &self,
        variant: entity::variant::Model,
        params: &UpdateVariantParams,
    ) -> Result<entity::variant::Model, DbErr> {
        let mut active_model: entity::variant::ActiveModel = variant.into();

        if let Some(color) = &params.color {
            active_model.color = ActiveValue::Set(color.clone());
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        active_model.update(self.db).await
    }

    /// Deletes a variant; sizes and images cascade.
    pub async fn delete(&self, variant_id: i32) -> Result<(), DbErr> {
        entity::prelude::Variant::delete_by_id(variant_id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
