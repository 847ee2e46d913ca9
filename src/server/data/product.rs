//! Product data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::product::{
    CreateProductParams, ProductQueryParams, UpdateProductParams,
};
use crate::server::model::variant::ImageParams;

pub struct ProductRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a product with its images.
    pub async fn create(
        &self,
        params: CreateProductParams,
    ) -> Result<(entity::product::Model, Vec<entity::product_image::Model>), DbErr> {
        let now = Utc::now();

        let product = entity::product::ActiveModel {
            title: ActiveValue::Set(params.title),
            slug: ActiveValue::Set(params.slug),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            price: ActiveValue::Set(params.price),
            discount_percent: ActiveValue::Set(params.discount_percent),
            hsn_code: ActiveValue::Set(params.hsn_code),
            is_active: ActiveValue::Set(true),
            available_stock: ActiveValue::Set(0),
            has_stock: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut images = Vec::with_capacity(params.images.len());
        for (position, image) in params.images.into_iter().enumerate() {
            images.push(self.add_image(product.id, &image, position as i32).await?);
        }

        Ok((product, images))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::product::Model>, DbErr> {
        entity::prelude::Product::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<entity::product::Model>, DbErr> {
        entity::prelude::Product::find()
            .filter(entity::product::Column::Slug.eq(slug))
            .one(self.db)
            .await
    }

    /// Images for one product, in display order.
    pub async fn get_images(
        &self,
        product_id: i32,
    ) -> Result<Vec<entity::product_image::Model>, DbErr> {
        entity::prelude::ProductImage::find()
            .filter(entity::product_image::Column::ProductId.eq(product_id))
            .order_by_asc(entity::product_image::Column::Position)
            .all(self.db)
            .await
    }

    /// Whether the product has any images at all.
    ///
    /// Variant creation copies the variant's first image onto products that
    /// have none; this is its guard query.
    pub async fn has_images(&self, product_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::ProductImage::find()
            .filter(entity::product_image::Column::ProductId.eq(product_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Appends one image to a product.
    pub async fn add_image(
        &self,
        product_id: i32,
        image: &ImageParams,
        position: i32,
    ) -> Result<entity::product_image::Model, DbErr> {
        entity::product_image::ActiveModel {
            product_id: ActiveValue::Set(product_id),
            public_id: ActiveValue::Set(image.public_id.clone()),
            secure_url: ActiveValue::Set(image.secure_url.clone()),
            position: ActiveValue::Set(position),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Paginated catalog listing with optional filters.
    ///
    /// # Arguments
    /// - `params`: page (0-indexed), per_page, and optional category /
    ///   title-substring / in-stock filters
    ///
    /// # Returns
    /// - `Ok((products, total))`: page of products and total matching count
    pub async fn list(
        &self,
        params: &ProductQueryParams,
    ) -> Result<(Vec<entity::product::Model>, u64), DbErr> {
        let mut query = entity::prelude::Product::find()
            .filter(entity::product::Column::IsActive.eq(true))
            .order_by_desc(entity::product::Column::CreatedAt)
            .order_by_desc(entity::product::Column::Id);

        if let Some(category) = &params.category {
            query = query.filter(entity::product::Column::Category.eq(category.as_str()));
        }
        if let Some(text) = &params.query {
            query = query.filter(entity::product::Column::Title.contains(text.as_str()));
        }
        if params.in_stock {
            query = query.filter(entity::product::Column::HasStock.eq(true));
        }

        let paginator = query.paginate(self.db, params.per_page.max(1));
        let total = paginator.num_items().await?;
        let products = paginator.fetch_page(params.page).await?;

        Ok((products, total))
    }

    /// Applies a partial update to a product.
    pub async fn update(
        &self,
        product: entity::product::Model,
        params: UpdateProductParams,
    ) -> Result<entity::product::Model, DbErr> {
        let mut active_model: entity::product::ActiveModel = product.into();

        if let Some(title) = params.title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(category) = params.category {
            active_model.category = ActiveValue::Set(category);
        }
        if let Some(price) = params.price {
            active_model.price = ActiveValue::Set(price);
        }
        if let Some(discount_percent) = params.discount_percent {
            active_model.discount_percent = ActiveValue::Set(discount_percent);
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        active_model.update(self.db).await
    }

    /// Deletes a product; variants, sizes, and images cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Product::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
