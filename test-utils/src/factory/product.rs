//! Product factory for creating test product entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;
use crate::fixture;

/// Creates a product with a unique slug and fixture defaults.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::product::Model)` - Created product entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_product(db: &DatabaseConnection) -> Result<entity::product::Model, DbErr> {
    let id = next_id();
    let defaults = fixture::product::entity_builder()
        .title(format!("Product {}", id))
        .slug(format!("product-{}", id))
        .build();

    insert(db, defaults).await
}

/// Creates a product with a specific listed price, in minor units.
pub async fn create_product_with_price(
    db: &DatabaseConnection,
    price: i64,
) -> Result<entity::product::Model, DbErr> {
    let id = next_id();
    let defaults = fixture::product::entity_builder()
        .title(format!("Product {}", id))
        .slug(format!("product-{}", id))
        .price(price)
        .build();

    insert(db, defaults).await
}

async fn insert(
    db: &DatabaseConnection,
    model: entity::product::Model,
) -> Result<entity::product::Model, DbErr> {
    entity::product::ActiveModel {
        id: ActiveValue::NotSet,
        title: ActiveValue::Set(model.title),
        slug: ActiveValue::Set(model.slug),
        description: ActiveValue::Set(model.description),
        category: ActiveValue::Set(model.category),
        price: ActiveValue::Set(model.price),
        discount_percent: ActiveValue::Set(model.discount_percent),
        hsn_code: ActiveValue::Set(model.hsn_code),
        is_active: ActiveValue::Set(model.is_active),
        available_stock: ActiveValue::Set(model.available_stock),
        has_stock: ActiveValue::Set(model.has_stock),
        created_at: ActiveValue::Set(Utc::now()),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
