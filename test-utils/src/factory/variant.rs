//! Variant and size factories for creating test catalog entries.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Creates an active variant for the given product with a unique colour.
///
/// # Arguments
/// - `db` - Database connection
/// - `product_id` - Parent product ID
///
/// # Returns
/// - `Ok(entity::variant::Model)` - Created variant entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_variant(
    db: &DatabaseConnection,
    product_id: i32,
) -> Result<entity::variant::Model, DbErr> {
    create_variant_with_active(db, product_id, true).await
}

/// Creates a variant with an explicit active flag.
pub async fn create_variant_with_active(
    db: &DatabaseConnection,
    product_id: i32,
    is_active: bool,
) -> Result<entity::variant::Model, DbErr> {
    let id = next_id();
    let now = Utc::now();

    entity::variant::ActiveModel {
        id: ActiveValue::NotSet,
        product_id: ActiveValue::Set(product_id),
        color: ActiveValue::Set(format!("color-{}", id)),
        is_active: ActiveValue::Set(is_active),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

/// Creates one size row with a unique SKU.
///
/// # Arguments
/// - `db` - Database connection
/// - `variant_id` - Parent variant ID
/// - `label` - Size label, e.g. "M"
/// - `stock` - Units in stock
pub async fn create_size(
    db: &DatabaseConnection,
    variant_id: i32,
    label: &str,
    stock: i32,
) -> Result<entity::variant_size::Model, DbErr> {
    let id = next_id();
    create_size_with_sku(db, variant_id, label, stock, &format!("SKU-{:06}", id)).await
}

/// Creates one size row with an explicit SKU.
///
/// Useful for conflict tests where the SKU value is the subject.
pub async fn create_size_with_sku(
    db: &DatabaseConnection,
    variant_id: i32,
    label: &str,
    stock: i32,
    sku: &str,
) -> Result<entity::variant_size::Model, DbErr> {
    entity::variant_size::ActiveModel {
        id: ActiveValue::NotSet,
        variant_id: ActiveValue::Set(variant_id),
        label: ActiveValue::Set(label.to_string()),
        stock: ActiveValue::Set(stock),
        sku: ActiveValue::Set(sku.to_string()),
        is_active: ActiveValue::Set(true),
        position: ActiveValue::Set(0),
    }
    .insert(db)
    .await
}

/// Creates several sizes for a variant, one per (label, stock) pair.
pub async fn create_sizes(
    db: &DatabaseConnection,
    variant_id: i32,
    sizes: &[(&str, i32)],
) -> Result<Vec<entity::variant_size::Model>, DbErr> {
    let mut created = Vec::with_capacity(sizes.len());
    for (label, stock) in sizes {
        created.push(create_size(db, variant_id, label, *stock).await?);
    }
    Ok(created)
}
