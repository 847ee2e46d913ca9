//! Cart factories for creating test carts and line items.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an empty active cart owned by the given user.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Owning user ID
///
/// # Returns
/// - `Ok(entity::cart::Model)` - Created cart entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_cart_for_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::cart::Model, DbErr> {
    let now = Utc::now();

    entity::cart::ActiveModel {
        id: ActiveValue::NotSet,
        user_id: ActiveValue::Set(Some(user_id)),
        guest_id: ActiveValue::Set(None),
        subtotal: ActiveValue::Set(0),
        shipping: ActiveValue::Set(0),
        discount: ActiveValue::Set(0),
        total: ActiveValue::Set(0),
        currency: ActiveValue::Set("INR".to_string()),
        is_active: ActiveValue::Set(true),
        expires_at: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

/// Creates an empty active cart owned by a guest session.
pub async fn create_cart_for_guest(
    db: &DatabaseConnection,
    guest_id: &str,
) -> Result<entity::cart::Model, DbErr> {
    let now = Utc::now();

    entity::cart::ActiveModel {
        id: ActiveValue::NotSet,
        user_id: ActiveValue::Set(None),
        guest_id: ActiveValue::Set(Some(guest_id.to_string())),
        subtotal: ActiveValue::Set(0),
        shipping: ActiveValue::Set(0),
        discount: ActiveValue::Set(0),
        total: ActiveValue::Set(0),
        currency: ActiveValue::Set("INR".to_string()),
        is_active: ActiveValue::Set(true),
        expires_at: ActiveValue::Set(Some(now + chrono::Duration::days(30))),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

/// Adds a line item to a cart.
///
/// # Arguments
/// - `db` - Database connection
/// - `cart_id` - Cart to add the line to
/// - `size` - Size row being purchased (supplies product/variant/sku refs)
/// - `price_at` - Captured unit price in minor units
/// - `quantity` - Units ordered
pub async fn create_cart_item(
    db: &DatabaseConnection,
    cart_id: i32,
    product_id: i32,
    variant_id: i32,
    size: &entity::variant_size::Model,
    price_at: i64,
    quantity: i32,
) -> Result<entity::cart_item::Model, DbErr> {
    entity::cart_item::ActiveModel {
        id: ActiveValue::NotSet,
        cart_id: ActiveValue::Set(cart_id),
        product_id: ActiveValue::Set(product_id),
        variant_id: ActiveValue::Set(variant_id),
        size_id: ActiveValue::Set(size.id),
        sku: ActiveValue::Set(size.sku.clone()),
        title: ActiveValue::Set(None),
        image: ActiveValue::Set(None),
        price_at: ActiveValue::Set(price_at),
        quantity: ActiveValue::Set(quantity),
        position: ActiveValue::Set(0),
        added_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
