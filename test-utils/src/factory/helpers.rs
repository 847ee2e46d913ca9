//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a product with one variant carrying two sizes.
///
/// This is a convenience method that creates:
/// 1. Product
/// 2. Variant (default colour)
/// 3. Two sizes with unique SKUs and the given stock levels
///
/// # Arguments
/// - `db` - Database connection
/// - `stock_a` - Stock for the first size
/// - `stock_b` - Stock for the second size
///
/// # Returns
/// - `Ok((product, variant, sizes))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_product_with_variant(
    db: &DatabaseConnection,
    stock_a: i32,
    stock_b: i32,
) -> Result<
    (
        entity::product::Model,
        entity::variant::Model,
        Vec<entity::variant_size::Model>,
    ),
    DbErr,
> {
    let product = crate::factory::product::create_product(db).await?;
    let variant = crate::factory::variant::create_variant(db, product.id).await?;
    let sizes = crate::factory::variant::create_sizes(
        db,
        variant.id,
        &[("S", stock_a), ("M", stock_b)],
    )
    .await?;

    Ok((product, variant, sizes))
}
