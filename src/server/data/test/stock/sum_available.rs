use super::*;

/// Tests the minimal aggregation policy over a single active variant.
///
/// Concrete scenario: sizes with stock 5 and 0 under one active variant sum
/// to 5, and a zero-stock size contributes nothing without being excluded.
///
/// Expected: Ok(5)
#[tokio::test]
async fn sums_sizes_of_active_variants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (product, _variant, _sizes) =
        factory::helpers::create_product_with_variant(db, 5, 0).await?;

    let repo = StockRepository::new(db);
    let total = repo.sum_available(product.id, StockPolicy::AllSizes).await?;

    assert_eq!(total, 5);

    Ok(())
}

/// Tests that inactive variants never count, under either policy.
///
/// Expected: Ok(0) with only an inactive variant present
#[tokio::test]
async fn excludes_inactive_variants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;
    let variant = factory::variant::create_variant_with_active(db, product.id, false).await?;
    factory::variant::create_size(db, variant.id, "S", 7).await?;

    let repo = StockRepository::new(db);

    assert_eq!(
        repo.sum_available(product.id, StockPolicy::AllSizes).await?,
        0
    );
    assert_eq!(
        repo.sum_available(product.id, StockPolicy::ActiveSizesOnly)
            .await?,
        0
    );

    Ok(())
}

/// Tests that the size-level policy is opt-in, not hard-coded.
///
/// An inactive size counts under the default policy but not under
/// `ActiveSizesOnly`.
///
/// Expected: 8 under AllSizes, 5 under ActiveSizesOnly
#[tokio::test]
async fn size_level_filter_is_a_policy_choice() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;
    let variant = factory::variant::create_variant(db, product.id).await?;
    factory::variant::create_size(db, variant.id, "S", 5).await?;
    let dormant = factory::variant::create_size(db, variant.id, "M", 3).await?;

    // Deactivate the second size directly.
    use sea_orm::{ActiveModelTrait, ActiveValue};
    entity::variant_size::ActiveModel {
        id: ActiveValue::Unchanged(dormant.id),
        is_active: ActiveValue::Set(false),
        ..Default::default()
    }
    .update(db)
    .await?;

    let repo = StockRepository::new(db);

    assert_eq!(
        repo.sum_available(product.id, StockPolicy::AllSizes).await?,
        8
    );
    assert_eq!(
        repo.sum_available(product.id, StockPolicy::ActiveSizesOnly)
            .await?,
        5
    );

    Ok(())
}

/// Tests that stock from multiple variants accumulates.
#[tokio::test]
async fn sums_across_variants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;
    let variant_a = factory::variant::create_variant(db, product.id).await?;
    let variant_b = factory::variant::create_variant(db, product.id).await?;
    factory::variant::create_size(db, variant_a.id, "S", 4).await?;
    factory::variant::create_size(db, variant_b.id, "S", 6).await?;

    let repo = StockRepository::new(db);
    let total = repo.sum_available(product.id, StockPolicy::AllSizes).await?;

    assert_eq!(total, 10);

    Ok(())
}
