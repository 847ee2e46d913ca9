use super::*;

/// Tests creating a variant with ordered sizes.
///
/// Expected: Ok with sizes persisted in payload order and SKUs stored in
/// normalized upper-case form
#[tokio::test]
async fn creates_variant_with_sizes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;

    let repo = VariantRepository::new(db);
    let created = repo
        .create(product.id, &params("black", vec![("S", 5, "tee-blk-s"), ("M", 3, "tee-blk-m")]))
        .await?;

    assert_eq!(created.variant.product_id, product.id);
    assert_eq!(created.sizes.len(), 2);
    assert_eq!(created.sizes[0].sku, "TEE-BLK-S");
    assert_eq!(created.sizes[0].position, 0);
    assert_eq!(created.sizes[1].sku, "TEE-BLK-M");
    assert_eq!(created.sizes[1].position, 1);

    Ok(())
}

/// Tests that the unique SKU index rejects a duplicate insert even when the
/// pre-check was skipped.
///
/// The storage-level constraint is the real guard; this pins down that a
/// race past the pre-check still surfaces as a unique-constraint violation.
///
/// Expected: Err whose `sql_err()` is a unique-constraint violation
#[tokio::test]
async fn duplicate_sku_insert_hits_unique_index() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;

    let repo = VariantRepository::new(db);
    repo.create(product.id, &params("black", vec![("S", 5, "dup-1")]))
        .await?;

    let err = repo
        .create(product.id, &params("white", vec![("S", 5, "DUP-1")]))
        .await
        .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
