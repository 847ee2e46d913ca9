use super::*;

/// Tests that a taken SKU anywhere in the catalog is reported.
///
/// Expected: Ok(Some) naming the offending SKU
#[tokio::test]
async fn reports_taken_sku_across_catalog() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;
    let variant = factory::variant::create_variant(db, product.id).await?;
    factory::variant::create_size_with_sku(db, variant.id, "S", 5, "TAKEN-1").await?;

    let repo = VariantRepository::new(db);
    let conflict = repo
        .find_sku_owner(&["FRESH-1".to_string(), "TAKEN-1".to_string()], None)
        .await?;

    assert_eq!(conflict.as_deref(), Some("TAKEN-1"));

    Ok(())
}

/// Tests that unclaimed SKUs pass the check.
///
/// Expected: Ok(None)
#[tokio::test]
async fn passes_fresh_skus() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VariantRepository::new(db);
    let conflict = repo.find_sku_owner(&["FRESH-1".to_string()], None).await?;

    assert!(conflict.is_none());

    Ok(())
}

/// Tests that the exclusion window ignores the variant being updated.
///
/// A SKU owned by the excluded variant itself must not count as a conflict,
/// while the same SKU on any other variant must.
///
/// Expected: Ok(None) when excluded, Ok(Some) otherwise
#[tokio::test]
async fn excludes_own_variant_from_conflict() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;
    let variant = factory::variant::create_variant(db, product.id).await?;
    factory::variant::create_size_with_sku(db, variant.id, "S", 5, "MINE-1").await?;

    let repo = VariantRepository::new(db);

    let excluded = repo
        .find_sku_owner(&["MINE-1".to_string()], Some(variant.id))
        .await?;
    assert!(excluded.is_none());

    let not_excluded = repo.find_sku_owner(&["MINE-1".to_string()], None).await?;
    assert_eq!(not_excluded.as_deref(), Some("MINE-1"));

    Ok(())
}
