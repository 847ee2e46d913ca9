use super::*;

/// Tests creating a product and finding it by slug.
///
/// Expected: Ok with fresh stock fields zeroed
#[tokio::test]
async fn creates_product_with_zero_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);
    let (product, images) = repo.create(create_params("crew-neck-tee")).await?;

    assert_eq!(product.slug, "crew-neck-tee");
    assert_eq!(product.available_stock, 0);
    assert!(!product.has_stock);
    assert!(images.is_empty());

    let found = repo.get_by_slug("crew-neck-tee").await?;
    assert_eq!(found.map(|p| p.id), Some(product.id));

    Ok(())
}

/// Tests that a duplicate slug is rejected by the unique index.
///
/// Expected: Err with a unique-constraint violation
#[tokio::test]
async fn duplicate_slug_is_rejected() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);
    repo.create(create_params("same-slug")).await?;

    let err = repo.create(create_params("same-slug")).await.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
