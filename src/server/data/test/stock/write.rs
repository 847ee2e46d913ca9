use super::*;

/// Tests that writing stock overwrites both materialized fields.
///
/// Expected: available_stock and has_stock mirror the written total
#[tokio::test]
async fn write_overwrites_materialized_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;

    let repo = StockRepository::new(db);
    repo.write(product.id, 5).await?;

    let stored = crate::server::data::product::ProductRepository::new(db)
        .get_by_id(product.id)
        .await?
        .unwrap();
    assert_eq!(stored.available_stock, 5);
    assert!(stored.has_stock);

    // Overwrite, never increment: a second write replaces the value.
    repo.write(product.id, 0).await?;

    let stored = crate::server::data::product::ProductRepository::new(db)
        .get_by_id(product.id)
        .await?
        .unwrap();
    assert_eq!(stored.available_stock, 0);
    assert!(!stored.has_stock);

    Ok(())
}
