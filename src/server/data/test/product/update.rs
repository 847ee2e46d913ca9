use super::*;

/// Tests that a partial update leaves the other fields intact.
///
/// Expected: price changed, title and slug untouched
#[tokio::test]
async fn partial_update_preserves_other_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);
    let (product, _) = repo.create(create_params("stable-tee")).await?;
    let title = product.title.clone();

    let updated = repo
        .update(
            product,
            UpdateProductParams {
                price: Some(60_000),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.price, 60_000);
    assert_eq!(updated.title, title);
    assert_eq!(updated.slug, "stable-tee");

    Ok(())
}

/// Tests that deleting a product cascades to its variants and sizes.
///
/// Expected: variant lookup empty after product deletion
#[tokio::test]
async fn delete_cascades_to_variants() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (product, variant, _sizes) =
        factory::helpers::create_product_with_variant(db, 5, 3).await?;

    let repo = ProductRepository::new(db);
    repo.delete(product.id).await?;

    assert!(repo.get_by_id(product.id).await?.is_none());
    let variants = crate::server::data::variant::VariantRepository::new(db)
        .get_by_id(variant.id)
        .await?;
    assert!(variants.is_none());

    Ok(())
}
