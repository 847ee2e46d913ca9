use super::*;
use crate::server::model::variant::UpdateVariantParams;

/// Tests updating a variant's active flag.
///
/// Expected: Ok with the flag flipped and colour untouched
#[tokio::test]
async fn updates_active_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;
    let variant = factory::variant::create_variant(db, product.id).await?;
    let color = variant.color.clone();

    let repo = VariantRepository::new(db);
    let updated = repo
        .update(
            variant,
            &UpdateVariantParams {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;

    assert!(!updated.is_active);
    assert_eq!(updated.color, color);

    Ok(())
}

/// Tests that deleting a variant cascades to its sizes.
///
/// Expected: Ok, variant and size rows both gone
#[tokio::test]
async fn delete_cascades_to_sizes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;
    let variant = factory::variant::create_variant(db, product.id).await?;
    let size = factory::variant::create_size(db, variant.id, "S", 5).await?;

    let repo = VariantRepository::new(db);
    repo.delete(variant.id).await?;

    assert!(repo.get_by_id(variant.id).await?.is_none());
    // The SKU is released once the size rows cascade away.
    assert!(repo.find_sku_owner(&[size.sku], None).await?.is_none());

    Ok(())
}
