use super::*;
use crate::server::model::variant::ImageParams;

/// Tests the has-images guard and the image append used when a variant's
/// first image is copied onto an imageless product.
///
/// Expected: false before, true after the copy
#[tokio::test]
async fn has_images_flips_after_copy() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::create_product(db).await?;

    let repo = ProductRepository::new(db);
    assert!(!repo.has_images(product.id).await?);

    repo.add_image(
        product.id,
        &ImageParams {
            public_id: "variant-img-1".to_string(),
            secure_url: "https://images.example.com/variant-img-1.jpg".to_string(),
        },
        0,
    )
    .await?;

    assert!(repo.has_images(product.id).await?);
    let images = repo.get_images(product.id).await?;
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].public_id, "variant-img-1");

    Ok(())
}
