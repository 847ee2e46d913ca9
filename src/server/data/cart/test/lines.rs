use super::*;
use crate::server::model::cart::NewCartLine;

fn new_line(size: &entity::variant_size::Model, product_id: i32, variant_id: i32) -> NewCartLine {
    NewCartLine {
        product_id,
        variant_id,
        size_id: size.id,
        sku: size.sku.clone(),
        title: Some("Crew Neck Tee".to_string()),
        image: None,
        price: 100,
        quantity: 2,
    }
}

/// Tests the full line-row lifecycle: insert, merge-update, delete.
///
/// Expected: each write round-trips through a fresh load
#[tokio::test]
async fn line_rows_round_trip() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_cart_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let (product, variant, sizes) = factory::helpers::create_product_with_variant(db, 5, 3).await?;

    let repo = CartRepository::new(db);
    let owner = CartOwner::User(user.id);
    let aggregate = repo.create(&owner, None).await?;
    let now = Utc::now();

    // Insert
    let inserted = repo
        .insert_line(
            aggregate.cart.id,
            &new_line(&sizes[0], product.id, variant.id),
            0,
            now,
        )
        .await?;
    assert_eq!(inserted.quantity, 2);
    assert_eq!(inserted.price_at, 100);

    // Merge-style update: quantity accumulated, price refreshed
    repo.update_line(inserted.id, 5, 120, now).await?;
    let reloaded = repo.find_active(&owner).await?.unwrap();
    let line = reloaded.get(inserted.id).unwrap();
    assert_eq!(line.quantity, 5);
    assert_eq!(line.price_at, 120);

    // Delete
    repo.delete_line(inserted.id).await?;
    let reloaded = repo.find_active(&owner).await?.unwrap();
    assert!(reloaded.is_empty());

    Ok(())
}

/// Tests that recalculated totals persist onto the cart row.
///
/// Expected: stored subtotal/total match the aggregate's recalculation
#[tokio::test]
async fn totals_persist_on_cart_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_cart_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let (product, variant, sizes) = factory::helpers::create_product_with_variant(db, 5, 3).await?;

    let repo = CartRepository::new(db);
    let owner = CartOwner::User(user.id);
    let created = repo.create(&owner, None).await?;
    let now = Utc::now();

    repo.insert_line(
        created.cart.id,
        &new_line(&sizes[0], product.id, variant.id),
        0,
        now,
    )
    .await?;

    let mut aggregate = repo.find_active(&owner).await?.unwrap();
    let totals = aggregate.recalculate();
    repo.update_totals(created.cart.id, totals, now).await?;

    let stored = repo.find_active(&owner).await?.unwrap();
    assert_eq!(stored.cart.subtotal, 200);
    assert_eq!(stored.cart.total, 200);

    Ok(())
}
