use super::*;

/// Tests the category and in-stock filters together.
///
/// Expected: only the stocked product in the requested category
#[tokio::test]
async fn filters_by_category_and_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);

    let (stocked, _) = repo.create(create_params("stocked-tee")).await?;
    crate::server::data::stock::StockRepository::new(db)
        .write(stocked.id, 3)
        .await?;
    repo.create(create_params("unstocked-tee")).await?;

    let (products, total) = repo
        .list(&ProductQueryParams {
            page: 0,
            per_page: 10,
            category: Some("apparel".to_string()),
            query: None,
            in_stock: true,
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(products[0].id, stocked.id);

    Ok(())
}

/// Tests the title substring filter.
#[tokio::test]
async fn filters_by_title_substring() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);
    let mut hoodie = create_params("zip-hoodie");
    hoodie.title = "Zip Hoodie".to_string();
    repo.create(hoodie).await?;
    repo.create(create_params("crew-tee")).await?;

    let (products, total) = repo
        .list(&ProductQueryParams {
            page: 0,
            per_page: 10,
            query: Some("Hoodie".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(products[0].slug, "zip-hoodie");

    Ok(())
}

/// Tests pagination boundaries.
///
/// Expected: three rows land on two pages of two
#[tokio::test]
async fn paginates_results() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);
    for i in 0..3 {
        repo.create(create_params(&format!("tee-{}", i))).await?;
    }

    let page_params = |page| ProductQueryParams {
        page,
        per_page: 2,
        ..Default::default()
    };

    let (first, total) = repo.list(&page_params(0)).await?;
    let (second, _) = repo.list(&page_params(1)).await?;

    assert_eq!(total, 3);
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);

    Ok(())
}
