use super::*;

/// Tests lookups by id, email, and phone against factory users.
#[tokio::test]
async fn finds_users_by_contact_point() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let email = user.email.clone().unwrap();
    let phone = user.phone.clone().unwrap();

    let repo = UserRepository::new(db);

    assert_eq!(repo.find_by_id(user.id).await?.map(|u| u.id), Some(user.id));
    assert_eq!(
        repo.find_by_email(&email).await?.map(|u| u.id),
        Some(user.id)
    );
    assert_eq!(
        repo.find_by_phone(&phone).await?.map(|u| u.id),
        Some(user.id)
    );
    assert!(repo.find_by_email("nobody@example.com").await?.is_none());

    Ok(())
}
