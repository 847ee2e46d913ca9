use super::*;

/// Tests creating a customer from an email destination.
///
/// Expected: Ok with the customer role and no phone
#[tokio::test]
async fn creates_email_customer() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create_customer(Some("shopper@example.com".to_string()), None)
        .await?;

    assert_eq!(user.email.as_deref(), Some("shopper@example.com"));
    assert!(user.phone.is_none());
    assert_eq!(user.role, entity::user::ROLE_CUSTOMER);
    assert!(!user.is_admin());

    Ok(())
}

/// Tests that a reused email is rejected by the unique index.
///
/// Expected: Err with a unique-constraint violation
#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create_customer(Some("shopper@example.com".to_string()), None)
        .await?;

    let err = repo
        .create_customer(Some("shopper@example.com".to_string()), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
