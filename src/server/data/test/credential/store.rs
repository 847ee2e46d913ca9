use super::*;

/// Tests storing and replacing a credential.
///
/// Expected: the second put overwrites token and expiry
#[tokio::test]
async fn put_replaces_existing_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_credential_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CredentialRepository::new(db);
    let first_expiry = Utc::now() + Duration::hours(1);
    let second_expiry = Utc::now() + Duration::days(7);

    repo.put("shipping:token", "token-one", first_expiry).await?;
    repo.put("shipping:token", "token-two", second_expiry)
        .await?;

    let stored = repo.get("shipping:token").await?.unwrap();
    assert_eq!(stored.token, "token-two");
    assert!((stored.expires_at - second_expiry).num_seconds().abs() < 1);

    Ok(())
}

/// Tests that a missing credential reads as None.
#[tokio::test]
async fn missing_credential_is_none() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_credential_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CredentialRepository::new(db);
    assert!(repo.get("shipping:token").await?.is_none());

    Ok(())
}
