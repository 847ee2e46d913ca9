use super::*;

const LOCK: &str = "shipping:refresh_lock";

/// Tests acquiring a free lease.
///
/// Expected: Ok(true)
#[tokio::test]
async fn acquires_free_lease() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_credential_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CredentialRepository::new(db);
    assert!(repo
        .try_acquire_lock(LOCK, "worker-a", Duration::seconds(15))
        .await?);

    Ok(())
}

/// Tests that a live lease blocks other workers.
///
/// Expected: second acquire returns Ok(false)
#[tokio::test]
async fn live_lease_blocks_contender() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_credential_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CredentialRepository::new(db);
    assert!(repo
        .try_acquire_lock(LOCK, "worker-a", Duration::seconds(15))
        .await?);
    assert!(!repo
        .try_acquire_lock(LOCK, "worker-b", Duration::seconds(15))
        .await?);

    Ok(())
}

/// Tests that an expired lease can be taken over.
///
/// Expected: Ok(true) for the second worker once the TTL has passed
#[tokio::test]
async fn expired_lease_is_reacquirable() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_credential_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CredentialRepository::new(db);
    // A negative TTL creates a lease that is already expired.
    assert!(repo
        .try_acquire_lock(LOCK, "worker-a", Duration::seconds(-1))
        .await?);

    assert!(repo
        .try_acquire_lock(LOCK, "worker-b", Duration::seconds(15))
        .await?);

    Ok(())
}

/// Tests that release is owner-stamped: a stale holder cannot delete a
/// lease that was taken over after its own expired.
///
/// Expected: worker-b's lease survives worker-a's release
#[tokio::test]
async fn release_only_removes_own_lease() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_credential_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CredentialRepository::new(db);
    assert!(repo
        .try_acquire_lock(LOCK, "worker-a", Duration::seconds(-1))
        .await?);
    assert!(repo
        .try_acquire_lock(LOCK, "worker-b", Duration::seconds(15))
        .await?);

    // Stale owner releases; the live lease must be untouched.
    repo.release_lock(LOCK, "worker-a").await?;
    assert!(!repo
        .try_acquire_lock(LOCK, "worker-c", Duration::seconds(15))
        .await?);

    // The rightful owner can release, freeing the lease.
    repo.release_lock(LOCK, "worker-b").await?;
    assert!(repo
        .try_acquire_lock(LOCK, "worker-c", Duration::seconds(15))
        .await?);

    Ok(())
}
