//! Shared-credential storage and its cross-process lease lock.
//!
//! Many workers share one shipping-provider token. The token row is a plain
//! read-mostly cache; the lock row is a lease with an owner stamp and a TTL
//! so a crashed holder never wedges refreshes, and so one worker can never
//! release a lease another worker holds.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct CredentialRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CredentialRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Reads a stored credential.
    pub async fn get(
        &self,
        name: &str,
    ) -> Result<Option<entity::shipping_credential::Model>, DbErr> {
        entity::prelude::ShippingCredential::find_by_id(name)
            .one(self.db)
            .await
    }

    /// Stores or replaces a credential.
    pub async fn put(
        &self,
        name: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let now = Utc::now();

        let existing = self.get(name).await?;

        match existing {
            Some(model) => {
                let mut active_model: entity::shipping_credential::ActiveModel = model.into();
                active_model.token = ActiveValue::Set(token.to_string());
                active_model.expires_at = ActiveValue::Set(expires_at);
                active_model.updated_at = ActiveValue::Set(now);
                active_model.update(self.db).await?;
            }
            None => {
                entity::shipping_credential::ActiveModel {
                    name: ActiveValue::Set(name.to_string()),
                    token: ActiveValue::Set(token.to_string()),
                    expires_at: ActiveValue::Set(expires_at),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(())
    }

    /// Attempts to acquire the named lease for `owner`.
    ///
    /// Succeeds when no lease row exists or the existing lease has expired;
    /// a live lease held by anyone (including a previous incarnation of the
    /// same owner) is not stolen. Losing the insert race to another worker
    /// reports failure rather than an error.
    ///
    /// # Returns
    /// - `Ok(true)`: lease acquired until now + `ttl`
    /// - `Ok(false)`: someone else holds a live lease
    pub async fn try_acquire_lock(
        &self,
        name: &str,
        owner: &str,
        ttl: Duration,
    ) -> Result<bool, DbErr> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let existing = entity::prelude::CredentialLock::find_by_id(name)
            .one(self.db)
            .await?;

        match existing {
            None => {
                let inserted = entity::credential_lock::ActiveModel {
                    name: ActiveValue::Set(name.to_string()),
                    owner: ActiveValue::Set(owner.to_string()),
                    expires_at: ActiveValue::Set(expires_at),
                }
                .insert(self.db)
                .await;

                match inserted {
                    Ok(_) => Ok(true),
                    // Lost the insert race to another worker.
                    Err(err)
                        if matches!(
                            err.sql_err(),
                            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                        ) =>
                    {
                        Ok(false)
                    }
                    Err(err) => Err(err),
                }
            }
            Some(lock) if lock.expires_at <= now => {
                // Take over an expired lease; the owner filter makes the
                // takeover atomic if several workers try at once.
                let result = entity::prelude::CredentialLock::update_many()
                    .col_expr(
                        entity::credential_lock::Column::Owner,
                        sea_orm::sea_query::Expr::value(owner),
                    )
                    .col_expr(
                        entity::credential_lock::Column::ExpiresAt,
                        sea_orm::sea_query::Expr::value(expires_at),
                    )
                    .filter(entity::credential_lock::Column::Name.eq(name))
                    .filter(entity::credential_lock::Column::Owner.eq(lock.owner.as_str()))
                    .filter(entity::credential_lock::Column::ExpiresAt.eq(lock.expires_at))
                    .exec(self.db)
                    .await?;

                Ok(result.rows_affected == 1)
            }
            Some(_) => Ok(false),
        }
    }

    /// Releases the named lease, but only if `owner` still holds it.
    ///
    /// A worker whose lease expired and was taken over must not delete the
    /// new holder's lock; the owner filter guarantees that.
    pub async fn release_lock(&self, name: &str, owner: &str) -> Result<(), DbErr> {
        entity::prelude::CredentialLock::delete_many()
            .filter(entity::credential_lock::Column::Name.eq(name))
            .filter(entity::credential_lock::Column::Owner.eq(owner))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
