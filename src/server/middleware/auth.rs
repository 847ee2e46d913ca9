use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    controller::auth::SESSION_AUTH_USER_ID,
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
};

pub enum Permission {
    Admin,
}

/// Resolves the session to a user row and enforces role permissions.
///
/// The session carries only the verified user id; the role comes from the
/// user row on every request, so a role change takes effect immediately.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Requires an authenticated user holding every listed permission.
    ///
    /// # Returns
    /// - `Ok(user)`: the resolved user row
    /// - `Err(AppError::AuthErr)`: not logged in, stale session, or role
    ///   missing
    pub async fn require(
        &self,
        permissions: &[Permission],
    ) -> Result<entity::user::Model, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user_id) = self.session.get::<i32>(SESSION_AUTH_USER_ID).await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "Admin role required for catalog management".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Resolves the session's user without failing for anonymous visitors.
    ///
    /// # Returns
    /// - `Ok(Some(user))`: logged in with a live account
    /// - `Ok(None)`: anonymous, or the session's user was deleted
    pub async fn current_user(&self) -> Result<Option<entity::user::Model>, AppError> {
        let Some(user_id) = self.session.get::<i32>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        Ok(UserRepository::new(self.db).find_by_id(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests that an empty session is rejected.
    ///
    /// Expected: Err(AuthErr) for the missing session user
    #[tokio::test]
    async fn empty_session_is_rejected() {
        let mut test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let (db, session) = test.db_and_session().await.unwrap();

        let guard = AuthGuard::new(db, session);
        let err = guard.require(&[]).await.unwrap_err();

        assert!(matches!(err, AppError::AuthErr(AuthError::UserNotInSession)));
        assert!(guard.current_user().await.unwrap().is_none());
    }

    /// Tests that a session pointing at a deleted user is rejected.
    #[tokio::test]
    async fn stale_session_user_is_rejected() {
        let mut test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let (db, session) = test.db_and_session().await.unwrap();

        session.insert(SESSION_AUTH_USER_ID, 999).await.unwrap();

        let guard = AuthGuard::new(db, session);
        let err = guard.require(&[]).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::AuthErr(AuthError::UserNotInDatabase(999))
        ));
    }

    /// Tests that a customer cannot pass the admin requirement.
    ///
    /// Expected: Err(AccessDenied)
    #[tokio::test]
    async fn customer_is_denied_admin_permission() {
        let mut test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let (db, session) = test.db_and_session().await.unwrap();

        let user = factory::user::create_user(db).await.unwrap();
        session.insert(SESSION_AUTH_USER_ID, user.id).await.unwrap();

        let guard = AuthGuard::new(db, session);

        assert!(guard.require(&[]).await.is_ok());
        let err = guard.require(&[Permission::Admin]).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::AuthErr(AuthError::AccessDenied(_, _))
        ));
    }

    /// Tests that an admin passes the admin requirement.
    #[tokio::test]
    async fn admin_passes_admin_permission() {
        let mut test = TestBuilder::new()
            .with_table(entity::prelude::User)
            .build()
            .await
            .unwrap();
        let (db, session) = test.db_and_session().await.unwrap();

        let admin = factory::user::create_admin(db).await.unwrap();
        session
            .insert(SESSION_AUTH_USER_ID, admin.id)
            .await
            .unwrap();

        let guard = AuthGuard::new(db, session);
        let user = guard.require(&[Permission::Admin]).await.unwrap();

        assert_eq!(user.id, admin.id);
    }
}
