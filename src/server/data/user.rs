//! User data repository.
//!
//! The core never verifies identity itself; it resolves the session's user
//! id to a row and reads the role string from it.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Phone.eq(phone))
            .one(self.db)
            .await
    }

    /// Creates a customer account with the given contact point.
    ///
    /// Exactly one of `email` / `phone` is expected; the OTP flow has
    /// already validated the destination.
    pub async fn create_customer(
        &self,
        email: Option<String>,
        phone: Option<String>,
    ) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();

        entity::user::ActiveModel {
            email: ActiveValue::Set(email),
            phone: ActiveValue::Set(phone),
            name: ActiveValue::Set(None),
            role: ActiveValue::Set(entity::user::ROLE_CUSTOMER.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
