//! User factory for creating test user entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Creates a customer user with a unique email address.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::user::Model)` - Created user entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    create_with_role(db, entity::user::ROLE_CUSTOMER).await
}

/// Creates an admin user with a unique email address.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    create_with_role(db, entity::user::ROLE_ADMIN).await
}

async fn create_with_role(
    db: &DatabaseConnection,
    role: &str,
) -> Result<entity::user::Model, DbErr> {
    let id = next_id();
    let now = Utc::now();

    entity::user::ActiveModel {
        id: ActiveValue::NotSet,
        email: ActiveValue::Set(Some(format!("user{}@example.com", id))),
        phone: ActiveValue::Set(Some(format!("+9190000{:05}", id))),
        name: ActiveValue::Set(Some(format!("User {}", id))),
        role: ActiveValue::Set(role.to_string()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
