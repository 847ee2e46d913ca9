use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credential_lock")]
pub struct Model {
    /// Lock name; one row per guarded credential.
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    /// Identity of the worker holding the lease. Only the owner may release.
    pub owner: String,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
