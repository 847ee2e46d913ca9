use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shipping_credential")]
pub struct Model {
    /// Credential name, e.g. `shipping:token`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub token: String,
    /// Expiry with the provider's safety buffer already subtracted.
    pub expires_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
