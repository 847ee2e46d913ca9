use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShippingCredential::Table)
                    .if_not_exists()
                    .col(string(ShippingCredential::Name).primary_key())
                    .col(string(ShippingCredential::Token))
                    .col(timestamp(ShippingCredential::ExpiresAt))
                    .col(
                        timestamp(ShippingCredential::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShippingCredential::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ShippingCredential {
    Table,
    Name,
    Token,
    ExpiresAt,
    UpdatedAt,
}
