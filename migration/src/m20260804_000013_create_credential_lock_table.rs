use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CredentialLock::Table)
                    .if_not_exists()
                    .col(string(CredentialLock::Name).primary_key())
                    .col(string(CredentialLock::Owner))
                    .col(timestamp(CredentialLock::ExpiresAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CredentialLock::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CredentialLock {
    Table,
    Name,
    Owner,
    ExpiresAt,
}
