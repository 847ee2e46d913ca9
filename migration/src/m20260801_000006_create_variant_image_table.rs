use sea_orm_migration::{prelude::*, schema::*};

use super::m20260801_000004_create_variant_table::Variant;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VariantImage::Table)
                    .if_not_exists()
                    .col(pk_auto(VariantImage::Id))
                    .col(integer(VariantImage::VariantId))
                    .col(string(VariantImage::PublicId))
                    .col(string(VariantImage::SecureUrl))
                    .col(integer(VariantImage::Position).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_variant_image_variant_id")
                            .from(VariantImage::Table, VariantImage::VariantId)
                            .to(Variant::Table, Variant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VariantImage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VariantImage {
    Table,
    Id,
    VariantId,
    PublicId,
    SecureUrl,
    Position,
}
