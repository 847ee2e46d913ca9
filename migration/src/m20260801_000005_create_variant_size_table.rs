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
                    .table(VariantSize::Table)
                    .if_not_exists()
                    .col(pk_auto(VariantSize::Id))
                    .col(integer(VariantSize::VariantId))
                    .col(string(VariantSize::Label))
                    .col(integer(VariantSize::Stock).default(0))
                    .col(string(VariantSize::Sku))
                    .col(boolean(VariantSize::IsActive).default(true))
                    .col(integer(VariantSize::Position).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_variant_size_variant_id")
                            .from(VariantSize::Table, VariantSize::VariantId)
                            .to(Variant::Table, Variant::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // SKU uniqueness is catalog-wide. The pre-insert lookup in the
        // registry is an optimization; this index is the real guard.
        manager
            .create_index(
                Index::create()
                    .name("idx_variant_size_sku")
                    .table(VariantSize::Table)
                    .col(VariantSize::Sku)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VariantSize::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VariantSize {
    Table,
    Id,
    VariantId,
    Label,
    Stock,
    Sku,
    IsActive,
    Position,
}
