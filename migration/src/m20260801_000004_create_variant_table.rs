use sea_orm_migration::{prelude::*, schema::*};

use super::m20260801_000002_create_product_table::Product;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Variant::Table)
                    .if_not_exists()
                    .col(pk_auto(Variant::Id))
                    .col(integer(Variant::ProductId))
                    .col(string(Variant::Color))
                    .col(boolean(Variant::IsActive).default(true))
                    .col(
                        timestamp(Variant::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Variant::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_variant_product_id")
                            .from(Variant::Table, Variant::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One variant per colour within a product.
        manager
            .create_index(
                Index::create()
                    .name("idx_variant_product_color")
                    .table(Variant::Table)
                    .col(Variant::ProductId)
                    .col(Variant::Color)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Variant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Variant {
    Table,
    Id,
    ProductId,
    Color,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
