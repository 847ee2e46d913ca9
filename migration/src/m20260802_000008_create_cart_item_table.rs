use sea_orm_migration::{prelude::*, schema::*};

use super::m20260802_000007_create_cart_table::Cart;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartItem::Table)
                    .if_not_exists()
                    .col(pk_auto(CartItem::Id))
                    .col(integer(CartItem::CartId))
                    .col(integer(CartItem::ProductId))
                    .col(integer(CartItem::VariantId))
                    .col(integer(CartItem::SizeId))
                    .col(string(CartItem::Sku))
                    .col(string_null(CartItem::Title))
                    .col(string_null(CartItem::Image))
                    .col(big_integer(CartItem::PriceAt))
                    .col(integer(CartItem::Quantity))
                    .col(integer(CartItem::Position).default(0))
                    .col(
                        timestamp(CartItem::AddedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_item_cart_id")
                            .from(CartItem::Table, CartItem::CartId)
                            .to(Cart::Table, Cart::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cart_item_cart_id")
                    .table(CartItem::Table)
                    .col(CartItem::CartId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CartItem {
    Table,
    Id,
    CartId,
    ProductId,
    VariantId,
    SizeId,
    Sku,
    Title,
    Image,
    PriceAt,
    Quantity,
    Position,
    AddedAt,
}
