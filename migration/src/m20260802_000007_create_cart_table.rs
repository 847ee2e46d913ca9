use sea_orm_migration::{prelude::*, schema::*};

use super::m20260801_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cart::Table)
                    .if_not_exists()
                    .col(pk_auto(Cart::Id))
                    .col(integer_null(Cart::UserId))
                    .col(string_null(Cart::GuestId))
                    .col(big_integer(Cart::Subtotal).default(0))
                    .col(big_integer(Cart::Shipping).default(0))
                    .col(big_integer(Cart::Discount).default(0))
                    .col(big_integer(Cart::Total).default(0))
                    .col(string(Cart::Currency).default("INR"))
                    .col(boolean(Cart::IsActive).default(true))
                    .col(timestamp_null(Cart::ExpiresAt))
                    .col(
                        timestamp(Cart::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Cart::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_user_id")
                            .from(Cart::Table, Cart::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cart_user_id")
                    .table(Cart::Table)
                    .col(Cart::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cart_guest_id")
                    .table(Cart::Table)
                    .col(Cart::GuestId)
                    .to_owned(),
            )
            .await?;

        // The expiry sweep scans on this.
        manager
            .create_index(
                Index::create()
                    .name("idx_cart_expires_at")
                    .table(Cart::Table)
                    .col(Cart::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cart::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Cart {
    Table,
    Id,
    UserId,
    GuestId,
    Subtotal,
    Shipping,
    Discount,
    Total,
    Currency,
    IsActive,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
