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
                    .table(Order::Table)
                    .if_not_exists()
                    .col(pk_auto(Order::Id))
                    .col(integer(Order::UserId))
                    .col(string(Order::Status).default("pending"))
                    .col(big_integer(Order::Subtotal))
                    .col(big_integer(Order::Discount).default(0))
                    .col(big_integer(Order::Shipping).default(0))
                    .col(big_integer(Order::Tax).default(0))
                    .col(big_integer(Order::Total))
                    .col(string(Order::Currency).default("INR"))
                    .col(string_null(Order::ShipName))
                    .col(string_null(Order::ShipPhone))
                    .col(string_null(Order::ShipStreet))
                    .col(string_null(Order::ShipCity))
                    .col(string_null(Order::ShipState))
                    .col(string_null(Order::ShipPostalCode))
                    .col(string_null(Order::ShipCountry))
                    .col(
                        timestamp(Order::PlacedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Order::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Order::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_user_id")
                            .from(Order::Table, Order::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Recent orders per user.
        manager
            .create_index(
                Index::create()
                    .name("idx_order_user_placed")
                    .table(Order::Table)
                    .col(Order::UserId)
                    .col(Order::PlacedAt)
                    .to_owned(),
            )
            .await?;

        // Admin dashboard filters by status.
        manager
            .create_index(
                Index::create()
                    .name("idx_order_status_placed")
                    .table(Order::Table)
                    .col(Order::Status)
                    .col(Order::PlacedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Order {
    Table,
    Id,
    UserId,
    Status,
    Subtotal,
    Discount,
    Shipping,
    Tax,
    Total,
    Currency,
    ShipName,
    ShipPhone,
    ShipStreet,
    ShipCity,
    ShipState,
    ShipPostalCode,
    ShipCountry,
    PlacedAt,
    CreatedAt,
    UpdatedAt,
}
