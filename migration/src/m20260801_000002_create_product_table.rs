use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string(Product::Title))
                    .col(string_uniq(Product::Slug))
                    .col(text(Product::Description))
                    .col(string(Product::Category))
                    .col(big_integer(Product::Price))
                    .col(integer(Product::DiscountPercent).default(0))
                    .col(string(Product::HsnCode))
                    .col(boolean(Product::IsActive).default(true))
                    .col(big_integer(Product::AvailableStock).default(0))
                    .col(boolean(Product::HasStock).default(false))
                    .col(
                        timestamp(Product::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Product::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Storefront listings filter on these constantly.
        manager
            .create_index(
                Index::create()
                    .name("idx_product_category")
                    .table(Product::Table)
                    .col(Product::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_has_stock")
                    .table(Product::Table)
                    .col(Product::HasStock)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Product {
    Table,
    Id,
    Title,
    Slug,
    Description,
    Category,
    Price,
    DiscountPercent,
    HsnCode,
    IsActive,
    AvailableStock,
    HasStock,
    CreatedAt,
    UpdatedAt,
}
