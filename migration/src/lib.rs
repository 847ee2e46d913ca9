pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_user_table;
mod m20260801_000002_create_product_table;
mod m20260801_000003_create_product_image_table;
mod m20260801_000004_create_variant_table;
mod m20260801_000005_create_variant_size_table;
mod m20260801_000006_create_variant_image_table;
mod m20260802_000007_create_cart_table;
mod m20260802_000008_create_cart_item_table;
mod m20260803_000009_create_order_table;
mod m20260803_000010_create_order_item_table;
mod m20260803_000011_create_payment_table;
mod m20260804_000012_create_shipping_credential_table;
mod m20260804_000013_create_credential_lock_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_user_table::Migration),
            Box::new(m20260801_000002_create_product_table::Migration),
            Box::new(m20260801_000003_create_product_image_table::Migration),
            Box::new(m20260801_000004_create_variant_table::Migration),
            Box::new(m20260801_000005_create_variant_size_table::Migration),
            Box::new(m20260801_000006_create_variant_image_table::Migration),
            Box::new(m20260802_000007_create_cart_table::Migration),
            Box::new(m20260802_000008_create_cart_item_table::Migration),
            Box::new(m20260803_000009_create_order_table::Migration),
            Box::new(m20260803_000010_create_order_item_table::Migration),
            Box::new(m20260803_000011_create_payment_table::Migration),
            Box::new(m20260804_000012_create_shipping_credential_table::Migration),
            Box::new(m20260804_000013_create_credential_lock_table::Migration),
        ]
    }
}
