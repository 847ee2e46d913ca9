use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments backed by
/// in-memory SQLite. Add entity tables with `with_table` (or one of the
/// convenience groups), then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Product, Variant};
///
/// let test = TestBuilder::new()
///     .with_table(Product)
///     .with_table(Variant)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed during database setup, in order.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity
    /// using SQLite syntax. Tables should be added in dependency order
    /// (tables with foreign keys after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds all tables required for catalog operations.
    ///
    /// Adds the following tables in dependency order:
    /// - Product
    /// - ProductImage
    /// - Variant
    /// - VariantSize
    /// - VariantImage
    ///
    /// Use this when testing variant, SKU, and stock-aggregation
    /// functionality.
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(Product)
            .with_table(ProductImage)
            .with_table(Variant)
            .with_table(VariantSize)
            .with_table(VariantImage)
    }

    /// Adds all tables required for cart operations.
    ///
    /// Equivalent to `with_catalog_tables()` plus User, Cart, and CartItem.
    /// The catalog tables are included because cart lines reference products
    /// and variants.
    pub fn with_cart_tables(self) -> Self {
        self.with_catalog_tables()
            .with_table(User)
            .with_table(Cart)
            .with_table(CartItem)
    }

    /// Adds all tables required for checkout operations.
    ///
    /// Equivalent to `with_cart_tables()` plus Order, OrderItem, and Payment.
    pub fn with_order_tables(self) -> Self {
        self.with_cart_tables()
            .with_table(Order)
            .with_table(OrderItem)
            .with_table(Payment)
    }

    /// Adds the shipping credential and lease lock tables.
    pub fn with_credential_tables(self) -> Self {
        self.with_table(ShippingCredential)
            .with_table(CredentialLock)
    }

    /// Builds the configured test context.
    ///
    /// Connects to a fresh in-memory SQLite database and creates every
    /// configured table in insertion order.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with an initialized database
    /// - `Err(TestError)` - Connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.with_tables(self.tables).await?;
        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
