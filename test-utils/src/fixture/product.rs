//! Product fixtures for creating in-memory test data.

use chrono::Utc;
use entity::product;

/// Default test product title.
pub const DEFAULT_TITLE: &str = "Test Product";

/// Default test product category.
pub const DEFAULT_CATEGORY: &str = "apparel";

/// Default listed price in minor units.
pub const DEFAULT_PRICE: i64 = 10_000;

/// Creates a product entity model with default values.
///
/// The model is in-memory only; use the product factory to persist one.
///
/// # Returns
/// - `product::Model` - In-memory product entity
pub fn entity() -> product::Model {
    entity_builder().build()
}

/// Creates a product entity builder for customization.
pub fn entity_builder() -> ProductEntityBuilder {
    ProductEntityBuilder::default()
}

/// Builder for creating customized product entity models.
///
/// All fields have sensible defaults that can be overridden.
pub struct ProductEntityBuilder {
    id: i32,
    title: String,
    slug: String,
    price: i64,
    discount_percent: i32,
    is_active: bool,
    available_stock: i64,
    has_stock: bool,
}

impl Default for ProductEntityBuilder {
    fn default() -> Self {
        Self {
            id: 1,
            title: DEFAULT_TITLE.to_string(),
            slug: "test-product".to_string(),
            price: DEFAULT_PRICE,
            discount_percent: 0,
            is_active: true,
            available_stock: 0,
            has_stock: false,
        }
    }
}

impl ProductEntityBuilder {
    /// Sets the product ID.
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Sets the product title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the unique slug.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Sets the listed price in minor units.
    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    /// Sets the discount percentage.
    pub fn discount_percent(mut self, discount_percent: i32) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    /// Sets the active flag.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the materialized stock fields.
    pub fn stock(mut self, available_stock: i64) -> Self {
        self.available_stock = available_stock;
        self.has_stock = available_stock > 0;
        self
    }

    /// Builds and returns the product entity model.
    pub fn build(self) -> product::Model {
        let now = Utc::now();
        product::Model {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: "A product used in tests".to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            price: self.price,
            discount_percent: self.discount_percent,
            hsn_code: "610910".to_string(),
            is_active: self.is_active,
            available_stock: self.available_stock,
            has_stock: self.has_stock,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_entity_with_defaults() {
        let product = entity();

        assert_eq!(product.title, DEFAULT_TITLE);
        assert_eq!(product.price, DEFAULT_PRICE);
        assert!(product.is_active);
        assert!(!product.has_stock);
    }

    #[test]
    fn builder_allows_partial_customization() {
        let product = entity_builder().slug("summer-tee").stock(12).build();

        assert_eq!(product.slug, "summer-tee");
        assert_eq!(product.available_stock, 12);
        assert!(product.has_stock);
        assert_eq!(product.title, DEFAULT_TITLE);
    }
}
