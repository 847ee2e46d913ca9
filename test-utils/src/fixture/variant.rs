//! Variant and size fixtures for creating in-memory test data.

use chrono::Utc;
use entity::{variant, variant_size};

/// Default variant colour.
pub const DEFAULT_COLOR: &str = "black";

/// Default size label.
pub const DEFAULT_LABEL: &str = "M";

/// Creates a variant entity model with default values.
pub fn entity() -> variant::Model {
    let now = Utc::now();
    variant::Model {
        id: 1,
        product_id: 1,
        color: DEFAULT_COLOR.to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Creates a size entity model belonging to the default variant.
///
/// # Arguments
/// - `sku` - SKU for the size; fixtures never generate SKUs because the
///   uniqueness rules under test depend on them
/// - `stock` - Units in stock
pub fn size_entity(sku: impl Into<String>, stock: i32) -> variant_size::Model {
    variant_size::Model {
        id: 1,
        variant_id: 1,
        label: DEFAULT_LABEL.to_string(),
        stock,
        sku: sku.into(),
        is_active: true,
        position: 0,
    }
}
