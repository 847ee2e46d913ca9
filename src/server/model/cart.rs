//! Cart domain model.
//!
//! `CartAggregate` is the in-memory form of one cart document: the cart row
//! plus its line items held in a map keyed by item id, so lookups during
//! mutation are O(1). The aggregate is pure — it performs no I/O — and
//! reports every mutation precisely enough for the repository to persist
//! only the rows that changed. Ordering by `position` is applied when the
//! aggregate is serialized back out at the storage or API boundary.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::model::cart::{CartDto, CartItemDto};

/// Identity owning a cart: an authenticated user or an anonymous guest
/// session. Operations on carts of different owners never contend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOwner {
    User(i32),
    Guest(String),
}

/// Input for an add-to-cart operation, already validated by the service.
#[derive(Debug, Clone)]
pub struct NewCartLine {
    pub product_id: i32,
    pub variant_id: i32,
    pub size_id: i32,
    pub sku: String,
    pub title: Option<String>,
    pub image: Option<String>,
    /// Unit price in minor units, captured at add time.
    pub price: i64,
    pub quantity: i32,
}

/// One line item inside the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: i32,
    pub product_id: i32,
    pub variant_id: i32,
    pub size_id: i32,
    pub sku: String,
    pub title: Option<String>,
    pub image: Option<String>,
    pub price_at: i64,
    pub quantity: i32,
    pub position: i32,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    pub fn from_entity(entity: entity::cart_item::Model) -> Self {
        Self {
            id: entity.id,
            product_id: entity.product_id,
            variant_id: entity.variant_id,
            size_id: entity.size_id,
            sku: entity.sku,
            title: entity.title,
            image: entity.image,
            price_at: entity.price_at,
            quantity: entity.quantity,
            position: entity.position,
            added_at: entity.added_at,
        }
    }

    fn line_total(&self) -> i64 {
        self.price_at * self.quantity as i64
    }

    fn into_dto(self) -> CartItemDto {
        CartItemDto {
            id: self.id,
            product_id: self.product_id,
            variant_id: self.variant_id,
            size_id: self.size_id,
            sku: self.sku,
            title: self.title,
            image: self.image,
            price_at: self.price_at,
            quantity: self.quantity,
            added_at: self.added_at,
        }
    }
}

/// Recalculated monetary fields, mirrored onto the cart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: i64,
    pub total: i64,
}

/// Result of decrementing a line's quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum DecrementOutcome {
    /// Quantity reached zero; the line was removed from the aggregate.
    Removed { item_id: i32 },
    /// Quantity reduced; the line stays with a refreshed added-at stamp.
    Updated {
        item_id: i32,
        quantity: i32,
        added_at: DateTime<Utc>,
    },
}

/// In-memory form of one cart and its lines.
#[derive(Debug, Clone)]
pub struct CartAggregate {
    pub cart: entity::cart::Model,
    lines: HashMap<i32, CartLine>,
}

impl CartAggregate {
    /// Builds the aggregate from the cart row and its item rows.
    pub fn new(cart: entity::cart::Model, items: Vec<entity::cart_item::Model>) -> Self {
        let lines = items
            .into_iter()
            .map(|item| (item.id, CartLine::from_entity(item)))
            .collect();

        Self { cart, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn get(&self, item_id: i32) -> Option<&CartLine> {
        self.lines.get(&item_id)
    }

    /// Lines ordered by position, the serialization order at every boundary.
    pub fn ordered_lines(&self) -> Vec<&CartLine> {
        let mut lines: Vec<&CartLine> = self.lines.values().collect();
        lines.sort_by_key(|line| (line.position, line.id));
        lines
    }

    /// Finds the line an incoming item must merge into, if any.
    ///
    /// Two active lines may never share the same (product, variant) pair;
    /// an incoming duplicate is folded into the existing line instead.
    pub fn find_mergeable(&self, product_id: i32, variant_id: i32) -> Option<i32> {
        self.lines
            .values()
            .find(|line| line.product_id == product_id && line.variant_id == variant_id)
            .map(|line| line.id)
    }

    /// Position for a line appended at the end of the cart.
    pub fn next_position(&self) -> i32 {
        self.lines
            .values()
            .map(|line| line.position)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Folds an incoming item into an existing line.
    ///
    /// Quantity accumulates; the captured price is refreshed to the supplied
    /// value and the added-at stamp is renewed.
    ///
    /// # Panics
    /// Never panics: callers obtain `item_id` from `find_mergeable` on the
    /// same aggregate. An unknown id is ignored and returns `None`.
    pub fn merge_into(
        &mut self,
        item_id: i32,
        quantity: i32,
        price: i64,
        now: DateTime<Utc>,
    ) -> Option<&CartLine> {
        let line = self.lines.get_mut(&item_id)?;

        line.quantity = (line.quantity + quantity).max(1);
        line.price_at = price;
        line.added_at = now;

        Some(&*line)
    }

    /// Registers a freshly inserted line row in the aggregate.
    pub fn insert(&mut self, line: CartLine) {
        self.lines.insert(line.id, line);
    }

    /// Applies a decrement to a line.
    ///
    /// The new quantity is clamped at zero; reaching zero removes the line
    /// entirely. Returns `None` when no line with that id exists.
    pub fn decrement(
        &mut self,
        item_id: i32,
        delta: i32,
        now: DateTime<Utc>,
    ) -> Option<DecrementOutcome> {
        let line = self.lines.get_mut(&item_id)?;

        let new_quantity = (line.quantity - delta).max(0);

        if new_quantity == 0 {
            self.lines.remove(&item_id);
            Some(DecrementOutcome::Removed { item_id })
        } else {
            line.quantity = new_quantity;
            line.added_at = now;
            Some(DecrementOutcome::Updated {
                item_id,
                quantity: new_quantity,
                added_at: now,
            })
        }
    }

    /// Recomputes the cart's monetary fields from its lines.
    ///
    /// subtotal = Σ price_at × quantity; total = max(0, subtotal + shipping
    /// − discount). Idempotent: only these numeric fields change, so running
    /// it twice without an intervening mutation is a no-op.
    pub fn recalculate(&mut self) -> CartTotals {
        let subtotal: i64 = self.lines.values().map(CartLine::line_total).sum();
        let total = (subtotal + self.cart.shipping - self.cart.discount).max(0);

        self.cart.subtotal = subtotal;
        self.cart.total = total;

        CartTotals { subtotal, total }
    }

    /// Serializes the aggregate for the API, lines in display order.
    pub fn into_dto(self) -> CartDto {
        let mut lines: Vec<CartLine> = self.lines.into_values().collect();
        lines.sort_by_key(|line| (line.position, line.id));

        CartDto {
            id: self.cart.id,
            items: lines.into_iter().map(CartLine::into_dto).collect(),
            subtotal: self.cart.subtotal,
            shipping: self.cart.shipping,
            discount: self.cart.discount,
            total: self.cart.total,
            currency: self.cart.currency,
        }
    }
}
