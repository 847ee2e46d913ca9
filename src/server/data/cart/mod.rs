//! Cart data repository.
//!
//! Persists the cart aggregate: the cart row and its line items. Mutating
//! methods write exactly the rows the aggregate reported as changed; loading
//! returns the aggregate with lines keyed by id. The repository is generic
//! over the connection so cart mutations can run inside a transaction.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::cart::{CartAggregate, CartOwner, CartTotals, NewCartLine};

#[cfg(test)]
mod test;

pub struct CartRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CartRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Loads the owner's single active cart with its lines.
    ///
    /// # Returns
    /// - `Ok(Some(aggregate))`: the active cart
    /// - `Ok(None)`: the owner has no active cart
    /// - `Err(DbErr)`: database error
    pub async fn find_active(&self, owner: &CartOwner) -> Result<Option<CartAggregate>, DbErr> {
        let query = entity::prelude::Cart::find().filter(entity::cart::Column::IsActive.eq(true));

        let query = match owner {
            CartOwner::User(user_id) => query.filter(entity::cart::Column::UserId.eq(*user_id)),
            CartOwner::Guest(guest_id) => {
                query.filter(entity::cart::Column::GuestId.eq(guest_id.as_str()))
            }
        };

        let Some(cart) = query.one(self.db).await? else {
            return Ok(None);
        };

        let items = entity::prelude::CartItem::find()
            .filter(entity::cart_item::Column::CartId.eq(cart.id))
            .order_by_asc(entity::cart_item::Column::Position)
            .all(self.db)
            .await?;

        Ok(Some(CartAggregate::new(cart, items)))
    }

    /// Creates an empty active cart for the owner.
    ///
    /// Guest carts receive an expiry so the background sweep can reclaim
    /// them; user carts live until cleared or merged.
    pub async fn create(
        &self,
        owner: &CartOwner,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<CartAggregate, DbErr> {
        let now = Utc::now();

        let (user_id, guest_id) = match owner {
            CartOwner::User(user_id) => (Some(*user_id), None),
            CartOwner::Guest(guest_id) => (None, Some(guest_id.clone())),
        };

        let cart = entity::cart::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            guest_id: ActiveValue::Set(guest_id),
            subtotal: ActiveValue::Set(0),
            shipping: ActiveValue::Set(0),
            discount: ActiveValue::Set(0),
            total: ActiveValue::Set(0),
            currency: ActiveValue::Set("INR".to_string()),
            is_active: ActiveValue::Set(true),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(CartAggregate::new(cart, vec![]))
    }

    /// Appends one line row to a cart.
    pub async fn insert_line(
        &self,
        cart_id: i32,
        line: &NewCartLine,
        position: i32,
        now: DateTime<Utc>,
    ) -> Result<entity::cart_item::Model, DbErr> {
        entity::cart_item::ActiveModel {
            cart_id: ActiveValue::Set(cart_id),
            product_id: ActiveValue::Set(line.product_id),
            variant_id: ActiveValue::Set(line.variant_id),
            size_id: ActiveValue::Set(line.size_id),
            sku: ActiveValue::Set(line.sku.clone()),
            title: ActiveValue::Set(line.title.clone()),
            image: ActiveValue::Set(line.image.clone()),
            price_at: ActiveValue::Set(line.price),
            quantity: ActiveValue::Set(line.quantity),
            position: ActiveValue::Set(position),
            added_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Updates a merged line: accumulated quantity, refreshed price and
    /// added-at stamp.
    pub async fn update_line(
        &self,
        item_id: i32,
        quantity: i32,
        price_at: i64,
        added_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::cart_item::ActiveModel {
            id: ActiveValue::Unchanged(item_id),
            quantity: ActiveValue::Set(quantity),
            price_at: ActiveValue::Set(price_at),
            added_at: ActiveValue::Set(added_at),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Updates a decremented line's quantity and added-at stamp.
    pub async fn update_line_quantity(
        &self,
        item_id: i32,
        quantity: i32,
        added_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::cart_item::ActiveModel {
            id: ActiveValue::Unchanged(item_id),
            quantity: ActiveValue::Set(quantity),
            added_at: ActiveValue::Set(added_at),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Removes one line row.
    pub async fn delete_line(&self, item_id: i32) -> Result<(), DbErr> {
        entity::prelude::CartItem::delete_by_id(item_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Overwrites the cart's monetary fields with recalculated totals.
    pub async fn update_totals(
        &self,
        cart_id: i32,
        totals: CartTotals,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::cart::ActiveModel {
            id: ActiveValue::Unchanged(cart_id),
            subtotal: ActiveValue::Set(totals.subtotal),
            total: ActiveValue::Set(totals.total),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Soft-deletes a cart, marking it ineligible for checkout.
    ///
    /// Used when a guest cart has been merged into a user cart.
    pub async fn deactivate(&self, cart_id: i32, now: DateTime<Utc>) -> Result<(), DbErr> {
        entity::cart::ActiveModel {
            id: ActiveValue::Unchanged(cart_id),
            is_active: ActiveValue::Set(false),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Deletes a cart; line rows cascade.
    pub async fn delete(&self, cart_id: i32) -> Result<(), DbErr> {
        entity::prelude::Cart::delete_by_id(cart_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes every cart whose expiry has passed.
    ///
    /// # Returns
    /// - `Ok(count)`: number of carts removed
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Cart::delete_many()
            .filter(entity::cart::Column::ExpiresAt.is_not_null())
            .filter(entity::cart::Column::ExpiresAt.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
