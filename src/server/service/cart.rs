//! Cart mutation engine.
//!
//! Safely mutates a user's single active cart under concurrent requests.
//! Every mutating operation follows the same shape: open a transaction, read
//! the current cart, apply the in-memory mutation on the aggregate, persist
//! the changed rows plus recalculated totals, commit. The read-modify-write
//! is not atomic on its own, so the whole attempt is wrapped in the bounded
//! retry helper — transient store contention re-runs the operation from a
//! fresh read, which is what makes a lost update impossible.

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::cart::CartRepository,
    error::AppError,
    model::cart::{CartAggregate, CartLine, CartOwner, DecrementOutcome, NewCartLine},
    util::retry::{retry_on_transient, sqlite_busy, RetryPolicy},
};

/// How long an untouched guest cart survives before the sweep reclaims it.
const GUEST_CART_TTL_DAYS: i64 = 30;

pub struct CartService<'a> {
    db: &'a DatabaseConnection,
    policy: RetryPolicy,
}

impl<'a> CartService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            policy: RetryPolicy::default(),
        }
    }

    /// Overrides the retry budget, mainly for tests.
    pub fn with_retry_policy(db: &'a DatabaseConnection, policy: RetryPolicy) -> Self {
        Self { db, policy }
    }

    /// Loads the owner's active cart without mutating anything.
    pub async fn get_cart(&self, owner: &CartOwner) -> Result<Option<CartAggregate>, AppError> {
        let repo = CartRepository::new(self.db);
        Ok(repo.find_active(owner).await?)
    }

    /// Adds an item to the owner's cart, creating the cart on first add.
    ///
    /// An existing line for the same (product, variant) pair absorbs the
    /// quantity and takes the newly supplied price; otherwise the item is
    /// appended. Totals are recalculated and the cart persisted.
    ///
    /// # Returns
    /// - `Ok(CartAggregate)`: the saved cart
    /// - `Err(AppError::BadRequest)`: non-positive quantity or invalid input
    /// - `Err(AppError::Retryable)`: contention outlasted the retry budget
    pub async fn add_or_update_item(
        &self,
        owner: &CartOwner,
        line: NewCartLine,
    ) -> Result<CartAggregate, AppError> {
        if line.quantity < 1 {
            return Err(AppError::BadRequest(
                "Quantity must be a positive integer".to_string(),
            ));
        }
        if line.price < 0 {
            return Err(AppError::BadRequest("Price cannot be negative".to_string()));
        }
        if line.sku.trim().is_empty() {
            return Err(AppError::BadRequest("SKU is required".to_string()));
        }

        retry_on_transient(self.policy, sqlite_busy, || {
            self.try_add_or_update(owner, &line)
        })
        .await
    }

    async fn try_add_or_update(
        &self,
        owner: &CartOwner,
        line: &NewCartLine,
    ) -> Result<CartAggregate, AppError> {
        let txn = self.db.begin().await?;
        let repo = CartRepository::new(&txn);
        let now = Utc::now();

        let mut aggregate = match repo.find_active(owner).await? {
            Some(aggregate) => aggregate,
            None => {
                let expires_at = match owner {
                    CartOwner::Guest(_) => Some(now + Duration::days(GUEST_CART_TTL_DAYS)),
                    CartOwner::User(_) => None,
                };
                repo.create(owner, expires_at).await?
            }
        };

        match aggregate.find_mergeable(line.product_id, line.variant_id) {
            Some(item_id) => {
                let (quantity, price_at) = aggregate
                    .merge_into(item_id, line.quantity, line.price, now)
                    .map(|merged| (merged.quantity, merged.price_at))
                    .ok_or_else(|| {
                        AppError::Internal("Cart line vanished during merge".to_string())
                    })?;
                repo.update_line(item_id, quantity, price_at, now).await?;
            }
            None => {
                let position = aggregate.next_position();
                let inserted = repo
                    .insert_line(aggregate.cart.id, line, position, now)
                    .await?;
                aggregate.insert(CartLine::from_entity(inserted));
            }
        }

        let totals = aggregate.recalculate();
        repo.update_totals(aggregate.cart.id, totals, now).await?;

        txn.commit().await?;

        Ok(aggregate)
    }

    /// Decrements an item's quantity by `delta`, removing it at zero.
    ///
    /// # Returns
    /// - `Ok(CartAggregate)`: the saved cart
    /// - `Err(AppError::BadRequest)`: delta is not a positive integer
    /// - `Err(AppError::NotFound)`: no active cart holds such an item — also
    ///   the outcome for the loser of two concurrent removals, whose retry
    ///   re-reads a cart the item is already gone from
    pub async fn decrement_item(
        &self,
        owner: &CartOwner,
        item_id: i32,
        delta: i32,
    ) -> Result<CartAggregate, AppError> {
        if delta < 1 {
            return Err(AppError::BadRequest(
                "Invalid decrement amount (delta must be integer >= 1)".to_string(),
            ));
        }

        retry_on_transient(self.policy, sqlite_busy, || {
            self.try_decrement(owner, item_id, delta)
        })
        .await
    }

    async fn try_decrement(
        &self,
        owner: &CartOwner,
        item_id: i32,
        delta: i32,
    ) -> Result<CartAggregate, AppError> {
        let txn = self.db.begin().await?;
        let repo = CartRepository::new(&txn);
        let now = Utc::now();

        let mut aggregate = repo
            .find_active(owner)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

        let outcome = aggregate
            .decrement(item_id, delta, now)
            .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

        match outcome {
            DecrementOutcome::Removed { item_id } => {
                repo.delete_line(item_id).await?;
            }
            DecrementOutcome::Updated {
                item_id,
                quantity,
                added_at,
            } => {
                repo.update_line_quantity(item_id, quantity, added_at).await?;
            }
        }

        let totals = aggregate.recalculate();
        repo.update_totals(aggregate.cart.id, totals, now).await?;

        txn.commit().await?;

        Ok(aggregate)
    }

    /// Deletes the owner's active cart.
    ///
    /// # Returns
    /// - `Ok(())`: cart removed, line rows cascade
    /// - `Err(AppError::NotFound)`: the owner has no active cart
    pub async fn clear_cart(&self, owner: &CartOwner) -> Result<(), AppError> {
        retry_on_transient(self.policy, sqlite_busy, || self.try_clear(owner)).await
    }

    async fn try_clear(&self, owner: &CartOwner) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = CartRepository::new(&txn);

        let aggregate = repo
            .find_active(owner)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        repo.delete(aggregate.cart.id).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Folds a guest cart into the user's cart after login.
    ///
    /// Every guest line goes through the same merge-or-append rule as a
    /// normal add; the guest cart is then deactivated (soft-deleted), never
    /// physically merged. A missing guest cart makes this a plain
    /// get-or-create of the user cart.
    pub async fn merge_guest_cart(
        &self,
        user_id: i32,
        guest_id: &str,
    ) -> Result<CartAggregate, AppError> {
        retry_on_transient(self.policy, sqlite_busy, || {
            self.try_merge_guest(user_id, guest_id)
        })
        .await
    }

    async fn try_merge_guest(
        &self,
        user_id: i32,
        guest_id: &str,
    ) -> Result<CartAggregate, AppError> {
        let txn = self.db.begin().await?;
        let repo = CartRepository::new(&txn);
        let now = Utc::now();

        let user_owner = CartOwner::User(user_id);
        let mut user_cart = match repo.find_active(&user_owner).await? {
            Some(aggregate) => aggregate,
            None => repo.create(&user_owner, None).await?,
        };

        let guest_owner = CartOwner::Guest(guest_id.to_string());
        if let Some(guest_cart) = repo.find_active(&guest_owner).await? {
            for guest_line in guest_cart.ordered_lines() {
                let incoming = NewCartLine {
                    product_id: guest_line.product_id,
                    variant_id: guest_line.variant_id,
                    size_id: guest_line.size_id,
                    sku: guest_line.sku.clone(),
                    title: guest_line.title.clone(),
                    image: guest_line.image.clone(),
                    price: guest_line.price_at,
                    quantity: guest_line.quantity,
                };

                match user_cart.find_mergeable(incoming.product_id, incoming.variant_id) {
                    Some(item_id) => {
                        let (quantity, price_at) = user_cart
                            .merge_into(item_id, incoming.quantity, incoming.price, now)
                            .map(|merged| (merged.quantity, merged.price_at))
                            .ok_or_else(|| {
                                AppError::Internal("Cart line vanished during merge".to_string())
                            })?;
                        repo.update_line(item_id, quantity, price_at, now).await?;
                    }
                    None => {
                        let position = user_cart.next_position();
                        let inserted = repo
                            .insert_line(user_cart.cart.id, &incoming, position, now)
                            .await?;
                        user_cart.insert(CartLine::from_entity(inserted));
                    }
                }
            }

            repo.deactivate(guest_cart.cart.id, now).await?;
        }

        let totals = user_cart.recalculate();
        repo.update_totals(user_cart.cart.id, totals, now).await?;

        txn.commit().await?;

        Ok(user_cart)
    }
}
