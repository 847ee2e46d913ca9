//! Checkout and order history.

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};

use crate::model::order::{OrderDto, PaginatedOrdersDto};
use crate::server::{
    data::{cart::CartRepository, order::OrderRepository},
    error::AppError,
    model::{
        cart::CartOwner,
        order::{order_to_dto, CheckoutParams},
    },
    util::retry::{retry_on_transient, sqlite_busy, RetryPolicy},
};

fn map_duplicate_checkout(err: DbErr) -> AppError {
    if matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ) {
        AppError::Conflict("Checkout already processed for this request".to_string())
    } else {
        err.into()
    }
}

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
    policy: RetryPolicy,
}

impl<'a> OrderService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            policy: RetryPolicy::default(),
        }
    }

    /// Converts the user's active cart into an order.
    ///
    /// One retried transaction: snapshot the cart's lines into order items,
    /// copy the totals, record a pending payment, and deactivate the cart.
    /// The idempotency key's unique index turns a double-submitted checkout
    /// into a conflict instead of a second charge.
    ///
    /// # Returns
    /// - `Ok(OrderDto)`: the placed order
    /// - `Err(AppError::NotFound)`: no active cart
    /// - `Err(AppError::BadRequest)`: cart is empty or address invalid
    /// - `Err(AppError::Conflict)`: idempotency key already used
    pub async fn checkout(&self, params: CheckoutParams) -> Result<OrderDto, AppError> {
        params.validate()?;

        retry_on_transient(self.policy, sqlite_busy, || self.try_checkout(&params)).await
    }

    async fn try_checkout(&self, params: &CheckoutParams) -> Result<OrderDto, AppError> {
        let txn = self.db.begin().await?;

        let cart_repo = CartRepository::new(&txn);
        let owner = CartOwner::User(params.user_id);

        let cart = cart_repo
            .find_active(&owner)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        if cart.is_empty() {
            return Err(AppError::BadRequest("Cart is empty".to_string()));
        }

        let order_repo = OrderRepository::new(&txn);
        let order = order_repo.insert_order(params, &cart).await?;
        let items = order_repo.insert_items(order.id, &cart).await?;
        order_repo
            .insert_payment(&order, &params.payment_method, params.idempotency_key.clone())
            .await
            .map_err(map_duplicate_checkout)?;

        let now = chrono::Utc::now();
        cart_repo.deactivate(cart.cart.id, now).await?;

        txn.commit().await?;

        Ok(order_to_dto(order, items))
    }

    /// Gets one of the user's orders.
    pub async fn get(&self, user_id: i32, order_id: i32) -> Result<OrderDto, AppError> {
        let repo = OrderRepository::new(self.db);

        let (order, items) = repo
            .get_for_user(order_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        Ok(order_to_dto(order, items))
    }

    /// Paginated order history, most recent first.
    pub async fn list(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedOrdersDto, AppError> {
        let repo = OrderRepository::new(self.db);

        let (orders, total) = repo.list_by_user(user_id, page, per_page).await?;

        let mut dtos = Vec::with_capacity(orders.len());
        for order in orders {
            let items = repo.get_items(order.id).await?;
            dtos.push(order_to_dto(order, items));
        }

        Ok(PaginatedOrdersDto {
            orders: dtos,
            total,
            page,
            per_page,
        })
    }
}
