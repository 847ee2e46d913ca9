//! Order and payment data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::cart::CartAggregate;
use crate::server::model::order::CheckoutParams;

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an order snapshotting the cart's totals and address.
    pub async fn insert_order(
        &self,
        params: &CheckoutParams,
        cart: &CartAggregate,
    ) -> Result<entity::order::Model, DbErr> {
        let now = Utc::now();

        entity::order::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            status: ActiveValue::Set(entity::order::status::PENDING.to_string()),
            subtotal: ActiveValue::Set(cart.cart.subtotal),
            discount: ActiveValue::Set(cart.cart.discount),
            shipping: ActiveValue::Set(cart.cart.shipping),
            tax: ActiveValue::Set(0),
            total: ActiveValue::Set(cart.cart.total),
            currency: ActiveValue::Set(cart.cart.currency.clone()),
            ship_name: ActiveValue::Set(Some(params.ship_name.clone())),
            ship_phone: ActiveValue::Set(Some(params.ship_phone.clone())),
            ship_street: ActiveValue::Set(Some(params.ship_street.clone())),
            ship_city: ActiveValue::Set(Some(params.ship_city.clone())),
            ship_state: ActiveValue::Set(Some(params.ship_state.clone())),
            ship_postal_code: ActiveValue::Set(Some(params.ship_postal_code.clone())),
            ship_country: ActiveValue::Set(Some(params.ship_country.clone())),
            placed_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Snapshots the cart's lines into order items.
    pub async fn insert_items(
        &self,
        order_id: i32,
        cart: &CartAggregate,
    ) -> Result<Vec<entity::order_item::Model>, DbErr> {
        let lines = cart.ordered_lines();
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            // Enrich the snapshot with the size label while it still exists.
            let size_label = entity::prelude::VariantSize::find_by_id(line.size_id)
                .one(self.db)
                .await?
                .map(|size| size.label);

            let item = entity::order_item::ActiveModel {
                order_id: ActiveValue::Set(order_id),
                product_id: ActiveValue::Set(line.product_id),
                variant_id: ActiveValue::Set(line.variant_id),
                title: ActiveValue::Set(line.title.clone()),
                color: ActiveValue::Set(None),
                size_label: ActiveValue::Set(size_label),
                sku: ActiveValue::Set(line.sku.clone()),
                price: ActiveValue::Set(line.price_at),
                quantity: ActiveValue::Set(line.quantity),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            items.push(item);
        }

        Ok(items)
    }

    /// Records the pending payment for a freshly placed order.
    pub async fn insert_payment(
        &self,
        order: &entity::order::Model,
        method: &str,
        idempotency_key: Option<String>,
    ) -> Result<entity::payment::Model, DbErr> {
        let now = Utc::now();

        entity::payment::ActiveModel {
            order_id: ActiveValue::Set(order.id),
            user_id: ActiveValue::Set(order.user_id),
            amount: ActiveValue::Set(order.total),
            currency: ActiveValue::Set(order.currency.clone()),
            method: ActiveValue::Set(method.to_string()),
            transaction_id: ActiveValue::Set(None),
            status: ActiveValue::Set(entity::payment::status::PENDING.to_string()),
            idempotency_key: ActiveValue::Set(idempotency_key),
            paid_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets one of the user's orders with its items.
    pub async fn get_for_user(
        &self,
        order_id: i32,
        user_id: i32,
    ) -> Result<Option<(entity::order::Model, Vec<entity::order_item::Model>)>, DbErr> {
        let Some(order) = entity::prelude::Order::find_by_id(order_id)
            .filter(entity::order::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let items = entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.eq(order.id))
            .all(self.db)
            .await?;

        Ok(Some((order, items)))
    }

    /// Paginated order history for a user, most recent first.
    pub async fn list_by_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::order::Model>, u64), DbErr> {
        let paginator = entity::prelude::Order::find()
            .filter(entity::order::Column::UserId.eq(user_id))
            .order_by_desc(entity::order::Column::PlacedAt)
            .order_by_desc(entity::order::Column::Id)
            .paginate(self.db, per_page.max(1));

        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page).await?;

        Ok((orders, total))
    }

    /// Items for one order.
    pub async fn get_items(
        &self,
        order_id: i32,
    ) -> Result<Vec<entity::order_item::Model>, DbErr> {
        entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.eq(order_id))
            .all(self.db)
            .await
    }
}
