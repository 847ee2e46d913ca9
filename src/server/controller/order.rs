use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        order::{CheckoutDto, OrderDto, PaginatedOrdersDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::order::CheckoutParams,
        service::order::OrderService,
        state::AppState,
    },
};

/// Tag for grouping order endpoints in OpenAPI documentation
pub static ORDER_TAG: &str = "order";

#[derive(Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

/// Convert the active cart into an order.
///
/// Snapshots the cart lines, records a pending payment, and consumes the
/// cart. Safe to retry with the same idempotency key: the second attempt is
/// rejected instead of charging twice.
///
/// # Returns
/// - `201 Created` - The placed order
/// - `400 Bad Request` - Empty cart or invalid address
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - No active cart
/// - `409 Conflict` - Idempotency key already used
#[utoipa::path(
    post,
    path = "/api/v1/orders/checkout",
    tag = ORDER_TAG,
    request_body = CheckoutDto,
    responses(
        (status = 201, description = "Order placed", body = OrderDto),
        (status = 400, description = "Empty cart or invalid address", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Cart not found", body = ErrorDto),
        (status = 409, description = "Checkout already processed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let params = CheckoutParams::from_dto(user.id, payload);

    let order = OrderService::new(&state.db).checkout(params).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the user's orders, most recent first.
///
/// # Returns
/// - `200 OK` - Page of orders
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = ORDER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of orders", body = PaginatedOrdersDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_orders(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let orders = OrderService::new(&state.db)
        .list(user.id, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

/// Get one of the user's orders.
///
/// # Returns
/// - `200 OK` - The order
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - No such order for this user
#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}",
    tag = ORDER_TAG,
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "The order", body = OrderDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_order(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let order = OrderService::new(&state.db).get(user.id, order_id).await?;

    Ok((StatusCode::OK, Json(order)))
}
