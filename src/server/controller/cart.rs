use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rand::Rng;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        cart::{AddCartItemDto, CartDto, DecrementCartItemDto},
    },
    server::{
        controller::auth::{SESSION_AUTH_USER_ID, SESSION_GUEST_ID},
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            cart::{CartOwner, NewCartLine},
            variant::normalize_sku,
        },
        service::cart::CartService,
        state::AppState,
    },
};

/// Tag for grouping cart endpoints in OpenAPI documentation
pub static CART_TAG: &str = "cart";

/// Resolves the cart owner for this request.
///
/// A logged-in session owns carts by user id. Anonymous visitors get a
/// random guest id minted into their session on first cart touch, so a
/// guest's adds land in one cart across requests.
async fn cart_owner(session: &Session) -> Result<CartOwner, AppError> {
    if let Some(user_id) = session.get::<i32>(SESSION_AUTH_USER_ID).await? {
        return Ok(CartOwner::User(user_id));
    }

    if let Some(guest_id) = session.get::<String>(SESSION_GUEST_ID).await? {
        return Ok(CartOwner::Guest(guest_id));
    }

    let guest_id = generate_guest_id();
    session.insert(SESSION_GUEST_ID, guest_id.clone()).await?;

    Ok(CartOwner::Guest(guest_id))
}

fn generate_guest_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    const LENGTH: usize = 24;

    let mut rng = rand::rng();

    (0..LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Get the active cart.
///
/// # Returns
/// - `200 OK` - The cart, or `null` when none exists yet
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    tag = CART_TAG,
    responses(
        (status = 200, description = "The active cart, or null when none exists", body = CartDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_cart(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let owner = cart_owner(&session).await?;

    let cart = CartService::new(&state.db).get_cart(&owner).await?;

    Ok((StatusCode::OK, Json(cart.map(|c| c.into_dto()))))
}

/// Add an item to the cart.
///
/// Creates the cart on first add. An item for an already-present
/// (product, variant) pair merges: quantity accumulates and the captured
/// price refreshes to the supplied value.
///
/// # Returns
/// - `201 Created` - The saved cart
/// - `400 Bad Request` - Non-positive quantity or invalid payload
/// - `500 Internal Server Error` - Contention outlasted the retry budget
#[utoipa::path(
    post,
    path = "/api/v1/cart/items",
    tag = CART_TAG,
    request_body = AddCartItemDto,
    responses(
        (status = 201, description = "Added to cart", body = CartDto),
        (status = 400, description = "Invalid item payload", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AddCartItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let owner = cart_owner(&session).await?;

    let line = NewCartLine {
        product_id: payload.product_id,
        variant_id: payload.variant_id,
        size_id: payload.size_id,
        sku: normalize_sku(&payload.sku),
        title: payload.title,
        image: payload.image,
        price: payload.price,
        quantity: payload.quantity,
    };

    let cart = CartService::new(&state.db)
        .add_or_update_item(&owner, line)
        .await?;

    Ok((StatusCode::CREATED, Json(cart.into_dto())))
}

/// Decrement an item's quantity.
///
/// Removes the item entirely when the decrement reaches zero.
///
/// # Returns
/// - `200 OK` - The saved cart
/// - `400 Bad Request` - Delta is not a positive integer
/// - `404 Not Found` - No active cart holds such an item
#[utoipa::path(
    patch,
    path = "/api/v1/cart/items/{item_id}",
    tag = CART_TAG,
    params(
        ("item_id" = i32, Path, description = "Cart item ID")
    ),
    request_body = DecrementCartItemDto,
    responses(
        (status = 200, description = "Item quantity decreased or item removed", body = CartDto),
        (status = 400, description = "Invalid decrement amount", body = ErrorDto),
        (status = 404, description = "Cart item not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn decrement_item(
    State(state): State<AppState>,
    session: Session,
    Path(item_id): Path<i32>,
    Json(payload): Json<DecrementCartItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let owner = cart_owner(&session).await?;

    let cart = CartService::new(&state.db)
        .decrement_item(&owner, item_id, payload.delta)
        .await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

/// Delete the active cart.
///
/// # Returns
/// - `200 OK` - Cart deleted
/// - `404 Not Found` - No active cart
#[utoipa::path(
    post,
    path = "/api/v1/cart/clear",
    tag = CART_TAG,
    responses(
        (status = 200, description = "Cart deleted", body = MessageDto),
        (status = 404, description = "Cart not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let owner = cart_owner(&session).await?;

    CartService::new(&state.db).clear_cart(&owner).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Cart deleted successfully".to_string(),
        }),
    ))
}

/// Merge the session's guest cart into the logged-in user's cart.
///
/// # Returns
/// - `200 OK` - The merged cart
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    post,
    path = "/api/v1/cart/merge",
    tag = CART_TAG,
    responses(
        (status = 200, description = "The merged cart", body = CartDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn merge_cart(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let service = CartService::new(&state.db);

    let cart = match session.get::<String>(SESSION_GUEST_ID).await? {
        Some(guest_id) => {
            let merged = service.merge_guest_cart(user.id, &guest_id).await?;
            let _ = session.remove::<String>(SESSION_GUEST_ID).await?;
            merged
        }
        None => service
            .merge_guest_cart(user.id, "")
            .await?,
    };

    Ok((StatusCode::OK, Json(cart.into_dto())))
}
