use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        shipping::{ShippingQuoteRequestDto, ShippingQuotesDto},
    },
    server::{
        error::AppError,
        service::shipping::rates::{RateQuery, RateService},
        state::AppState,
    },
};

/// Tag for grouping shipping endpoints in OpenAPI documentation
pub static SHIPPING_TAG: &str = "shipping";

/// Check courier serviceability for a pincode pair.
///
/// Queries the shipping provider with the shared cached credential; an
/// expired credential is refreshed transparently.
///
/// # Returns
/// - `200 OK` - Available courier quotes, possibly empty
/// - `400 Bad Request` - Malformed pincodes or weight
#[utoipa::path(
    post,
    path = "/api/v1/shipping/check",
    tag = SHIPPING_TAG,
    request_body = ShippingQuoteRequestDto,
    responses(
        (status = 200, description = "Courier quotes", body = ShippingQuotesDto),
        (status = 400, description = "Malformed pincodes or weight", body = ErrorDto),
        (status = 500, description = "Shipping provider failure", body = ErrorDto)
    ),
)]
pub async fn check_shipping(
    State(state): State<AppState>,
    Json(payload): Json<ShippingQuoteRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let query = RateQuery {
        pickup_pincode: payload
            .pickup_pincode
            .unwrap_or_else(|| state.config.pickup_pincode.clone()),
        delivery_pincode: payload.delivery_pincode,
        weight: payload.weight,
        cod: payload.cod,
    };

    let quotes = RateService::new(&state.http_client, &state.config, &state.token_cache)
        .check_serviceability(&query)
        .await?;

    Ok((StatusCode::OK, Json(ShippingQuotesDto { quotes })))
}
