use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, cart, order, product, shipping, variant},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::send_otp,
        auth::verify_otp,
        auth::logout,
        auth::me,
        cart::get_cart,
        cart::add_item,
        cart::decrement_item,
        cart::clear_cart,
        cart::merge_cart,
        product::list_products,
        product::get_product,
        product::get_product_by_slug,
        product::create_product,
        product::update_product,
        product::delete_product,
        variant::create_variant,
        variant::create_multiple_variants,
        variant::list_variants,
        variant::get_variant,
        variant::update_variant,
        variant::delete_variant,
        variant::add_size,
        variant::update_size,
        variant::delete_size,
        order::checkout,
        order::list_orders,
        order::get_order,
        shipping::check_shipping,
    ),
    info(
        title = "Storefront API",
        description = "E-commerce backend: catalog, cart, checkout, and shipping quotes"
    )
)]
struct ApiDoc;

pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/v1/auth/otp/send", post(auth::send_otp))
        .route("/api/v1/auth/otp/verify", post(auth::verify_otp))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/users/me", get(auth::me))
        .route("/api/v1/cart", get(cart::get_cart))
        .route("/api/v1/cart/items", post(cart::add_item))
        .route(
            "/api/v1/cart/items/{item_id}",
            axum::routing::patch(cart::decrement_item),
        )
        .route("/api/v1/cart/clear", post(cart::clear_cart))
        .route("/api/v1/cart/merge", post(cart::merge_cart))
        .route("/api/v1/products", get(product::list_products))
        .route("/api/v1/products/add", post(product::create_product))
        .route(
            "/api/v1/products/slug/{slug}",
            get(product::get_product_by_slug),
        )
        .route(
            "/api/v1/products/{product_id}",
            get(product::get_product)
                .patch(product::update_product)
                .delete(product::delete_product),
        )
        .route(
            "/api/v1/products/{product_id}/create-variant",
            post(variant::create_variant),
        )
        .route(
            "/api/v1/products/{product_id}/create-variants",
            post(variant::create_multiple_variants),
        )
        .route(
            "/api/v1/products/{product_id}/variants",
            get(variant::list_variants),
        )
        .route(
            "/api/v1/variants/{variant_id}",
            get(variant::get_variant)
                .patch(variant::update_variant)
                .delete(variant::delete_variant),
        )
        .route("/api/v1/variants/{variant_id}/sizes", post(variant::add_size))
        .route(
            "/api/v1/variants/{variant_id}/sizes/{size_id}",
            axum::routing::patch(variant::update_size).delete(variant::delete_size),
        )
        .route("/api/v1/orders/checkout", post(order::checkout))
        .route("/api/v1/orders", get(order::list_orders))
        .route("/api/v1/orders/{order_id}", get(order::get_order))
        .route("/api/v1/shipping/check", post(shipping::check_shipping))
        .layer(cors)
}
