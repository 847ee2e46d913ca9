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
        api::{ErrorDto, MessageDto},
        product::{CreateProductDto, PaginatedProductsDto, ProductDto, UpdateProductDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::product::{CreateProductParams, ProductQueryParams, UpdateProductParams},
        service::product::ProductService,
        state::AppState,
    },
};

/// Tag for grouping product endpoints in OpenAPI documentation
pub static PRODUCT_TAG: &str = "product";

#[derive(Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub category: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
}

fn default_entries() -> u64 {
    10
}

/// List products.
///
/// Public, paginated catalog listing with optional category, title-search,
/// and in-stock filters.
///
/// # Returns
/// - `200 OK` - Page of products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = PRODUCT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("q" = Option<String>, Query, description = "Title substring filter"),
        ("in_stock" = Option<bool>, Query, description = "Only products with stock")
    ),
    responses(
        (status = 200, description = "Page of products", body = PaginatedProductsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = ProductQueryParams {
        page: query.page,
        per_page: query.entries,
        category: query.category,
        query: query.q,
        in_stock: query.in_stock,
    };

    let products = ProductService::new(&state.db).list(params).await?;

    Ok((StatusCode::OK, Json(products)))
}

/// Get a product by ID.
///
/// # Returns
/// - `200 OK` - The product
/// - `404 Not Found` - No such product
#[utoipa::path(
    get,
    path = "/api/v1/products/{product_id}",
    tag = PRODUCT_TAG,
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "The product", body = ProductDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::new(&state.db)
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok((StatusCode::OK, Json(product)))
}

/// Get a product by slug.
///
/// # Returns
/// - `200 OK` - The product
/// - `404 Not Found` - No such product
#[utoipa::path(
    get,
    path = "/api/v1/products/slug/{slug}",
    tag = PRODUCT_TAG,
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "The product", body = ProductDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::new(&state.db)
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok((StatusCode::OK, Json(product)))
}

/// Create a product.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
///
/// # Returns
/// - `201 Created` - The created product
/// - `400 Bad Request` - Invalid payload
/// - `409 Conflict` - Slug already taken
#[utoipa::path(
    post,
    path = "/api/v1/products/add",
    tag = PRODUCT_TAG,
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, description = "Invalid product data", body = ErrorDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 409, description = "Slug already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateProductDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateProductParams::from_dto(payload);

    let product = ProductService::new(&state.db).create(params).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
///
/// # Returns
/// - `200 OK` - The updated product
/// - `404 Not Found` - No such product
#[utoipa::path(
    patch,
    path = "/api/v1/products/{product_id}",
    tag = PRODUCT_TAG,
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, description = "Invalid product data", body = ErrorDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_product(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateProductDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateProductParams::from_dto(payload);

    let product = ProductService::new(&state.db)
        .update(product_id, params)
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

/// Delete a product.
///
/// Variants, sizes, and images cascade away with it.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
///
/// # Returns
/// - `200 OK` - Product deleted
/// - `404 Not Found` - No such product
#[utoipa::path(
    delete,
    path = "/api/v1/products/{product_id}",
    tag = PRODUCT_TAG,
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_product(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ProductService::new(&state.db).delete(product_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Product deleted successfully".to_string(),
        }),
    ))
}
