use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        variant::{
            CreateMultipleVariantsDto, CreateVariantDto, SizePayloadDto, UpdateSizeDto,
            UpdateVariantDto, VariantDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::variant::{
            normalize_sku, CreateVariantParams, NewSizeParams, UpdateSizeParams,
            UpdateVariantParams, VariantWithSizes,
        },
        service::variant::VariantService,
        state::AppState,
    },
};

/// Tag for grouping variant endpoints in OpenAPI documentation
pub static VARIANT_TAG: &str = "variant";

fn size_params_from_dto(dto: SizePayloadDto) -> NewSizeParams {
    NewSizeParams {
        label: dto.label.trim().to_string(),
        stock: dto.stock,
        sku: normalize_sku(&dto.sku),
        is_active: dto.is_active,
    }
}

/// Create a variant under a product.
///
/// SKUs in the payload must be unique after normalization, both within the
/// payload and across the whole catalog.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
///
/// # Returns
/// - `201 Created` - The created variant
/// - `400 Bad Request` - Invalid payload (including duplicate payload SKUs)
/// - `404 Not Found` - Product absent
/// - `409 Conflict` - A SKU is already taken somewhere in the catalog
#[utoipa::path(
    post,
    path = "/api/v1/products/{product_id}/create-variant",
    tag = VARIANT_TAG,
    params(
        ("product_id" = i32, Path, description = "Parent product ID")
    ),
    request_body = CreateVariantDto,
    responses(
        (status = 201, description = "Variant created", body = VariantDto),
        (status = 400, description = "Invalid variant data", body = ErrorDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 409, description = "SKU already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_variant(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
    Json(payload): Json<CreateVariantDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = CreateVariantParams::from_dto(payload);

    let variant = VariantService::new(&state.db)
        .create_variant(product_id, params)
        .await?;

    Ok((StatusCode::CREATED, Json(variant.into_dto())))
}

/// Create several variants under a product, all-or-nothing.
///
/// Rejects duplicate colours and duplicate SKUs anywhere in the payload.
/// Any failure rolls back every insert in the batch.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
///
/// # Returns
/// - `201 Created` - All variants created
/// - `400 Bad Request` - Invalid payload
/// - `404 Not Found` - Product absent
/// - `409 Conflict` - A SKU is already taken
#[utoipa::path(
    post,
    path = "/api/v1/products/{product_id}/create-variants",
    tag = VARIANT_TAG,
    params(
        ("product_id" = i32, Path, description = "Parent product ID")
    ),
    request_body = CreateMultipleVariantsDto,
    responses(
        (status = 201, description = "Variants created", body = Vec<VariantDto>),
        (status = 400, description = "Invalid variant data", body = ErrorDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 409, description = "SKU already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_multiple_variants(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
    Json(payload): Json<CreateMultipleVariantsDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let variants: Vec<CreateVariantParams> = payload
        .variants
        .into_iter()
        .map(CreateVariantParams::from_dto)
        .collect();

    let created = VariantService::new(&state.db)
        .create_multiple_variants(product_id, variants)
        .await?;

    let dtos: Vec<VariantDto> = created
        .into_iter()
        .map(VariantWithSizes::into_dto)
        .collect();

    Ok((StatusCode::CREATED, Json(dtos)))
}

/// List a product's variants.
///
/// # Returns
/// - `200 OK` - The product's variants with sizes and images
#[utoipa::path(
    get,
    path = "/api/v1/products/{product_id}/variants",
    tag = VARIANT_TAG,
    params(
        ("product_id" = i32, Path, description = "Parent product ID")
    ),
    responses(
        (status = 200, description = "The product's variants", body = Vec<VariantDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_variants(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let variants = VariantService::new(&state.db)
        .list_by_product(product_id)
        .await?;

    let dtos: Vec<VariantDto> = variants
        .into_iter()
        .map(VariantWithSizes::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get a variant by ID.
///
/// # Returns
/// - `200 OK` - The variant
/// - `404 Not Found` - No such variant
#[utoipa::path(
    get,
    path = "/api/v1/variants/{variant_id}",
    tag = VARIANT_TAG,
    params(
        ("variant_id" = i32, Path, description = "Variant ID")
    ),
    responses(
        (status = 200, description = "The variant", body = VariantDto),
        (status = 404, description = "Variant not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let variant = VariantService::new(&state.db)
        .get(variant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))?;

    Ok((StatusCode::OK, Json(variant.into_dto())))
}

/// Update a variant's colour or active flag.
///
/// Toggling the active flag re-aggregates the parent product's stock.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
#[utoipa::path(
    patch,
    path = "/api/v1/variants/{variant_id}",
    tag = VARIANT_TAG,
    params(
        ("variant_id" = i32, Path, description = "Variant ID")
    ),
    request_body = UpdateVariantDto,
    responses(
        (status = 200, description = "Variant updated", body = VariantDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Variant not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_variant(
    State(state): State<AppState>,
    session: Session,
    Path(variant_id): Path<i32>,
    Json(payload): Json<UpdateVariantDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateVariantParams::from_dto(payload);

    let variant = VariantService::new(&state.db)
        .update_variant(variant_id, params)
        .await?;

    Ok((StatusCode::OK, Json(variant.into_dto())))
}

/// Delete a variant.
///
/// Sizes cascade away; the parent product's stock is re-aggregated.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
#[utoipa::path(
    delete,
    path = "/api/v1/variants/{variant_id}",
    tag = VARIANT_TAG,
    params(
        ("variant_id" = i32, Path, description = "Variant ID")
    ),
    responses(
        (status = 200, description = "Variant deleted", body = MessageDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Variant not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_variant(
    State(state): State<AppState>,
    session: Session,
    Path(variant_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    VariantService::new(&state.db).delete_variant(variant_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Variant deleted successfully".to_string(),
        }),
    ))
}

/// Add a size to a variant.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
///
/// # Returns
/// - `201 Created` - Size added
/// - `409 Conflict` - SKU already taken, in this variant or elsewhere
#[utoipa::path(
    post,
    path = "/api/v1/variants/{variant_id}/sizes",
    tag = VARIANT_TAG,
    params(
        ("variant_id" = i32, Path, description = "Variant ID")
    ),
    request_body = SizePayloadDto,
    responses(
        (status = 201, description = "Size added", body = VariantDto),
        (status = 400, description = "Invalid size data", body = ErrorDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Variant not found", body = ErrorDto),
        (status = 409, description = "SKU already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_size(
    State(state): State<AppState>,
    session: Session,
    Path(variant_id): Path<i32>,
    Json(payload): Json<SizePayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let service = VariantService::new(&state.db);
    service
        .add_size(variant_id, size_params_from_dto(payload))
        .await?;

    let variant = service
        .get(variant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(variant.into_dto())))
}

/// Update a size.
///
/// A SKU change re-runs the catalog-wide uniqueness check.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
#[utoipa::path(
    patch,
    path = "/api/v1/variants/{variant_id}/sizes/{size_id}",
    tag = VARIANT_TAG,
    params(
        ("variant_id" = i32, Path, description = "Variant ID"),
        ("size_id" = i32, Path, description = "Size ID")
    ),
    request_body = UpdateSizeDto,
    responses(
        (status = 200, description = "Size updated", body = VariantDto),
        (status = 400, description = "Invalid size data", body = ErrorDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Variant or size not found", body = ErrorDto),
        (status = 409, description = "SKU already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_size(
    State(state): State<AppState>,
    session: Session,
    Path((variant_id, size_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateSizeDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let params = UpdateSizeParams::from_dto(payload);

    let service = VariantService::new(&state.db);
    service.update_size(variant_id, size_id, params).await?;

    let variant = service
        .get(variant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Variant not found".to_string()))?;

    Ok((StatusCode::OK, Json(variant.into_dto())))
}

/// Delete a size.
///
/// # Access Control
/// - `Admin` - Only admins manage the catalog
#[utoipa::path(
    delete,
    path = "/api/v1/variants/{variant_id}/sizes/{size_id}",
    tag = VARIANT_TAG,
    params(
        ("variant_id" = i32, Path, description = "Variant ID"),
        ("size_id" = i32, Path, description = "Size ID")
    ),
    responses(
        (status = 200, description = "Size deleted", body = MessageDto),
        (status = 401, description = "User not authenticated or not an admin", body = ErrorDto),
        (status = 404, description = "Variant or size not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_size(
    State(state): State<AppState>,
    session: Session,
    Path((variant_id, size_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    VariantService::new(&state.db)
        .delete_size(variant_id, size_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Size deleted successfully".to_string(),
        }),
    ))
}
