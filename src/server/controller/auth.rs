use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{SendOtpDto, UserDto, VerifyOtpDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::{
            auth::{AuthService, OtpDestination},
            cart::CartService,
            notify::{EmailSender, SmsSender},
        },
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Session key holding the verified user id.
pub const SESSION_AUTH_USER_ID: &str = "auth_user_id";

/// Session key holding the anonymous guest cart id.
pub const SESSION_GUEST_ID: &str = "guest_cart_id";

fn user_to_dto(user: entity::user::Model) -> UserDto {
    UserDto {
        id: user.id,
        email: user.email,
        phone: user.phone,
        name: user.name,
        role: user.role,
    }
}

/// Send a one-time login code.
///
/// Issues a short-lived code for the supplied email address or phone number
/// and dispatches it through the matching notification sender.
///
/// # Returns
/// - `200 OK` - Code sent
/// - `400 Bad Request` - Missing or malformed destination
/// - `500 Internal Server Error` - Sender failure
#[utoipa::path(
    post,
    path = "/api/v1/auth/otp/send",
    tag = AUTH_TAG,
    request_body = SendOtpDto,
    responses(
        (status = 200, description = "Verification code sent", body = MessageDto),
        (status = 400, description = "Missing or malformed destination", body = ErrorDto),
        (status = 500, description = "Failed to send the code", body = ErrorDto)
    ),
)]
pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpDto>,
) -> Result<impl IntoResponse, AppError> {
    let destination = OtpDestination::parse(payload.email, payload.phone)?;

    let email_sender = EmailSender::new(&state.http_client, &state.config);
    let sms_sender = SmsSender::new(&state.http_client, &state.config);

    AuthService::new(&state.db, &state.otp_service)
        .send_login_otp(&destination, &email_sender, &sms_sender)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Verification code sent".to_string(),
        }),
    ))
}

/// Verify a one-time login code.
///
/// Consumes the code, finds or creates the account, and stores the user id
/// in the session. Any guest cart accumulated before login is folded into
/// the user's cart.
///
/// # Returns
/// - `200 OK` - Logged in
/// - `400 Bad Request` - Wrong, expired, or consumed code
#[utoipa::path(
    post,
    path = "/api/v1/auth/otp/verify",
    tag = AUTH_TAG,
    request_body = VerifyOtpDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 400, description = "Invalid or expired code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<VerifyOtpDto>,
) -> Result<impl IntoResponse, AppError> {
    let destination = OtpDestination::parse(payload.email, payload.phone)?;

    let user = AuthService::new(&state.db, &state.otp_service)
        .verify_otp(&destination, &payload.code)
        .await?;

    session.insert(SESSION_AUTH_USER_ID, user.id).await?;

    // Fold the pre-login guest cart into the user's cart.
    if let Some(guest_id) = session.get::<String>(SESSION_GUEST_ID).await? {
        CartService::new(&state.db)
            .merge_guest_cart(user.id, &guest_id)
            .await?;
        let _ = session.remove::<String>(SESSION_GUEST_ID).await?;
    }

    Ok((StatusCode::OK, Json(user_to_dto(user))))
}

/// Log out the current session.
///
/// # Returns
/// - `200 OK` - Session cleared
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Session cleared", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    session.flush().await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Logged out".to_string(),
        }),
    ))
}

/// Get the authenticated user.
///
/// # Returns
/// - `200 OK` - The current user
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The current user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user_to_dto(user))))
}
