use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The session carries no authenticated user id.
    ///
    /// Results in a 401 Unauthorized response asking the client to log in.
    #[error("No authenticated user in session")]
    UserNotInSession,

    /// The session's user id no longer resolves to a database row.
    ///
    /// Usually means the account was deleted while a session survived.
    /// Results in a 401 Unauthorized response.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// The authenticated user lacks the required role.
    ///
    /// Results in a 403 Forbidden response.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Client-facing messages stay generic; the detailed variants are logged at
/// debug level for diagnostics.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                tracing::debug!("{}", self);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: "Unauthenticated - please login".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::AccessDenied(_, _) => {
                tracing::debug!("{}", self);
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "Unauthorized".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
