use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for sending a login code. Exactly one of `email` or `phone`
/// must be present.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendOtpDto {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpDto {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub role: String,
}
