use crate::server::error::{config::ConfigError, AppError};

const SHIPPING_API_BASE: &str = "https://apiv2.shiprocket.in/v1/external";
const EMAIL_API_BASE: &str = "https://api.resend.com";
const SMS_API_BASE: &str = "https://api.twilio.com/2010-04-01";

pub struct Config {
    pub database_url: String,
    pub port: u16,

    pub shipping_api_base: String,
    pub shipping_email: String,
    pub shipping_password: String,
    /// Origin pincode used when a serviceability request doesn't supply one.
    pub pickup_pincode: String,

    pub email_api_base: String,
    pub email_api_key: String,
    pub email_from: String,

    pub sms_api_base: String,
    pub sms_account_sid: String,
    pub sms_auth_token: String,
    pub sms_from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            shipping_api_base: std::env::var("SHIPPING_API_BASE")
                .unwrap_or_else(|_| SHIPPING_API_BASE.to_string()),
            shipping_email: std::env::var("SHIPPING_EMAIL")
                .map_err(|_| ConfigError::MissingEnvVar("SHIPPING_EMAIL".to_string()))?,
            shipping_password: std::env::var("SHIPPING_PASSWORD")
                .map_err(|_| ConfigError::MissingEnvVar("SHIPPING_PASSWORD".to_string()))?,
            pickup_pincode: std::env::var("PICKUP_PINCODE")
                .map_err(|_| ConfigError::MissingEnvVar("PICKUP_PINCODE".to_string()))?,
            email_api_base: std::env::var("EMAIL_API_BASE")
                .unwrap_or_else(|_| EMAIL_API_BASE.to_string()),
            email_api_key: std::env::var("EMAIL_API_KEY")
                .map_err(|_| ConfigError::MissingEnvVar("EMAIL_API_KEY".to_string()))?,
            email_from: std::env::var("EMAIL_FROM")
                .map_err(|_| ConfigError::MissingEnvVar("EMAIL_FROM".to_string()))?,
            sms_api_base: std::env::var("SMS_API_BASE")
                .unwrap_or_else(|_| SMS_API_BASE.to_string()),
            sms_account_sid: std::env::var("SMS_ACCOUNT_SID")
                .map_err(|_| ConfigError::MissingEnvVar("SMS_ACCOUNT_SID".to_string()))?,
            sms_auth_token: std::env::var("SMS_AUTH_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("SMS_AUTH_TOKEN".to_string()))?,
            sms_from: std::env::var("SMS_FROM")
                .map_err(|_| ConfigError::MissingEnvVar("SMS_FROM".to_string()))?,
        })
    }
}
