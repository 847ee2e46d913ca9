//! One-time-code login flow.
//!
//! Identity verification itself lives outside the core: this service issues
//! a code, dispatches it through a notification sender, and on successful
//! verification resolves (or creates) the user row whose id the controller
//! stores in the session. Everything downstream only ever sees the verified
//! user id and role.

pub mod otp;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    service::{
        auth::otp::OtpService,
        notify::{EmailSender, SmsSender},
    },
};

/// Where a login code is delivered. Exactly one contact point per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpDestination {
    Email(String),
    Phone(String),
}

impl OtpDestination {
    /// Parses and validates the contact point from a request body.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)`: neither or both supplied, or malformed
    pub fn parse(email: Option<String>, phone: Option<String>) -> Result<Self, AppError> {
        match (email, phone) {
            (Some(email), None) => {
                let email = email.trim().to_lowercase();
                if !email.contains('@') || email.len() < 3 {
                    return Err(AppError::BadRequest("Invalid email address".to_string()));
                }
                Ok(Self::Email(email))
            }
            (None, Some(phone)) => {
                let phone = phone.trim().to_string();
                let digits = phone.strip_prefix('+').unwrap_or(&phone);
                if digits.is_empty()
                    || !digits.chars().all(|c| c.is_ascii_digit())
                    || !(10..=15).contains(&digits.len())
                {
                    return Err(AppError::BadRequest("Invalid phone number".to_string()));
                }
                Ok(Self::Phone(phone))
            }
            _ => Err(AppError::BadRequest(
                "Provide exactly one of email or phone".to_string(),
            )),
        }
    }

    /// Stable key for the in-memory code store.
    pub fn key(&self) -> &str {
        match self {
            Self::Email(email) => email,
            Self::Phone(phone) => phone,
        }
    }
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    otp_service: &'a OtpService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, otp_service: &'a OtpService) -> Self {
        Self { db, otp_service }
    }

    /// Issues a login code and dispatches it to the destination.
    ///
    /// A sender that reports failure rolls the pending code back so a later
    /// retry starts clean.
    pub async fn send_login_otp(
        &self,
        destination: &OtpDestination,
        email_sender: &EmailSender<'_>,
        sms_sender: &SmsSender<'_>,
    ) -> Result<(), AppError> {
        let code = self.otp_service.issue(destination.key()).await;

        let delivered = match destination {
            OtpDestination::Email(email) => email_sender.send_otp(email, &code).await?,
            OtpDestination::Phone(phone) => sms_sender.send_otp(phone, &code).await?,
        };

        if !delivered {
            self.otp_service.invalidate(destination.key()).await;
            return Err(AppError::Internal(
                "Failed to send verification code".to_string(),
            ));
        }

        Ok(())
    }

    /// Verifies a login code and resolves the account.
    ///
    /// Consumes the code on success, then finds the user by the contact
    /// point or creates a fresh customer account for a first login.
    ///
    /// # Returns
    /// - `Ok(user)`: verified account, ready to store in the session
    /// - `Err(AppError::BadRequest)`: wrong, expired, or consumed code
    pub async fn verify_otp(
        &self,
        destination: &OtpDestination,
        code: &str,
    ) -> Result<entity::user::Model, AppError> {
        if !self
            .otp_service
            .verify_and_consume(destination.key(), code)
            .await
        {
            return Err(AppError::BadRequest(
                "Invalid or expired verification code".to_string(),
            ));
        }

        let repo = UserRepository::new(self.db);

        let existing = match destination {
            OtpDestination::Email(email) => repo.find_by_email(email).await?,
            OtpDestination::Phone(phone) => repo.find_by_phone(phone).await?,
        };

        match existing {
            Some(user) => Ok(user),
            None => {
                let (email, phone) = match destination {
                    OtpDestination::Email(email) => (Some(email.clone()), None),
                    OtpDestination::Phone(phone) => (None, Some(phone.clone())),
                };
                Ok(repo.create_customer(email, phone).await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests destination parsing accepts one contact point and rejects the
    /// rest.
    #[test]
    fn parses_exactly_one_destination() {
        assert!(matches!(
            OtpDestination::parse(Some("a@b.com".to_string()), None),
            Ok(OtpDestination::Email(_))
        ));
        assert!(matches!(
            OtpDestination::parse(None, Some("+919000000001".to_string())),
            Ok(OtpDestination::Phone(_))
        ));
        assert!(OtpDestination::parse(None, None).is_err());
        assert!(OtpDestination::parse(
            Some("a@b.com".to_string()),
            Some("+919000000001".to_string())
        )
        .is_err());
    }

    #[test]
    fn rejects_malformed_contact_points() {
        assert!(OtpDestination::parse(Some("not-an-email".to_string()), None).is_err());
        assert!(OtpDestination::parse(None, Some("12ab34".to_string())).is_err());
        assert!(OtpDestination::parse(None, Some("123".to_string())).is_err());
    }

    #[test]
    fn email_is_normalized_to_lowercase() {
        let dest = OtpDestination::parse(Some("Shopper@Example.COM ".to_string()), None).unwrap();
        assert_eq!(dest.key(), "shopper@example.com");
    }
}
