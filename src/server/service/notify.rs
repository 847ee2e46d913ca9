//! Email and SMS senders.
//!
//! Thin HTTP clients over the configured providers. Callers get a boolean:
//! `Ok(true)` means the provider accepted the message, `Ok(false)` means it
//! rejected it (logged server-side), and `Err` means the request itself
//! failed. That is all the login flow needs to decide whether to roll back
//! a pending code.

use crate::server::{config::Config, error::AppError};

pub struct EmailSender<'a> {
    http: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> EmailSender<'a> {
    pub fn new(http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self { http, config }
    }

    /// Sends one email.
    ///
    /// # Returns
    /// - `Ok(true)`: accepted by the provider
    /// - `Ok(false)`: rejected; details logged
    /// - `Err(AppError::ReqwestErr)`: transport failure
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<bool, AppError> {
        let response = self
            .http
            .post(format!("{}/emails", self.config.email_api_base))
            .bearer_auth(&self.config.email_api_key)
            .json(&serde_json::json!({
                "from": self.config.email_from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::error!("Email send to {} failed: {}", to, response.status());
            return Ok(false);
        }

        Ok(true)
    }

    /// Sends the login-code email.
    pub async fn send_otp(&self, to: &str, code: &str) -> Result<bool, AppError> {
        let html = format!(
            "<p>Your verification code is <strong>{}</strong>. It expires in 5 minutes.</p>",
            code
        );
        self.send(to, "Verification Code", &html).await
    }
}

pub struct SmsSender<'a> {
    http: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> SmsSender<'a> {
    pub fn new(http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self { http, config }
    }

    /// Sends one SMS.
    ///
    /// # Returns
    /// - `Ok(true)`: accepted by the provider
    /// - `Ok(false)`: rejected; details logged
    /// - `Err(AppError::ReqwestErr)`: transport failure
    pub async fn send(&self, to: &str, body: &str) -> Result<bool, AppError> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.config.sms_api_base, self.config.sms_account_sid
        );

        let response = self
            .http
            .post(url)
            .basic_auth(
                &self.config.sms_account_sid,
                Some(&self.config.sms_auth_token),
            )
            .form(&[
                ("To", to),
                ("From", self.config.sms_from.as_str()),
                ("Body", body),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::error!("SMS send to {} failed: {}", to, response.status());
            return Ok(false);
        }

        Ok(true)
    }

    /// Sends the login-code SMS.
    pub async fn send_otp(&self, to: &str, code: &str) -> Result<bool, AppError> {
        let body = format!("Your storefront verification code is {}", code);
        self.send(to, &body).await
    }
}
