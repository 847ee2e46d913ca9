//! Courier serviceability quotes.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::model::shipping::CourierQuoteDto;
use crate::server::{config::Config, error::AppError, service::shipping::token::TokenCache};

/// One serviceability request: pincode pair plus shipment weight.
#[derive(Debug, Clone)]
pub struct RateQuery {
    pub pickup_pincode: String,
    pub delivery_pincode: String,
    pub weight: f64,
    pub cod: bool,
}

impl RateQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        for pincode in [&self.pickup_pincode, &self.delivery_pincode] {
            if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
                return Err(AppError::BadRequest(
                    "pickup_pincode and delivery_pincode must be 6-digit pincodes".to_string(),
                ));
            }
        }
        if !(self.weight > 0.0) {
            return Err(AppError::BadRequest(
                "weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ServiceabilityResponse {
    #[serde(default)]
    data: ServiceabilityData,
}

#[derive(Deserialize, Default)]
struct ServiceabilityData {
    #[serde(default)]
    available_courier_companies: Vec<CourierCompany>,
}

#[derive(Deserialize)]
struct CourierCompany {
    courier_name: String,
    #[serde(default)]
    rate: f64,
    #[serde(default)]
    etd: Option<String>,
    #[serde(default)]
    cod: i32,
}

pub struct RateService<'a> {
    http: &'a reqwest::Client,
    config: &'a Config,
    tokens: &'a TokenCache,
}

impl<'a> RateService<'a> {
    pub fn new(http: &'a reqwest::Client, config: &'a Config, tokens: &'a TokenCache) -> Self {
        Self {
            http,
            config,
            tokens,
        }
    }

    /// Queries courier quotes for a pincode pair and weight.
    ///
    /// Uses the cached credential; a 401 from the provider forces one
    /// refresh and a single retry before giving up.
    ///
    /// # Returns
    /// - `Ok(quotes)`: available couriers, possibly empty
    /// - `Err(AppError::BadRequest)`: malformed pincodes or weight
    /// - `Err(AppError::Internal)`: provider failure
    pub async fn check_serviceability(
        &self,
        query: &RateQuery,
    ) -> Result<Vec<CourierQuoteDto>, AppError> {
        query.validate()?;

        let token = self.tokens.get_valid().await?;
        let mut response = self.request(&token, query).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let token = self.tokens.force_refresh().await?;
            response = self.request(&token, query).await?;
        }

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Shipping provider error: {}",
                response.status()
            )));
        }

        let body: ServiceabilityResponse = response.json().await?;

        Ok(body
            .data
            .available_courier_companies
            .into_iter()
            .map(|courier| CourierQuoteDto {
                courier_name: courier.courier_name,
                rate: courier.rate,
                estimated_days: courier.etd,
                cod_available: courier.cod == 1,
            })
            .collect())
    }

    async fn request(
        &self,
        token: &str,
        query: &RateQuery,
    ) -> Result<reqwest::Response, AppError> {
        let response = self
            .http
            .get(format!(
                "{}/courier/serviceability/",
                self.config.shipping_api_base
            ))
            .bearer_auth(token)
            .query(&[
                ("pickup_postcode", query.pickup_pincode.as_str()),
                ("delivery_postcode", query.delivery_pincode.as_str()),
                ("weight", &query.weight.to_string()),
                ("cod", if query.cod { "1" } else { "0" }),
            ])
            .send()
            .await?;

        Ok(response)
    }
}
