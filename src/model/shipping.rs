use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for a courier serviceability check.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShippingQuoteRequestDto {
    /// Origin pincode; falls back to the store's configured pickup pincode.
    pub pickup_pincode: Option<String>,
    pub delivery_pincode: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub cod: bool,
}

fn default_weight() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourierQuoteDto {
    pub courier_name: String,
    /// Quoted rate as reported by the provider, in major units.
    pub rate: f64,
    pub estimated_days: Option<String>,
    pub cod_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShippingQuotesDto {
    pub quotes: Vec<CourierQuoteDto>,
}
