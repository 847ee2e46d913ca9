//! Checkout parameter models.

use crate::model::order::{CheckoutDto, OrderDto, OrderItemDto};
use crate::server::error::AppError;

const PAYMENT_METHODS: &[&str] = &[
    "card",
    "upi",
    "netbanking",
    "wallet",
    "cod",
    "bank_transfer",
    "other",
];

#[derive(Debug, Clone)]
pub struct CheckoutParams {
    pub user_id: i32,
    pub payment_method: String,
    pub ship_name: String,
    pub ship_phone: String,
    pub ship_street: String,
    pub ship_city: String,
    pub ship_state: String,
    pub ship_postal_code: String,
    pub ship_country: String,
    pub idempotency_key: Option<String>,
}

impl CheckoutParams {
    pub fn from_dto(user_id: i32, dto: CheckoutDto) -> Self {
        Self {
            user_id,
            payment_method: dto.payment_method.trim().to_lowercase(),
            ship_name: dto.ship_name.trim().to_string(),
            ship_phone: dto.ship_phone.trim().to_string(),
            ship_street: dto.ship_street.trim().to_string(),
            ship_city: dto.ship_city.trim().to_string(),
            ship_state: dto.ship_state.trim().to_string(),
            ship_postal_code: dto.ship_postal_code.trim().to_string(),
            ship_country: dto.ship_country.trim().to_string(),
            idempotency_key: dto.idempotency_key,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !PAYMENT_METHODS.contains(&self.payment_method.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Unsupported payment method: {}",
                self.payment_method
            )));
        }
        if self.ship_name.is_empty()
            || self.ship_phone.is_empty()
            || self.ship_street.is_empty()
            || self.ship_city.is_empty()
            || self.ship_state.is_empty()
        {
            return Err(AppError::BadRequest(
                "Shipping address is incomplete".to_string(),
            ));
        }
        if self.ship_postal_code.len() != 6
            || !self.ship_postal_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AppError::BadRequest(
                "Postal code must be a 6-digit pincode".to_string(),
            ));
        }
        Ok(())
    }
}

/// Converts an order row and its item rows into the API shape.
pub fn order_to_dto(order: entity::order::Model, items: Vec<entity::order_item::Model>) -> OrderDto {
    OrderDto {
        id: order.id,
        status: order.status,
        items: items
            .into_iter()
            .map(|item| OrderItemDto {
                product_id: item.product_id,
                variant_id: item.variant_id,
                title: item.title,
                sku: item.sku,
                price: item.price,
                quantity: item.quantity,
            })
            .collect(),
        subtotal: order.subtotal,
        discount: order.discount,
        shipping: order.shipping,
        tax: order.tax,
        total: order.total,
        currency: order.currency,
        placed_at: order.placed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CheckoutDto {
        CheckoutDto {
            payment_method: "UPI".to_string(),
            ship_name: "A Customer".to_string(),
            ship_phone: "+919000000001".to_string(),
            ship_street: "1 MG Road".to_string(),
            ship_city: "Bengaluru".to_string(),
            ship_state: "Karnataka".to_string(),
            ship_postal_code: "560001".to_string(),
            ship_country: "India".to_string(),
            idempotency_key: None,
        }
    }

    #[test]
    fn method_is_case_insensitive() {
        let params = CheckoutParams::from_dto(1, dto());
        assert!(params.validate().is_ok());
        assert_eq!(params.payment_method, "upi");
    }

    #[test]
    fn bad_pincode_fails_validation() {
        let mut raw = dto();
        raw.ship_postal_code = "5600".to_string();

        let params = CheckoutParams::from_dto(1, raw);
        assert!(matches!(params.validate(), Err(AppError::BadRequest(_))));
    }
}
