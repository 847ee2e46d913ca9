//! Shipping-provider integration.
//!
//! Two concerns: keeping the single shared provider credential fresh across
//! many workers (`token`), and querying courier serviceability with it
//! (`rates`).

pub mod rates;
pub mod token;
