//! Background jobs.

pub mod cart_expiry;
