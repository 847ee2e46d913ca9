//! Storefront Test Utils
//!
//! Shared testing utilities for the storefront backend. This crate offers a
//! builder pattern for creating test contexts with in-memory SQLite databases
//! and customizable table schemas, plus entity factories and fixtures for
//! seeding catalog, cart, and order data.
//!
//! # Overview
//!
//! - **TestBuilder**: fluent builder for configuring test environments
//! - **TestContext**: test environment containing the database connection and
//!   an optional session
//! - **TestError**: error type for test setup failures
//! - **factory**: insert helpers that persist entities with unique defaults
//! - **fixture**: in-memory entity models with default values
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_cart_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_cart_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
