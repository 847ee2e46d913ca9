//! In-memory entity fixtures with default values.
//!
//! Fixtures build entity models without touching the database. Factories use
//! them as the source of defaults; unit tests use them directly for mocking.

pub mod product;
pub mod variant;
