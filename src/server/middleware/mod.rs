//! Request middleware: session resolution and permission guards.

pub mod auth;
