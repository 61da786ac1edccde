//! Common library for the Spendly backend
//!
//! This crate provides shared infrastructure used by the Spendly
//! services: PostgreSQL connection pooling, database configuration,
//! and typed database errors.

pub mod database;
pub mod error;
