//! Spendly API service library
//!
//! The binary in `main.rs` wires these modules together; they are
//! exposed as a library so integration tests can drive the
//! repositories and router directly.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod state;
pub mod validation;
