//! Gatehouse library surface.
//!
//! The binary in `main.rs` is a thin wrapper around these modules; they
//! are exposed as a library so integration tests can drive the router
//! in-process.

pub mod config;
pub mod routes;
pub mod state;
