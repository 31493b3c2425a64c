//! Approov token gate for axum services.
//!
//! Inbound requests carry a short-lived HS256 attestation token in a header.
//! The gate verifies it (signature, expiry, optional payload binding to another
//! request header) and either lets the request through or rejects it with 401.
//!
//! The verification core lives in [`services::approov`] and has no HTTP
//! dependency; [`middleware::approov`] is the axum seam.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
