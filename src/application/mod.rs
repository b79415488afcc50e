//! Application layer: the public tracking API and the service used by the
//! HTTP handlers.
//!
//! # Modules
//!
//! - [`tracking`] - Encode/decode contracts for open and click tracking URLs
//! - [`services::tracking_service::TrackingService`] - Token decoding with
//!   webhook event dispatch for the HTTP service

pub mod services;
pub mod tracking;
