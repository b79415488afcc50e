//! HTTP layer for the tracking endpoints.
//!
//! Translates tracking hits into application service calls and formats
//! responses.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
pub mod dto;
pub mod handlers;
pub mod middleware;
