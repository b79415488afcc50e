//! Helpers for request handling.
//!
//! - [`request_data`] - User agent and client IP extraction from HTTP headers

pub mod request_data;
