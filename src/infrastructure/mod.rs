//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces consumed by the domain layer.
//!
//! # Modules
//!
//! - [`webhook`] - Webhook delivery (HTTP and no-op implementations)

pub mod webhook;
