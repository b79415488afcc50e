//! # URL Tracker
//!
//! Stateless open and click tracking for emails and web pages, served with
//! Axum.
//!
//! All tracking state lives in the URL itself: a JSON payload (destination
//! URL, metadata, optional webhook URL) is encoded into a URL-safe path
//! segment, optionally sealed as a Fernet token. Decoding needs nothing but
//! the same [`domain::Configuration`].
//!
//! ## Architecture
//!
//! - **Codec** ([`codec`]) - JSON, Fernet and URL framing of tokens
//! - **Domain Layer** ([`domain`]) - Configuration, payloads, results and events
//! - **Application Layer** ([`application`]) - Public tracking API and services
//! - **Infrastructure Layer** ([`infrastructure`]) - Webhook delivery
//! - **API Layer** ([`api`]) - Pixel, redirect and health handlers
//!
//! ## Features
//!
//! - Open tracking pixel and click tracking redirects
//! - Optional authenticated encryption with token expiry
//! - Unencrypted and encrypted tokens in the widely used Fernet/JSON layout
//! - Asynchronous webhook notifications with retry logic
//!
//! ## Library Usage
//!
//! ```
//! use url_tracker::application::tracking;
//! use url_tracker::domain::{Configuration, Metadata};
//!
//! let config = Configuration::new()
//!     .with_base_open_tracking_url("https://t.example.com/open/");
//!
//! let mut metadata = Metadata::new();
//! metadata.insert("customer_id".to_string(), 1.into());
//!
//! let url = tracking::open_tracking_url(&metadata, &config).unwrap();
//! let path = tracking::open_tracking_url_path(&url, &config).unwrap();
//! let result = tracking::open_tracking_result(&path, None, &config).unwrap();
//!
//! assert!(result.is_open_tracking());
//! assert_eq!(result.metadata["customer_id"], 1);
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_OPEN_TRACKING_URL="https://t.example.com/open/"
//! export BASE_CLICK_TRACKING_URL="https://t.example.com/click/"
//! export WEBHOOK_URL="https://hooks.example.com/tracking"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod codec;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::TrackingService;
    pub use crate::application::tracking::{
        click_tracking_result, click_tracking_url, click_tracking_url_path, open_tracking_pixel,
        open_tracking_result, open_tracking_url, open_tracking_url_path,
    };
    pub use crate::codec::fernet::EncryptionKey;
    pub use crate::domain::{
        Configuration, Metadata, RequestData, TrackingError, TrackingKind, TrackingResult,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
