//! HTTP request handlers.
//!
//! Each handler module corresponds to one public endpoint.

pub mod click;
pub mod health;
pub mod open;

pub use click::click_handler;
pub use health::health_handler;
pub use open::open_handler;
