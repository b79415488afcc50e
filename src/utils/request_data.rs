//! Request data extraction from HTTP request headers.

use std::net::SocketAddr;

use axum::http::{HeaderMap, header};

use crate::domain::result::RequestData;

const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Collects the user agent and client IP of a tracking hit.
///
/// When `behind_proxy` is set the client IP comes from `X-Real-IP`, then the
/// first hop of `X-Forwarded-For`, then the socket peer. Otherwise proxy
/// headers are ignored since any client can forge them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-real-ip", "203.0.113.7".parse().unwrap());
///
/// let data = extract_request_data(&headers, "10.0.0.1:443".parse().unwrap(), true);
/// assert_eq!(data.user_ip.as_deref(), Some("203.0.113.7"));
/// ```
pub fn extract_request_data(
    headers: &HeaderMap,
    peer: SocketAddr,
    behind_proxy: bool,
) -> RequestData {
    let user_agent = header_str(headers, header::USER_AGENT.as_str()).map(str::to_string);

    let forwarded_ip = if behind_proxy {
        header_str(headers, X_REAL_IP).or_else(|| {
            header_str(headers, X_FORWARDED_FOR)
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
    } else {
        None
    };

    let user_ip = forwarded_ip
        .map(str::to_string)
        .unwrap_or_else(|| peer.ip().to_string());

    RequestData::new(user_agent, Some(user_ip))
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
