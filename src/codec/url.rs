//! Joining tokens to base tracking URLs and recovering them again.
//!
//! Base URLs are plain prefixes: they must already be well-formed absolute
//! URLs ending in a deliberate separator (usually `/`). No normalization is
//! applied in either direction.

use crate::domain::error::TrackingError;

/// Builds a full tracking URL from a base URL and an encoded token.
pub fn join_tracking_url(base_url: &str, token: &str, append_slash: bool) -> String {
    let mut url = String::with_capacity(base_url.len() + token.len() + 1);
    url.push_str(base_url);
    url.push_str(token);
    if append_slash {
        url.push('/');
    }
    url
}

/// Recovers the encoded token from a full tracking URL.
///
/// When `append_slash` is set, a single trailing `/` is removed before the
/// prefix is stripped.
///
/// # Errors
///
/// Returns [`TrackingError::InvalidUrl`] if `full_url` does not start with
/// `base_url`.
///
/// # Examples
///
/// ```
/// use url_tracker::codec::url::extract_tracking_path;
///
/// let path = extract_tracking_path(
///     "https://a.b.com/tracking/open/e30=",
///     "https://a.b.com/tracking/open/",
///     false,
/// )
/// .unwrap();
/// assert_eq!(path, "e30=");
/// ```
pub fn extract_tracking_path(
    full_url: &str,
    base_url: &str,
    append_slash: bool,
) -> Result<String, TrackingError> {
    let url = if append_slash {
        full_url.strip_suffix('/').unwrap_or(full_url)
    } else {
        full_url
    };

    url.strip_prefix(base_url)
        .map(str::to_string)
        .ok_or_else(|| TrackingError::InvalidUrl {
            url: full_url.to_string(),
            base: base_url.to_string(),
        })
}

/// Normalizes a bare path handed over by a web framework.
///
/// Frameworks that already isolated the token from the origin may still leave
/// a leading `/` or, with `append_slash`, a trailing one.
pub fn bare_tracking_path(path: &str, append_slash: bool) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);
    if append_slash {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://a.b.com/tracking/open/";

    #[test]
    fn test_join_plain() {
        assert_eq!(
            join_tracking_url(BASE, "e30=", false),
            "https://a.b.com/tracking/open/e30="
        );
    }

    #[test]
    fn test_join_with_slash() {
        assert_eq!(
            join_tracking_url(BASE, "e30=", true),
            "https://a.b.com/tracking/open/e30=/"
        );
    }

    #[test]
    fn test_extract_strips_base() {
        let url = join_tracking_url(BASE, "abc_-=", false);
        assert_eq!(extract_tracking_path(&url, BASE, false).unwrap(), "abc_-=");
    }

    #[test]
    fn test_extract_with_slash() {
        let url = join_tracking_url(BASE, "e30=", true);
        assert_eq!(extract_tracking_path(&url, BASE, true).unwrap(), "e30=");
    }

    #[test]
    fn test_extract_without_slash_keeps_trailing_slash() {
        let url = join_tracking_url(BASE, "e30=", true);
        assert_eq!(extract_tracking_path(&url, BASE, false).unwrap(), "e30=/");
    }

    #[test]
    fn test_extract_mismatched_base() {
        let result = extract_tracking_path("https://evil.com/tracking/open/e30=", BASE, false);

        assert!(matches!(result, Err(TrackingError::InvalidUrl { .. })));
    }

    #[test]
    fn test_extract_is_case_sensitive() {
        let result = extract_tracking_path("HTTPS://A.B.COM/tracking/open/e30=", BASE, false);

        assert!(result.is_err());
    }

    #[test]
    fn test_bare_path() {
        assert_eq!(bare_tracking_path("e30=", false), "e30=");
        assert_eq!(bare_tracking_path("/e30=", false), "e30=");
        assert_eq!(bare_tracking_path("/e30=/", true), "e30=");
        assert_eq!(bare_tracking_path("e30=/", false), "e30=/");
    }
}
