//! Minimal cookie helpers.
//!
//! The storefront only sets two client-visible cookies (the space marker and
//! the scoped cart id), neither of which carries a session or a secret, so a
//! full session layer is not warranted.

use axum::http::{HeaderMap, HeaderValue, header};

/// Read a cookie value from the request headers.
///
/// Handles multiple `Cookie` headers and the usual `name=value; other=...`
/// packing. Returns the first match.
#[must_use]
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
        .next()
}

/// Build a `Set-Cookie` header value for a site-wide, `SameSite=Lax` cookie.
///
/// Not `HttpOnly`: both cookies set by the storefront are meant to be read by
/// client-side code. Returns `None` if the name or value cannot form a valid
/// header value.
#[must_use]
pub fn set_cookie_value(
    name: &str,
    value: &str,
    max_age_secs: u64,
    secure: bool,
) -> Option<HeaderValue> {
    let mut cookie = format!("{name}={value}; Path=/; Max-Age={max_age_secs}; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_from_packed_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("space_id=acme; cart_id_acme=abc123"),
        );

        assert_eq!(read_cookie(&headers, "space_id").unwrap(), "acme");
        assert_eq!(read_cookie(&headers, "cart_id_acme").unwrap(), "abc123");
        assert!(read_cookie(&headers, "cart_id").is_none());
    }

    #[test]
    fn test_read_cookie_across_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));

        assert_eq!(read_cookie(&headers, "b").unwrap(), "2");
    }

    #[test]
    fn test_set_cookie_value_format() {
        let value = set_cookie_value("space_id", "acme", 86400, false).unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "space_id=acme; Path=/; Max-Age=86400; SameSite=Lax"
        );

        let secure = set_cookie_value("space_id", "acme", 86400, true).unwrap();
        assert!(secure.to_str().unwrap().ends_with("; Secure"));
    }
}
