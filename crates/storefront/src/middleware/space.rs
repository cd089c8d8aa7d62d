//! Space resolution middleware.
//!
//! Derives the active space from the request host: `acme.{root_domain}`
//! resolves to space `acme`. On recognized local-development hosts the
//! `_space` query parameter may override the resolution; production host
//! names never honor it, so a space cannot be spoofed via query string.
//!
//! The outcome is stored in request extensions (read via the
//! [`ResolvedSpace`] extractor) and persisted as a client-readable `space_id`
//! cookie so client-side code observes the same space without re-deriving it.
//!
//! Resolution never fails: malformed hosts, invalid labels, and missing
//! signals all degrade to the default space, which the registry can always
//! serve.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use merchspace_core::SpaceId;

use crate::middleware::cookies::set_cookie_value;
use crate::state::AppState;

/// Cookie carrying the resolved space id. Client-readable by design.
pub const SPACE_COOKIE: &str = "space_id";

/// Query parameter for the local-development space override.
pub const SPACE_QUERY_PARAM: &str = "_space";

/// Space cookie lifetime (24 hours).
const SPACE_COOKIE_MAX_AGE_SECS: u64 = 24 * 60 * 60;

/// The space resolved for the current request.
#[derive(Clone, Debug)]
pub struct ResolvedSpace(pub SpaceId);

/// Resolve a space id from a request's host and query string.
///
/// Rules, in order:
/// 1. `{label}.{root_domain}` resolves to `label` (case-insensitive, port
///    stripped), provided the label is a valid space id.
/// 2. On a host listed in `dev_hosts`, a `_space` query parameter supplies
///    the id.
/// 3. Anything else - including a missing or malformed host - is the default
///    space.
#[must_use]
pub fn resolve_space_id(
    host: Option<&str>,
    query: Option<&str>,
    root_domain: &str,
    dev_hosts: &[String],
) -> SpaceId {
    let Some(host) = host else {
        return SpaceId::default();
    };

    let host = host.trim().to_lowercase();
    let host = strip_port(&host);

    let suffix = format!(".{}", root_domain.to_lowercase());
    if let Some(label) = host.strip_suffix(suffix.as_str()) {
        return SpaceId::parse(label).unwrap_or_default();
    }

    if dev_hosts.iter().any(|dev| dev == host) {
        if let Some(value) = query_param(query, SPACE_QUERY_PARAM) {
            return SpaceId::parse(&value).unwrap_or_default();
        }
    }

    SpaceId::default()
}

/// Strip a trailing `:port` from a host, leaving IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 literal: [::1] or [::1]:3000
        return host
            .find(']')
            .map_or(host, |end| host.get(..=end).unwrap_or(host));
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Extract a query parameter value from a raw query string.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Middleware that resolves the active space and persists the marker cookie.
///
/// Must run before any handler that reads [`ResolvedSpace`].
pub async fn space_resolver_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let config = state.config();

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok());
    let space_id = resolve_space_id(
        host,
        request.uri().query(),
        &config.root_domain,
        &config.dev_hosts,
    );

    let secure = config.base_url.starts_with("https://");
    let cookie = set_cookie_value(
        SPACE_COOKIE,
        space_id.as_str(),
        SPACE_COOKIE_MAX_AGE_SECS,
        secure,
    );

    request.extensions_mut().insert(ResolvedSpace(space_id));

    let mut response = next.run(request).await;

    if let Some(cookie) = cookie {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    response
}

/// Extractor to get the resolved space from request extensions.
///
/// # Example
///
/// ```ignore
/// async fn handler(ResolvedSpace(space_id): ResolvedSpace) -> impl IntoResponse {
///     // ...
/// }
/// ```
impl<S> FromRequestParts<S> for ResolvedSpace
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_else(|| {
            tracing::warn!(
                "Resolved space not found in request extensions - middleware may be misconfigured"
            );
            Self(SpaceId::default())
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ROOT: &str = "merchspace.shop";

    fn dev_hosts() -> Vec<String> {
        vec!["localhost".to_string(), "127.0.0.1".to_string()]
    }

    fn resolve(host: Option<&str>, query: Option<&str>) -> SpaceId {
        resolve_space_id(host, query, ROOT, &dev_hosts())
    }

    #[test]
    fn test_subdomain_resolves_to_label() {
        assert_eq!(resolve(Some("acme.merchspace.shop"), None).as_str(), "acme");
    }

    #[test]
    fn test_subdomain_is_case_insensitive_and_port_stripped() {
        assert_eq!(
            resolve(Some("Acme.Merchspace.Shop:3000"), None).as_str(),
            "acme"
        );
    }

    #[test]
    fn test_root_domain_itself_is_default() {
        assert!(resolve(Some("merchspace.shop"), None).is_default());
    }

    #[test]
    fn test_unrelated_host_is_default() {
        assert!(resolve(Some("example.com"), None).is_default());
        assert!(resolve(Some("shop.example.com"), None).is_default());
    }

    #[test]
    fn test_missing_or_malformed_host_is_default() {
        assert!(resolve(None, None).is_default());
        assert!(resolve(Some(""), None).is_default());
        assert!(resolve(Some("no-dot-host"), None).is_default());
        assert!(resolve(Some("[::1]:3000"), None).is_default());
    }

    #[test]
    fn test_nested_subdomain_is_default() {
        // "a.b" is not a valid space label
        assert!(resolve(Some("a.b.merchspace.shop"), None).is_default());
    }

    #[test]
    fn test_dev_host_honors_override() {
        assert_eq!(
            resolve(Some("localhost:3000"), Some("_space=acme")).as_str(),
            "acme"
        );
        assert_eq!(
            resolve(Some("127.0.0.1"), Some("foo=1&_space=acme")).as_str(),
            "acme"
        );
    }

    #[test]
    fn test_dev_host_without_override_is_default() {
        assert!(resolve(Some("localhost:3000"), None).is_default());
        assert!(resolve(Some("localhost"), Some("foo=1")).is_default());
    }

    #[test]
    fn test_production_host_ignores_override() {
        // Prevents tenant spoofing via query string in production
        assert!(resolve(Some("merchspace.shop"), Some("_space=acme")).is_default());
        assert!(resolve(Some("example.com"), Some("_space=acme")).is_default());
        // A subdomain keeps its own label even if an override is smuggled in
        assert_eq!(
            resolve(Some("acme.merchspace.shop"), Some("_space=other")).as_str(),
            "acme"
        );
    }

    #[test]
    fn test_invalid_override_value_is_default() {
        assert!(resolve(Some("localhost"), Some("_space=Not%20Valid")).is_default());
        assert!(resolve(Some("localhost"), Some("_space=")).is_default());
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.com:8080"), "example.com");
        assert_eq!(strip_port("example.com"), "example.com");
        assert_eq!(strip_port("[::1]:3000"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
        // Not a port, leave untouched
        assert_eq!(strip_port("example.com:abc"), "example.com:abc");
    }
}
