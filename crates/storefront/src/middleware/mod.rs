//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Space resolver (derive the active space from the request host)

pub mod cookies;
pub mod request_id;
pub mod space;

pub use cookies::{read_cookie, set_cookie_value};
pub use request_id::request_id_middleware;
pub use space::{ResolvedSpace, SPACE_COOKIE, SPACE_QUERY_PARAM, space_resolver_middleware};
