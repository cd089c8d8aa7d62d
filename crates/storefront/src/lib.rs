//! Multi-tenant merch storefront server.
//!
//! Serves several branded storefront variants ("spaces") from one codebase:
//! the active space is resolved per-request from the subdomain, its config
//! drives branding and theming, and catalog queries and cart cookies are
//! scoped to it. Product and cart data comes from the commerce API upstream.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod spaces;
pub mod state;
