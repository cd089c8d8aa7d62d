//! Merchspace Core - Shared types library.
//!
//! This crate provides the tenant ("space") types used across all Merchspace
//! components:
//! - `storefront` - Public-facing multi-space storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no filesystem access. Space configs are loaded by the storefront's
//! registry; this crate defines what a space *is*.
//!
//! # Modules
//!
//! - [`types`] - `SpaceId`, `Space`, `Theme`/`ThemeRole`, and cart key scoping

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
