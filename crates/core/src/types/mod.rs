//! Core type definitions.
//!
//! - [`space`] - Space (tenant) identifier and configuration record
//! - [`theme`] - Fixed-role theme palette and CSS variable emission
//! - [`cart_key`] - Tenant-scoped cart storage key derivation

pub mod cart_key;
pub mod space;
pub mod theme;

pub use cart_key::{CART_KEY_BASE, cart_storage_key};
pub use space::{DEFAULT_SPACE_ID, Space, SpaceId, SpaceIdError};
pub use theme::{Theme, ThemeRole};
