//! Tenant-scoped cart storage key derivation.
//!
//! The browser-held cart identifier is keyed per space so carts do not
//! collide across spaces sharing a browser. The key must be derived fresh
//! from the currently resolved space on every cart read/write path; a
//! mismatch between write-time and read-time resolution would orphan carts.

use crate::types::space::SpaceId;

/// Base storage key for the default space's cart.
///
/// Kept unsuffixed for backward compatibility with single-tenant carts.
pub const CART_KEY_BASE: &str = "cart_id";

/// Derive the cart storage key for a space.
///
/// Pure function: the default space maps to [`CART_KEY_BASE`]; any other
/// space maps to `cart_id_<id>`. Distinct space ids always produce distinct
/// keys because the id itself is embedded in the suffix.
#[must_use]
pub fn cart_storage_key(space: &SpaceId) -> String {
    if space.is_default() {
        CART_KEY_BASE.to_string()
    } else {
        format!("{CART_KEY_BASE}_{space}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_space_uses_base_key() {
        assert_eq!(cart_storage_key(&SpaceId::default()), "cart_id");
    }

    #[test]
    fn test_non_default_space_is_suffixed() {
        let acme = SpaceId::parse("acme").unwrap();
        assert_eq!(cart_storage_key(&acme), "cart_id_acme");
    }

    #[test]
    fn test_distinct_spaces_get_distinct_keys() {
        let acme = SpaceId::parse("acme").unwrap();
        let other = SpaceId::parse("other").unwrap();
        assert_ne!(cart_storage_key(&acme), cart_storage_key(&other));
    }

    #[test]
    fn test_deterministic() {
        let acme = SpaceId::parse("acme").unwrap();
        assert_eq!(cart_storage_key(&acme), cart_storage_key(&acme));
    }
}
