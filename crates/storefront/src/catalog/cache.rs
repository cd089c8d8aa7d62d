//! Cache types for catalog API responses.

use crate::catalog::types::Product;

/// Cached value types. Only product reads are cached; carts are mutable
/// state and always fetched fresh.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
}
