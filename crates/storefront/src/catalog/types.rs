//! Wire types for the upstream commerce API.
//!
//! These mirror the JSON shapes served by the catalog/cart endpoints. The
//! storefront treats them as read-only views; all business rules (pricing,
//! fulfillment, payment) live upstream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable product variant (size, placement, provider SKU).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub name: String,
    pub sku: String,
    pub provider: String,
    pub price: f64,
}

/// A product listed in the storefront (a design flattened with its variants).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub product_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: String,
    pub base_price: f64,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

/// A line in an upstream cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub product_slug: String,
    pub product_name: String,
    pub variant: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// An upstream cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub subtotal: f64,
}

/// Input for adding an item to a cart.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemCreate {
    pub product_slug: String,
    pub product_name: String,
    pub variant: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Input for updating a cart item's quantity.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemUpdate {
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_with_defaults() {
        let product: Product = serde_json::from_str(
            r#"{
                "slug": "wave-sticker",
                "name": "Wave Sticker",
                "description": "A wave.",
                "category": "art",
                "product_type": "sticker",
                "image_url": "https://cdn.example.com/wave.png",
                "base_price": 3.5
            }"#,
        )
        .unwrap();

        assert_eq!(product.slug, "wave-sticker");
        assert!(product.tags.is_empty());
        assert!(product.variants.is_empty());
        assert!(product.is_active);
    }

    #[test]
    fn test_cart_deserializes() {
        let cart: Cart = serde_json::from_str(
            r#"{
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "items": [{
                    "id": "3fa85f64-5717-4562-b3fc-2c963f66afa7",
                    "product_slug": "wave-sticker",
                    "product_name": "Wave Sticker",
                    "variant": "3x3in",
                    "quantity": 2,
                    "unit_price": 3.5,
                    "subtotal": 7.0
                }],
                "item_count": 2,
                "subtotal": 7.0
            }"#,
        )
        .unwrap();

        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.items.len(), 1);
    }
}
