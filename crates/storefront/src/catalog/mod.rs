//! Client for the upstream commerce API.
//!
//! The storefront renders pages; the commerce API owns products, carts,
//! checkout, and fulfillment. This client covers the read side (products,
//! cached via `moka` with a 5-minute TTL) and the cart mutations the cart
//! pages need. Requests carry a bounded timeout so a slow upstream degrades
//! the page instead of hanging it.
//!
//! Space filtering is a pass-through: a non-default space id becomes a
//! `?space=<id>` query parameter on listing calls; the default space omits
//! the parameter and receives the full catalog.

mod cache;
pub mod types;

pub use types::{Cart, CartItem, CartItemCreate, CartItemUpdate, Product, ProductVariant};

use std::sync::Arc;
use std::time::Duration;

use merchspace_core::SpaceId;
use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::CatalogConfig;

use cache::CacheValue;

/// Errors that can occur when talking to the commerce API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connect, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream returned a non-success status.
    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client for the upstream commerce API.
///
/// Cheaply cloneable; product reads share one TTL cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new commerce API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// Execute a request and decode the JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CatalogError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %url,
                body = %response_text.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %url,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse commerce API response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// List products, optionally filtered by space, category, and type.
    ///
    /// The default space is treated as "no filter": the `space` parameter is
    /// only sent for non-default spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        space: Option<&SpaceId>,
        category: Option<&str>,
        product_type: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let space = space.filter(|s| !s.is_default());

        let cache_key = format!(
            "products:{}:{}:{}",
            space.map_or("", SpaceId::as_str),
            category.unwrap_or(""),
            product_type.unwrap_or("")
        );

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let query = listing_query(space, category, product_type);

        let request = self
            .inner
            .client
            .get(self.url("/api/products"))
            .query(&query);

        let products: Vec<Product> = self.execute(request).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product(&self, slug: &str) -> Result<Product, CatalogError> {
        let cache_key = format!("product:{slug}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let request = self.inner.client.get(self.url(&format!("/api/products/{slug}")));
        let product: Product = self.execute(request).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Create a new empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<Cart, CatalogError> {
        let request = self.inner.client.post(self.url("/api/cart"));
        self.execute(request).await
    }

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found or the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: Uuid) -> Result<Cart, CatalogError> {
        let request = self.inner.client.get(self.url(&format!("/api/cart/{cart_id}")));
        self.execute(request).await
    }

    /// Add an item to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found or the API request fails.
    #[instrument(skip(self, item), fields(cart_id = %cart_id))]
    pub async fn add_item(&self, cart_id: Uuid, item: &CartItemCreate) -> Result<Cart, CatalogError> {
        self.post_json(&format!("/api/cart/{cart_id}/items"), item).await
    }

    /// Update a cart item's quantity. A quantity of zero removes the item.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart or item is not found or the request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id, item_id = %item_id))]
    pub async fn update_item(
        &self,
        cart_id: Uuid,
        item_id: Uuid,
        quantity: u32,
    ) -> Result<Cart, CatalogError> {
        let request = self
            .inner
            .client
            .put(self.url(&format!("/api/cart/{cart_id}/items/{item_id}")))
            .json(&CartItemUpdate { quantity });
        self.execute(request).await
    }

    /// Remove an item from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart or item is not found or the request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id, item_id = %item_id))]
    pub async fn remove_item(&self, cart_id: Uuid, item_id: Uuid) -> Result<Cart, CatalogError> {
        let request = self
            .inner
            .client
            .delete(self.url(&format!("/api/cart/{cart_id}/items/{item_id}")));
        self.execute(request).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, CatalogError> {
        let request = self.inner.client.post(self.url(path)).json(body);
        self.execute(request).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached product data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Build the query pairs for a product listing request.
///
/// The `space` parameter is only included for non-default spaces; the
/// default space receives the full, unfiltered catalog.
fn listing_query(
    space: Option<&SpaceId>,
    category: Option<&str>,
    product_type: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(space) = space.filter(|s| !s.is_default()) {
        query.push(("space", space.to_string()));
    }
    if let Some(category) = category {
        query.push(("category", category.to_string()));
    }
    if let Some(product_type) = product_type {
        query.push(("product_type", product_type.to_string()));
    }
    query
}
