//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::types::{Product, ProductVariant};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::ResolvedSpace;
use crate::routes::SpaceView;
use crate::state::AppState;

/// Product card display data for listing grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_url: Option<String>,
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub product_type: String,
    pub tags: Vec<String>,
    pub price: String,
    /// Bare decimal amount, used as the add-to-cart form value.
    pub price_amount: String,
    pub image_url: Option<String>,
    pub variants: Vec<VariantView>,
}

/// Variant display data for templates.
#[derive(Clone)]
pub struct VariantView {
    pub name: String,
    pub sku: String,
    pub price: String,
}

/// Format a price amount as a display string.
fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

/// An empty image URL from upstream means "no image".
fn image_url(product: &Product) -> Option<String> {
    (!product.image_url.is_empty()).then(|| product.image_url.clone())
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: format_price(product.base_price),
            image_url: image_url(product),
        }
    }
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            product_type: product.product_type.clone(),
            tags: product.tags.clone(),
            price: format_price(product.base_price),
            price_amount: format!("{:.2}", product.base_price),
            image_url: image_url(product),
            variants: product.variants.iter().map(VariantView::from).collect(),
        }
    }
}

impl From<&ProductVariant> for VariantView {
    fn from(variant: &ProductVariant) -> Self {
        Self {
            name: variant.name.clone(),
            sku: variant.sku.clone(),
            price: format_price(variant.price),
        }
    }
}

/// Product listing filter parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub product_type: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub space: SpaceView,
    pub products: Vec<ProductCardView>,
    pub category: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub space: SpaceView,
    pub product: ProductView,
}

/// Display the product listing page, filtered by the resolved space.
///
/// A catalog outage degrades to an empty grid rather than an error page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    ResolvedSpace(space_id): ResolvedSpace,
    Query(query): Query<ProductsQuery>,
) -> impl IntoResponse {
    let space = state.registry().get_or_default(&space_id).await;

    let products = match state
        .catalog()
        .list_products(
            Some(&space_id),
            query.category.as_deref(),
            query.product_type.as_deref(),
        )
        .await
    {
        Ok(products) => products.iter().map(ProductCardView::from).collect(),
        Err(e) => {
            tracing::warn!(space = %space_id, "Failed to load product listing: {e}");
            Vec::new()
        }
    };

    ProductsIndexTemplate {
        space: SpaceView::from(space.as_ref()),
        products,
        category: query.category,
    }
}

/// Display the product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ResolvedSpace(space_id): ResolvedSpace,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let space = state.registry().get_or_default(&space_id).await;

    let product = state.catalog().get_product(&slug).await.map_err(|e| {
        if matches!(e, crate::catalog::CatalogError::NotFound(_)) {
            AppError::NotFound(format!("Product '{slug}' not found"))
        } else {
            AppError::Catalog(e)
        }
    })?;

    Ok(ProductShowTemplate {
        space: SpaceView::from(space.as_ref()),
        product: ProductView::from(&product),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(24.0), "$24.00");
        assert_eq!(format_price(19.995), "$20.00");
        assert_eq!(format_price(0.0), "$0.00");
    }
}
