//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::ResolvedSpace;
use crate::routes::SpaceView;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub space: SpaceView,
    pub products: Vec<ProductCardView>,
}

/// Display the home page with the resolved space's branding and catalog.
///
/// Catalog failures degrade to an empty product grid so the page always
/// renders with the correct branding.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    ResolvedSpace(space_id): ResolvedSpace,
) -> impl IntoResponse {
    let space = state.registry().get_or_default(&space_id).await;

    let products = match state
        .catalog()
        .list_products(Some(&space_id), None, None)
        .await
    {
        Ok(products) => products.iter().map(ProductCardView::from).collect(),
        Err(e) => {
            tracing::warn!(space = %space_id, "Failed to load products for home page: {e}");
            Vec::new()
        }
    };

    HomeTemplate {
        space: SpaceView::from(space.as_ref()),
        products,
    }
}
