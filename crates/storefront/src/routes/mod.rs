//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! # Products
//! GET  /products               - Product listing (space-filtered)
//! GET  /products/{slug}        - Product detail
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count fragment, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Spaces
//! GET  /spaces                 - List all space configs (JSON)
//! GET  /spaces/{id}            - One space config (JSON)
//! ```
//!
//! Every page handler reads the [`ResolvedSpace`](crate::middleware::ResolvedSpace)
//! extension placed by the space resolver middleware; the resolved space
//! drives branding, theme injection, catalog filtering, and cart key scoping.

pub mod cart;
pub mod home;
pub mod products;
pub mod spaces;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use merchspace_core::Space;

use crate::middleware::{request_id_middleware, space_resolver_middleware};
use crate::state::AppState;

/// Space branding data for templates.
///
/// Derived from the resolved space's config; `theme_css` is the serialized
/// set of CSS variable overrides injected at the top of every page.
#[derive(Clone)]
pub struct SpaceView {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub footer_text: String,
    pub logo_url: Option<String>,
    pub theme_css: String,
    pub design_tips: Vec<String>,
}

impl From<&Space> for SpaceView {
    fn from(space: &Space) -> Self {
        Self {
            id: space.id.to_string(),
            name: space.name.clone(),
            tagline: space.tagline.clone(),
            description: space.description.clone(),
            footer_text: space.footer_text.clone(),
            logo_url: space.logo_url.clone(),
            theme_css: space.theme.to_css_vars(),
            design_tips: space.design_tips.clone(),
        }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the spaces API router.
pub fn space_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(spaces::index))
        .route("/{id}", get(spaces::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Space config API
        .nest("/spaces", space_routes())
}

/// Assemble the full application router with the storefront middleware stack.
///
/// Static file serving and the Sentry tower layers are added in `main`; this
/// function covers everything the end-to-end tests exercise.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(from_fn_with_state(state.clone(), space_resolver_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the default space can be served (always possible via the built-in
/// fallback) and that the spaces directory is readable, so a misdeployed
/// config volume is visible before traffic is routed.
async fn readiness(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::http::StatusCode {
    let _ = state.registry().default_space().await;
    if state.config().spaces.dir.is_dir() {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    }
}
