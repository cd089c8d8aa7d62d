//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Cart IDs live in a client cookie whose name is scoped to the resolved
//! space via [`cart_storage_key`], so each space keeps an independent cart
//! on a shared root domain.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use merchspace_core::{SpaceId, cart_storage_key};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::catalog::types::{Cart, CartItem, CartItemCreate};
use crate::filters;
use crate::middleware::ResolvedSpace;
use crate::middleware::cookies::{read_cookie, set_cookie_value};
use crate::routes::SpaceView;
use crate::state::AppState;

/// Cart cookie lifetime (30 days).
const CART_COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub product_slug: String,
    pub product_name: String,
    pub variant: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

/// Format a price amount as a display string.
fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items.iter().map(CartItemView::from).collect(),
            subtotal: format_price(cart.subtotal),
            item_count: cart.item_count,
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            product_slug: item.product_slug.clone(),
            product_name: item.product_name.clone(),
            variant: item.variant.clone(),
            quantity: item.quantity,
            unit_price: format_price(item.unit_price),
            subtotal: format_price(item.subtotal),
        }
    }
}

// =============================================================================
// Cookie Helpers
// =============================================================================

/// Read the space-scoped cart id cookie.
fn get_cart_id(headers: &HeaderMap, space_id: &SpaceId) -> Option<Uuid> {
    let key = cart_storage_key(space_id);
    read_cookie(headers, &key).and_then(|value| Uuid::parse_str(&value).ok())
}

/// Build the `Set-Cookie` header persisting the cart id under the
/// space-scoped key.
fn cart_cookie(
    state: &AppState,
    space_id: &SpaceId,
    cart_id: Uuid,
) -> Option<axum::http::HeaderValue> {
    set_cookie_value(
        &cart_storage_key(space_id),
        &cart_id.to_string(),
        CART_COOKIE_MAX_AGE_SECS,
        state.config().base_url.starts_with("https://"),
    )
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_slug: String,
    pub product_name: String,
    pub variant: String,
    pub quantity: Option<u32>,
    pub unit_price: f64,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: Uuid,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: Uuid,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub space: SpaceView,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display the cart page.
#[instrument(skip(state, headers))]
pub async fn show(
    State(state): State<AppState>,
    ResolvedSpace(space_id): ResolvedSpace,
    headers: HeaderMap,
) -> impl IntoResponse {
    let space = state.registry().get_or_default(&space_id).await;

    let cart = match get_cart_id(&headers, &space_id) {
        Some(cart_id) => match state.catalog().get_cart(cart_id).await {
            Ok(cart) => CartView::from(&cart),
            Err(e) => {
                tracing::warn!(space = %space_id, %cart_id, "Failed to fetch cart: {e}");
                CartView::empty()
            }
        },
        None => CartView::empty(),
    };

    CartShowTemplate {
        space: SpaceView::from(space.as_ref()),
        cart,
    }
}

/// Add an item to the cart (HTMX).
///
/// Creates a new cart if one doesn't exist for the current space, then
/// persists its id under the space-scoped cookie key. Returns an HTMX
/// trigger to update the cart count badge.
#[instrument(skip(state, headers, form))]
pub async fn add(
    State(state): State<AppState>,
    ResolvedSpace(space_id): ResolvedSpace,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let item = CartItemCreate {
        product_slug: form.product_slug,
        product_name: form.product_name,
        variant: form.variant,
        quantity: form.quantity.unwrap_or(1),
        unit_price: form.unit_price,
    };

    let result = match get_cart_id(&headers, &space_id) {
        Some(cart_id) => state.catalog().add_item(cart_id, &item).await,
        None => match state.catalog().create_cart().await {
            Ok(cart) => state.catalog().add_item(cart.id, &item).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(cart) => {
            let mut response = (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartCountTemplate {
                    count: cart.item_count,
                },
            )
                .into_response();

            if let Some(cookie) = cart_cookie(&state, &space_id, cart.id) {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }

            response
        }
        Err(e) => {
            tracing::error!(space = %space_id, "Failed to add item to cart: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<span class=\"cart-error\">Error adding to cart</span>"),
            )
                .into_response()
        }
    }
}

/// Update cart item quantity (HTMX).
#[instrument(skip(state, headers))]
pub async fn update(
    State(state): State<AppState>,
    ResolvedSpace(space_id): ResolvedSpace,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&headers, &space_id) else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    match state
        .catalog()
        .update_item(cart_id, form.item_id, form.quantity)
        .await
    {
        Ok(cart) => {
            let cart = CartView::from(&cart);
            (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartItemsTemplate { cart },
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(space = %space_id, %cart_id, "Failed to update cart: {e}");
            CartItemsTemplate {
                cart: CartView::empty(),
            }
            .into_response()
        }
    }
}

/// Remove an item from the cart (HTMX).
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    ResolvedSpace(space_id): ResolvedSpace,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&headers, &space_id) else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    match state.catalog().remove_item(cart_id, form.item_id).await {
        Ok(cart) => {
            let cart = CartView::from(&cart);
            (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartItemsTemplate { cart },
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(space = %space_id, %cart_id, "Failed to remove from cart: {e}");
            CartItemsTemplate {
                cart: CartView::empty(),
            }
            .into_response()
        }
    }
}

/// Display the cart count badge (HTMX).
#[instrument(skip(state, headers))]
pub async fn count(
    State(state): State<AppState>,
    ResolvedSpace(space_id): ResolvedSpace,
    headers: HeaderMap,
) -> impl IntoResponse {
    let count = match get_cart_id(&headers, &space_id) {
        Some(cart_id) => match state.catalog().get_cart(cart_id).await {
            Ok(cart) => cart.item_count,
            Err(e) => {
                tracing::warn!(space = %space_id, %cart_id, "Failed to fetch cart count: {e}");
                0
            }
        },
        None => 0,
    };

    CartCountTemplate { count }
}
