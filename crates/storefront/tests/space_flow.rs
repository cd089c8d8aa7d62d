//! End-to-end tests for space resolution, branding, and degradation.
//!
//! The router is exercised directly with `tower::ServiceExt::oneshot`, with
//! space configs in a temp directory and an unreachable commerce API, so the
//! tests cover the degraded paths deterministically: every page must still
//! render with the resolved space's branding.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tempfile::TempDir;
use tower::ServiceExt;

use merchspace_storefront::config::{CatalogConfig, SpacesConfig, StorefrontConfig};
use merchspace_storefront::routes;
use merchspace_storefront::state::AppState;

const ROOT_DOMAIN: &str = "merchspace.test";

fn write_space(dir: &TempDir, id: &str, yaml: &str) {
    let space_dir = dir.path().join(id);
    std::fs::create_dir_all(&space_dir).unwrap();
    std::fs::write(space_dir.join("space.yaml"), yaml).unwrap();
}

fn test_config(spaces_dir: PathBuf) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: format!("http://{ROOT_DOMAIN}"),
        root_domain: ROOT_DOMAIN.to_string(),
        dev_hosts: vec!["localhost".to_string()],
        spaces: SpacesConfig {
            dir: spaces_dir,
            cache_ttl_secs: 300,
        },
        catalog: CatalogConfig {
            // Port 9 (discard) refuses connections, so catalog calls fail fast
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.1,
    }
}

fn test_app(dir: &TempDir) -> Router {
    let state = AppState::new(test_config(dir.path().to_path_buf())).unwrap();
    routes::app(state)
}

fn seeded_spaces() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_space(
        &dir,
        "default",
        "id: default\nname: Merchspace\nfooter_text: The default storefront\n",
    );
    write_space(
        &dir,
        "acme",
        concat!(
            "id: acme\n",
            "name: Acme Collective\n",
            "tagline: Official Acme merch\n",
            "theme:\n",
            "  primary: 14 90% 53%\n",
            "  ring: 14 90% 53%\n",
        ),
    );
    dir
}

async fn get(app: Router, host: &str, uri: &str) -> (StatusCode, Vec<(String, String)>, String) {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

fn cookie_values<'a>(headers: &'a [(String, String)], name: &str) -> Vec<&'a str> {
    headers
        .iter()
        .filter(|(header_name, _)| header_name == "set-cookie")
        .filter_map(|(_, value)| value.strip_prefix(&format!("{name}=")))
        .collect()
}

#[tokio::test]
async fn subdomain_serves_space_branding_and_theme() {
    let dir = seeded_spaces();
    let (status, headers, body) = get(test_app(&dir), "acme.merchspace.test", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Acme Collective"));
    assert!(body.contains("Official Acme merch"));
    assert!(body.contains("--primary: 14 90% 53%;"));
    assert!(body.contains("--ring: 14 90% 53%;"));
    // Only configured roles are injected
    assert!(!body.contains("--background:"));

    let cookies = cookie_values(&headers, "space_id");
    assert_eq!(cookies.len(), 1);
    let cookie = cookies[0];
    assert!(cookie.starts_with("acme;"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("SameSite=Lax"));
    // Client-readable by design
    assert!(!cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn root_domain_serves_default_space() {
    let dir = seeded_spaces();
    let (status, headers, body) = get(test_app(&dir), "merchspace.test", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Merchspace"));
    assert!(body.contains("The default storefront"));
    assert_eq!(cookie_values(&headers, "space_id"), vec!["default; Path=/; Max-Age=86400; SameSite=Lax"]);
}

#[tokio::test]
async fn unknown_subdomain_degrades_to_default() {
    let dir = seeded_spaces();
    let (status, headers, body) = get(test_app(&dir), "ghost.merchspace.test", "/").await;

    // The id resolves to "ghost" with no config, so default branding is served
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Merchspace"));
    let cookies = cookie_values(&headers, "space_id");
    assert!(cookies[0].starts_with("ghost;"));
}

#[tokio::test]
async fn dev_host_honors_override_and_production_ignores_it() {
    let dir = seeded_spaces();

    let (_, _, body) = get(test_app(&dir), "localhost:3000", "/?_space=acme").await;
    assert!(body.contains("Acme Collective"));

    let (_, _, body) = get(test_app(&dir), "merchspace.test", "/?_space=acme").await;
    assert!(!body.contains("Acme Collective"));
    assert!(body.contains("Merchspace"));
}

#[tokio::test]
async fn missing_spaces_dir_still_serves_default() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let state = AppState::new(test_config(missing)).unwrap();
    let (status, _, body) = get(routes::app(state), "acme.merchspace.test", "/").await;

    // Built-in fallback branding, never an error page
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Merchspace"));
}

#[tokio::test]
async fn products_page_renders_despite_unreachable_catalog() {
    let dir = seeded_spaces();
    let (status, _, body) = get(test_app(&dir), "acme.merchspace.test", "/products").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Acme Collective"));
    assert!(body.contains("No products available"));
}

#[tokio::test]
async fn cart_page_degrades_to_empty_cart() {
    let dir = seeded_spaces();
    let request = Request::builder()
        .uri("/cart")
        .header(header::HOST, "acme.merchspace.test")
        // A stale cart id for this space; the catalog is unreachable
        .header(
            header::COOKIE,
            "cart_id_acme=7f8a1f34-9f0e-4a57-b2a3-3a8e5a3c9d11",
        )
        .body(Body::empty())
        .unwrap();

    let response = test_app(&dir).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn spaces_api_lists_and_fetches_configs() {
    let dir = seeded_spaces();

    let (status, _, body) = get(test_app(&dir), "merchspace.test", "/spaces").await;
    assert_eq!(status, StatusCode::OK);
    let spaces: serde_json::Value = serde_json::from_str(&body).unwrap();
    let ids: Vec<&str> = spaces
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["acme", "default"]);

    let (status, _, body) = get(test_app(&dir), "merchspace.test", "/spaces/acme").await;
    assert_eq!(status, StatusCode::OK);
    let space: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(space["name"], "Acme Collective");
    assert_eq!(space["theme"]["primary"], "14 90% 53%");

    let (status, _, _) = get(test_app(&dir), "merchspace.test", "/spaces/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Invalid ids are not found rather than errors
    let (status, _, _) = get(test_app(&dir), "merchspace.test", "/spaces/Not%20Valid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoints() {
    let dir = seeded_spaces();
    let (status, _, body) = get(test_app(&dir), "merchspace.test", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _, _) = get(test_app(&dir), "merchspace.test", "/health/ready").await;
    assert_eq!(status, StatusCode::OK);

    let missing = TempDir::new().unwrap();
    let state = AppState::new(test_config(missing.path().join("nope"))).unwrap();
    let (status, _, _) = get(routes::app(state), "merchspace.test", "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn request_id_header_is_set() {
    let dir = seeded_spaces();
    let (_, headers, _) = get(test_app(&dir), "merchspace.test", "/health").await;
    assert!(
        headers
            .iter()
            .any(|(name, value)| name == "x-request-id" && !value.is_empty())
    );
}
