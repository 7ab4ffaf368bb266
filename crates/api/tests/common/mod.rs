#![allow(dead_code)]

use std::sync::Arc;

use akira_anilist::AniListClient;
use akira_api::config::ServerConfig;
use akira_api::router::build_app_router;
use akira_api::state::AppState;
use akira_scraper::{ScraperClient, ScraperConfig};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. Scraping is disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_connect_retries: 0,
        db_connect_retry_delay_secs: 0,
        // Nothing listens here; tests that need AniList use `build_test_app_with`.
        anilist_url: "http://127.0.0.1:1/graphql".to_string(),
        scraper: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Scraping is disabled.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the application router from an explicit config, wiring the
/// external clients the same way `main.rs` does.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    config.validate().unwrap();
    let anilist = Arc::new(AniListClient::new(config.anilist_url.clone()));
    let scraper = config
        .scraper
        .clone()
        .map(|c| Arc::new(ScraperClient::new(c).unwrap()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        anilist,
        scraper,
    };
    build_app_router(state, &config)
}

/// Scraper config pointing at `url`, with an unreachable proxy.
pub fn scraper_config(url: String) -> ScraperConfig {
    let mut config = ScraperConfig::new(url);
    config.proxy_url = "http://127.0.0.1:1/".to_string();
    config
}

/// Serve a fixed response on every path and return the base URL.
pub async fn spawn_stub(content_type: &'static str, body: String) -> String {
    let app = Router::new().fallback(move || {
        let body = body.clone();
        async move {
            let response: Response =
                (StatusCode::OK, [("content-type", content_type)], body).into_response();
            response
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Accept connections and never answer; returns the base URL.
pub async fn spawn_silent() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a body verbatim, for requests that are not valid JSON.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: &'static str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a manga through the API and return its id.
pub async fn create_manga(pool: &PgPool, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/manga", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
