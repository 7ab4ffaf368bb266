//! Client tests against a local stub webhook.

use std::sync::{Arc, Mutex};

use akira_scraper::{ScraperClient, ScraperConfig, ScraperError};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

/// What the stub saw on its last request.
#[derive(Debug, Default, Clone)]
struct Seen {
    path: String,
    proxy_header: Option<String>,
    authorization: Option<String>,
    body: serde_json::Value,
}

/// Start a stub that answers every request with `status` and `body`.
async fn spawn_stub(
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
) -> (String, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let recorder = seen.clone();

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, payload: String| {
        let recorder = recorder.clone();
        async move {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            };
            *recorder.lock().unwrap() = Seen {
                path: uri.path().to_string(),
                proxy_header: header("x-requested-with"),
                authorization: header("authorization"),
                body: serde_json::from_str(&payload).unwrap_or_default(),
            };
            let response: Response =
                (status, [("content-type", content_type)], body).into_response();
            response
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

/// An address nothing listens on.
async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/hook")
}

const ENTRIES: &str = r#"[
    {"ch": "Chapter 2", "page": "[\"2-b.jpg\", \"2-a.jpg\"]"},
    {"ch": "Chapter 1", "page": "[\"1-a.jpg\"]"},
    {"ch": "Chapter 2", "page": "[\"2-c.jpg\"]"}
]"#;

fn config(url: String, proxy: String) -> ScraperConfig {
    let mut config = ScraperConfig::new(url);
    config.username = "admin".into();
    config.password = "secret".into();
    config.proxy_url = proxy;
    config
}

#[tokio::test]
async fn direct_request_returns_parsed_chapters() {
    let (base, seen) = spawn_stub(StatusCode::OK, "application/json", ENTRIES).await;
    let client =
        ScraperClient::new(config(format!("{base}/hook"), "http://127.0.0.1:1/".into())).unwrap();

    let chapters = client.scrape_chapters("one piece", &[]).await.unwrap();

    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].chapter_number, 1);
    assert_eq!(chapters[1].pages, vec!["2-a.jpg", "2-b.jpg", "2-c.jpg"]);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.path, "/hook");
    assert_eq!(seen.proxy_header, None);
    // base64("admin:secret")
    assert_eq!(seen.authorization.as_deref(), Some("Basic YWRtaW46c2VjcmV0"));
    assert_eq!(
        seen.body,
        serde_json::json!({ "anime": "one piece", "search": false })
    );
}

#[tokio::test]
async fn unreachable_webhook_falls_back_to_proxy() {
    let (proxy, seen) = spawn_stub(StatusCode::OK, "application/json", ENTRIES).await;
    let webhook = closed_url().await;
    let client = ScraperClient::new(config(webhook.clone(), format!("{proxy}/"))).unwrap();

    let report = client.test_connection("akira").await;

    assert!(report.success);
    assert!(report.cors_issue);
    assert_eq!(report.chapters_found, 2);
    assert_eq!(report.sample_chapters, vec!["Chapter 1", "Chapter 2"]);
    assert_eq!(report.api_url, webhook);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.proxy_header.as_deref(), Some("XMLHttpRequest"));
    assert!(seen.path.ends_with("/hook"));
    assert_eq!(seen.body["search"], serde_json::json!(true));
}

#[tokio::test]
async fn http_error_status_does_not_fall_back() {
    let (base, _) = spawn_stub(StatusCode::UNAUTHORIZED, "text/plain", "Unauthorized").await;
    let (proxy, proxy_seen) = spawn_stub(StatusCode::OK, "application/json", ENTRIES).await;
    let client = ScraperClient::new(config(format!("{base}/hook"), format!("{proxy}/"))).unwrap();

    let err = client.scrape_chapters("akira", &[]).await.unwrap_err();

    assert!(matches!(err, ScraperError::Status { status: 401, .. }));
    assert!(proxy_seen.lock().unwrap().path.is_empty());
}

#[tokio::test]
async fn both_transports_down_reports_network_error() {
    let client = ScraperClient::new(config(closed_url().await, "http://127.0.0.1:1/".into())).unwrap();

    let report = client.test_connection("akira").await;

    assert!(!report.success);
    assert!(report.cors_issue);
    assert_eq!(report.chapters_found, 0);
    assert!(report.error.unwrap().starts_with("Network error"));
}

#[tokio::test]
async fn search_parses_html_pages_and_swallows_failures() {
    const PAGE: &str = r#"<div class="manga_search_item">
        <h3><a href="/manga/akira">Akira</a></h3>
        <div>120 Chapters Published. Completed</div>
    </div>"#;
    let (base, _) = spawn_stub(StatusCode::OK, "text/html; charset=utf-8", PAGE).await;
    let client =
        ScraperClient::new(config(format!("{base}/hook"), "http://127.0.0.1:1/".into())).unwrap();

    let results = client.search_manga("akira").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Akira");
    assert_eq!(results[0].status, "Completed");

    let down =
        ScraperClient::new(config(closed_url().await, "http://127.0.0.1:1/".into())).unwrap();
    assert!(down.search_manga("akira").await.is_empty());
}
