//! HTTP-level integration tests for the chapter browser and reader.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_manga, get, post_json};
use sqlx::PgPool;

fn manga_with_chapters() -> serde_json::Value {
    serde_json::json!({
        "title": "Akira",
        "chapters": [
            { "title": "The Highway", "chapterNumber": 1, "releaseDate": "2024-01-01", "views": 50 },
            { "title": "Tetsuo", "chapterNumber": 2, "releaseDate": "2024-02-01", "views": 10 },
            { "title": "Kei", "chapterNumber": 3, "releaseDate": "2024-03-01", "views": 30 },
            { "title": "Chapter 12", "chapterNumber": 12, "releaseDate": "2024-04-01", "views": 5 }
        ]
    })
}

fn numbers(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|c| c["chapterNumber"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_defaults_to_newest_first(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let response = get(common::build_test_app(pool), &format!("/api/manga/{id}/chapters")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(numbers(&body_json(response).await), vec![12, 3, 2, 1]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_sorts_by_views_and_chapter(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let cases = [
        ("sort=views", vec![1, 3, 2, 12]),
        ("sort=views&order=asc", vec![12, 2, 3, 1]),
        ("sort=chapter", vec![1, 2, 3, 12]),
        ("sort=oldest", vec![1, 2, 3, 12]),
    ];
    for (query, expected) in cases {
        let uri = format!("/api/manga/{id}/chapters?{query}");
        let json = body_json(get(common::build_test_app(pool.clone()), &uri).await).await;
        assert_eq!(numbers(&json), expected, "query {query}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_title_or_number(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let uri = format!("/api/manga/{id}/chapters?search=tetsuo");
    let json = body_json(get(common::build_test_app(pool.clone()), &uri).await).await;
    assert_eq!(numbers(&json), vec![2]);

    let uri = format!("/api/manga/{id}/chapters?search=1&sort=chapter");
    let json = body_json(get(common::build_test_app(pool), &uri).await).await;
    assert_eq!(numbers(&json), vec![1, 12]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn chapters_of_missing_manga_return_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/manga/999999/chapters").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Manga not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn latest_returns_highest_numbers(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let uri = format!("/api/manga/{id}/chapters/latest?limit=2");
    let json = body_json(get(common::build_test_app(pool.clone()), &uri).await).await;
    assert_eq!(numbers(&json), vec![12, 3]);

    let uri = format!("/api/manga/{id}/chapters/latest");
    let json = body_json(get(common::build_test_app(pool), &uri).await).await;
    assert_eq!(numbers(&json), vec![12, 3, 2, 1]);
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn reader_includes_neighbours_across_gaps(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let uri = format!("/api/manga/{id}/chapters/3");
    let response = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["chapter"]["title"], "Kei");
    assert_eq!(json["previous"], 2);
    assert_eq!(json["next"], 12);

    let uri = format!("/api/manga/{id}/chapters/1");
    let json = body_json(get(common::build_test_app(pool), &uri).await).await;
    assert!(json["previous"].is_null());
    assert_eq!(json["next"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_chapter_returns_404(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let uri = format!("/api/manga/{id}/chapters/7");
    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Chapter not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn view_increments_chapter_and_manga_counters(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let uri = format!("/api/manga/{id}/chapters/2/view");
    let response = post_json(common::build_test_app(pool.clone()), &uri, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["views"], 11);

    let json = body_json(get(common::build_test_app(pool), &format!("/api/manga/{id}")).await).await;
    assert_eq!(json["totalViews"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn view_of_unknown_chapter_returns_404(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let uri = format!("/api/manga/{id}/chapters/99/view");
    let response = post_json(common::build_test_app(pool), &uri, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_sort_key_returns_json_error(pool: PgPool) {
    let id = create_manga(&pool, manga_with_chapters()).await;

    let uri = format!("/api/manga/{id}/chapters?sort=random");
    let response = get(common::build_test_app(pool), &uri).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
