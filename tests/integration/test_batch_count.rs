use super::helpers::{batch_request, count_of, expect_json, spawn_app, toggle_request};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::atomic::Ordering;
use uuid::Uuid;

#[tokio::test]
async fn empty_batch_returns_empty_list_without_store_calls() {
    let app = spawn_app();
    let body = expect_json(&app.app, batch_request(&[]), StatusCode::OK).await;
    assert_eq!(body, json!([]));
    assert_eq!(app.repo.batch_queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_ids_collapse() {
    let app = spawn_app();
    let item = Uuid::now_v7().to_string();
    let ids = [item.as_str(), item.as_str(), item.as_str()];
    let body = expect_json(&app.app, batch_request(&ids), StatusCode::OK).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(count_of(&body, &item), 0);
}

#[tokio::test]
async fn misses_resolve_in_one_query_and_then_hit_cache() {
    let app = spawn_app();
    let voted = Uuid::now_v7().to_string();
    expect_json(
        &app.app,
        toggle_request(&voted, "like", &Uuid::now_v7().to_string()),
        StatusCode::OK,
    )
    .await;
    // The toggle primed the cache for `voted`; only the fresh ids miss.
    let fresh: Vec<String> = (0..10).map(|_| Uuid::now_v7().to_string()).collect();
    let mut ids: Vec<&str> = fresh.iter().map(String::as_str).collect();
    ids.push(&voted);

    let first = expect_json(&app.app, batch_request(&ids), StatusCode::OK).await;
    assert_eq!(first.as_array().unwrap().len(), 11);
    assert_eq!(count_of(&first, &voted), 1);
    assert_eq!(app.repo.batch_queries.load(Ordering::SeqCst), 1);
    assert_eq!(app.repo.batch_ids_queried.load(Ordering::SeqCst), 10);

    let second = expect_json(&app.app, batch_request(&ids), StatusCode::OK).await;
    assert_eq!(second.as_array().unwrap().len(), 11);
    assert_eq!(app.repo.batch_queries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_ids_are_reported_as_zero() {
    let app = spawn_app();
    let item = Uuid::now_v7().to_string();
    expect_json(
        &app.app,
        toggle_request(&item, "dislike", &Uuid::now_v7().to_string()),
        StatusCode::OK,
    )
    .await;

    let body = expect_json(
        &app.app,
        batch_request(&["not-an-id", item.as_str()]),
        StatusCode::OK,
    )
    .await;
    assert_eq!(count_of(&body, "not-an-id"), 0);
    assert_eq!(count_of(&body, &item), 1);
}
