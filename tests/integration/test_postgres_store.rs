//! Vote store and router against a real Postgres. Skipped when no database
//! is reachable.

use super::helpers::{
    batch_request, count_of, expect_json, postgres_pool, spawn_postgres_app, toggle_request,
};
use axum::http::StatusCode;
use reactions::domain::reaction::{
    repository::{VersionedCount, VoteRepository},
    toggle::VoteChange,
    vote::VoteType,
};
use reactions::infrastructure::repositories::sqlx_vote_repository::SqlxVoteRepository;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn toggle_scenario_on_postgres() {
    let Some(app) = spawn_postgres_app().await else {
        return;
    };
    let item = Uuid::now_v7();
    let (u1, u2) = (Uuid::now_v7().to_string(), Uuid::now_v7().to_string());
    let raw = item.to_string();

    let body = expect_json(&app.app, toggle_request(&raw, "like", &u1), StatusCode::OK).await;
    assert_eq!(body, json!({ "voted": true, "created": true, "count": 1 }));

    let body = expect_json(&app.app, toggle_request(&raw, "like", &u2), StatusCode::OK).await;
    assert_eq!(body, json!({ "voted": true, "created": true, "count": 2 }));

    let body = expect_json(&app.app, toggle_request(&raw, "dislike", &u1), StatusCode::OK).await;
    assert_eq!(body, json!({ "voted": true, "updated": true, "count": 2 }));

    let body = expect_json(&app.app, toggle_request(&raw, "dislike", &u1), StatusCode::OK).await;
    assert_eq!(body, json!({ "voted": false, "count": 1 }));

    assert_eq!(app.repo.count_votes(item).await.unwrap(), 1);
    assert_eq!(app.cache.get(&item), Some(1));

    let remaining = app.repo.list_votes(item).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id.to_string(), u2);
    assert_eq!(remaining[0].vote_type, VoteType::Like);
}

#[tokio::test]
async fn concurrent_toggles_on_one_pair_keep_at_most_one_vote() {
    let Some((_, db)) = postgres_pool().await else {
        return;
    };
    let repo = Arc::new(SqlxVoteRepository::new(db));
    let (item, user) = (Uuid::now_v7(), Uuid::now_v7());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.toggle_vote(item, user, VoteType::Like).await })
        })
        .collect();

    let mut applied = Vec::new();
    for handle in handles {
        if let Ok(outcome) = handle.await.unwrap() {
            applied.push(outcome);
        }
    }
    assert!(!applied.is_empty(), "at least one toggle must settle");

    let created = applied
        .iter()
        .filter(|o| o.change == VoteChange::Created)
        .count() as i64;
    let removed = applied
        .iter()
        .filter(|o| o.change == VoteChange::Removed)
        .count() as i64;
    let stored = repo.count_votes(item).await.unwrap();

    assert!(stored <= 1, "pair holds {} votes", stored);
    assert_eq!(stored, created - removed);
    assert!(repo.list_votes(item).await.unwrap().len() <= 1);

    let versions: HashSet<i64> = applied.iter().map(|o| o.version).collect();
    assert_eq!(versions.len(), applied.len());
}

#[tokio::test]
async fn concurrent_toggles_on_one_item_are_versioned_in_commit_order() {
    let Some((_, db)) = postgres_pool().await else {
        return;
    };
    let repo = Arc::new(SqlxVoteRepository::new(db));
    let item = Uuid::now_v7();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(
                async move { repo.toggle_vote(item, Uuid::now_v7(), VoteType::Like).await },
            )
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap().unwrap());
    }

    // Each toggle adds one vote, so the count read at version v is exactly v.
    let mut versions: Vec<i64> = outcomes.iter().map(|o| o.version).collect();
    versions.sort_unstable();
    assert_eq!(versions, (1..=6).collect::<Vec<i64>>());
    assert!(outcomes.iter().all(|o| o.count == o.version));
    assert_eq!(repo.count_votes(item).await.unwrap(), 6);
}

#[tokio::test]
async fn batch_reports_absent_and_emptied_items_as_zero() {
    let Some(app) = spawn_postgres_app().await else {
        return;
    };
    let (voted, emptied, never) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
    let user = Uuid::now_v7();

    app.repo
        .toggle_vote(voted, user, VoteType::Dislike)
        .await
        .unwrap();
    app.repo.toggle_vote(emptied, user, VoteType::Like).await.unwrap();
    app.repo.toggle_vote(emptied, user, VoteType::Like).await.unwrap();

    let counts = app
        .repo
        .count_votes_batch(&[voted, emptied, never])
        .await
        .unwrap();
    assert_eq!(counts.get(&voted), Some(&VersionedCount { count: 1, version: 1 }));
    assert_eq!(counts.get(&emptied), Some(&VersionedCount { count: 0, version: 2 }));
    assert_eq!(counts.get(&never), None);

    let (voted_raw, emptied_raw, never_raw) =
        (voted.to_string(), emptied.to_string(), never.to_string());
    let body = expect_json(
        &app.app,
        batch_request(&[
            voted_raw.as_str(),
            emptied_raw.as_str(),
            never_raw.as_str(),
            "not-an-id",
        ]),
        StatusCode::OK,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(count_of(&body, &voted_raw), 1);
    assert_eq!(count_of(&body, &emptied_raw), 0);
    assert_eq!(count_of(&body, &never_raw), 0);
    assert_eq!(count_of(&body, "not-an-id"), 0);

    assert_eq!(app.cache.get(&voted), Some(1));
    assert_eq!(app.cache.get(&never), Some(0));
}
