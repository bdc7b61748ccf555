use crate::application::{
    batch_count::{dto::ItemCount, use_case::BatchCountUseCase},
    toggle_vote::{
        dto::{ToggleVoteRequest, ToggleVoteResponse},
        use_case::ToggleVoteUseCase,
    },
    vote_queries::{dto::VoteView, use_case::VoteQueriesUseCase},
};
use crate::presentation::http::{
    errors::AppError, middleware::user::decode_required_user_claims, state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    pub id: String,
}

pub async fn list_likes(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Vec<VoteView>>, AppError> {
    let votes = VoteQueriesUseCase::new(state.vote_repo.clone())
        .list_voters(&query.id)
        .await?;
    Ok(Json(votes))
}

pub async fn get_user_like(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config)?;
    let vote = VoteQueriesUseCase::new(state.vote_repo.clone())
        .user_vote(&query.id, &claims.user_id)
        .await?;
    let body = match vote {
        Some(view) => json!(view),
        None => json!({}),
    };
    Ok(Json(body))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ToggleVoteRequest>,
) -> Result<Json<ToggleVoteResponse>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config)?;
    let response = ToggleVoteUseCase::new(state.vote_repo.clone(), state.count_cache.clone())
        .execute(body, &claims.user_id)
        .await?;
    Ok(Json(response))
}

pub async fn batch_count(
    State(state): State<AppState>,
    Json(ids): Json<Vec<String>>,
) -> Result<Json<Vec<ItemCount>>, AppError> {
    let counts = BatchCountUseCase::new(state.vote_repo.clone(), state.count_cache.clone())
        .execute(ids)
        .await?;
    Ok(Json(counts))
}
