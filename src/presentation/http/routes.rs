use super::{
    handlers::{health, reactions},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Reactions
        .route("/likes", get(reactions::list_likes))
        .route("/likes/user", get(reactions::get_user_like))
        .route("/likes/toggle", post(reactions::toggle_like))
        .route("/likes/batch-count", post(reactions::batch_count))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
