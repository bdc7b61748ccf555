use crate::{
    config::Config, domain::reaction::repository::VoteRepository,
    infrastructure::cache::count_cache::CountCache,
};
use std::sync::Arc;

/// Shared handler state. The count cache lives here for the lifetime of the
/// process; tests build a fresh one per router.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub vote_repo: Arc<dyn VoteRepository>,
    pub count_cache: Arc<CountCache>,
}
