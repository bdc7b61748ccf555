use super::dto::{ToggleVoteRequest, ToggleVoteResponse};
use crate::domain::errors::DomainError;
use crate::domain::reaction::{
    identifier::parse_identifier, repository::VoteRepository, vote::VoteType,
};
use crate::infrastructure::cache::count_cache::CountCache;
use std::sync::Arc;

pub struct ToggleVoteUseCase {
    repository: Arc<dyn VoteRepository>,
    cache: Arc<CountCache>,
}

impl ToggleVoteUseCase {
    pub fn new(repository: Arc<dyn VoteRepository>, cache: Arc<CountCache>) -> Self {
        Self { repository, cache }
    }

    /// Toggle the caller's vote on an item.
    ///
    /// The returned count is the store's count after the mutation; the cache
    /// is refreshed with it on every branch unless a toggle that committed
    /// later has already cached a newer count.
    pub async fn execute(
        &self,
        request: ToggleVoteRequest,
        user_id: &str,
    ) -> Result<ToggleVoteResponse, DomainError> {
        let item_id = parse_identifier("item_id", &request.item_id)?;
        let user_id = parse_identifier("user_id", user_id)?;
        let vote_type: VoteType = request.vote_type.parse()?;

        match self
            .repository
            .toggle_vote(item_id, user_id, vote_type)
            .await
        {
            Ok(outcome) => {
                let cached = self
                    .cache
                    .set_if_newer(item_id, outcome.count, outcome.version);
                tracing::info!(
                    %item_id,
                    %user_id,
                    vote_type = %vote_type,
                    change = ?outcome.change,
                    count = outcome.count,
                    version = outcome.version,
                    cached,
                    "vote toggled"
                );
                Ok(outcome.into())
            }
            Err(e) => {
                // Commit state is unknown on failure; never keep a count we cannot vouch for.
                self.cache.invalidate(&item_id);
                Err(e)
            }
        }
    }
}
