use super::dto::VoteView;
use crate::domain::errors::DomainError;
use crate::domain::reaction::{identifier::parse_identifier, repository::VoteRepository};
use std::sync::Arc;

/// Read-only views over stored votes. These always go to the store.
pub struct VoteQueriesUseCase {
    repository: Arc<dyn VoteRepository>,
}

impl VoteQueriesUseCase {
    pub fn new(repository: Arc<dyn VoteRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_voters(&self, item_id: &str) -> Result<Vec<VoteView>, DomainError> {
        let item_id = parse_identifier("id", item_id)?;
        let votes = self.repository.list_votes(item_id).await?;
        Ok(votes.into_iter().map(VoteView::from).collect())
    }

    pub async fn user_vote(
        &self,
        item_id: &str,
        user_id: &str,
    ) -> Result<Option<VoteView>, DomainError> {
        let item_id = parse_identifier("id", item_id)?;
        let user_id = parse_identifier("user_id", user_id)?;
        let vote = self.repository.find_vote(item_id, user_id).await?;
        Ok(vote.map(VoteView::from))
    }
}
