use super::{
    toggle::ToggleOutcome,
    vote::{Vote, VoteType},
};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// Count of an item together with the toggle version it was read at.
///
/// Items that were never toggled have version 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionedCount {
    pub count: i64,
    pub version: i64,
}

/// Persistent vote store. Source of truth for every count.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    async fn find_vote(&self, item_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, DomainError>;

    /// Apply a toggle for the pair and recount the item, atomically.
    ///
    /// Implementations must hold the pair serialized: a concurrent toggle on
    /// the same (item, user) observes this one's effect. The outcome's
    /// version follows commit order per item.
    async fn toggle_vote(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        vote_type: VoteType,
    ) -> Result<ToggleOutcome, DomainError>;

    /// Authoritative count for one item, bypassing any cache.
    async fn count_votes(&self, item_id: Uuid) -> Result<i64, DomainError>;

    /// Counts for many items from one consistent snapshot in one round-trip.
    /// Items that were never toggled and have no votes may be omitted.
    async fn count_votes_batch(
        &self,
        item_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, VersionedCount>, DomainError>;

    async fn list_votes(&self, item_id: Uuid) -> Result<Vec<Vote>, DomainError>;

    async fn health_check(&self) -> Result<(), DomainError>;
}
