use super::dto::ItemCount;
use crate::domain::errors::DomainError;
use crate::domain::reaction::{identifier::parse_identifier, repository::VoteRepository};
use crate::infrastructure::cache::count_cache::CountCache;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

pub struct BatchCountUseCase {
    repository: Arc<dyn VoteRepository>,
    cache: Arc<CountCache>,
}

impl BatchCountUseCase {
    pub fn new(repository: Arc<dyn VoteRepository>, cache: Arc<CountCache>) -> Self {
        Self { repository, cache }
    }

    /// Resolve vote counts for a list of item ids.
    ///
    /// Duplicates collapse to one entry, keyed by the raw string: two
    /// spellings of one item (for example with surrounding whitespace) are
    /// two entries. Ids that are not valid identifiers
    /// are reported with a count of 0 instead of failing the batch. Every
    /// cache miss is answered by a single grouped store query and written
    /// back to the cache unless a newer count landed there meanwhile. Either
    /// the whole batch resolves or it fails.
    pub async fn execute(&self, ids: Vec<String>) -> Result<Vec<ItemCount>, DomainError> {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut resolved: Vec<(String, Option<i64>)> = Vec::with_capacity(ids.len());
        let mut pending: Vec<(usize, Uuid)> = Vec::new();
        let mut malformed = 0usize;

        for raw in ids {
            if !seen.insert(raw.clone()) {
                continue;
            }
            match parse_identifier("id", &raw) {
                Ok(item_id) => match self.cache.get(&item_id) {
                    Some(count) => resolved.push((raw, Some(count))),
                    None => {
                        pending.push((resolved.len(), item_id));
                        resolved.push((raw, None));
                    }
                },
                Err(_) => {
                    malformed += 1;
                    resolved.push((raw, Some(0)));
                }
            }
        }

        let hits = resolved.len() - pending.len() - malformed;
        tracing::debug!(
            requested = resolved.len(),
            hits,
            misses = pending.len(),
            malformed,
            "resolving batch vote counts"
        );

        if !pending.is_empty() {
            let mut misses: Vec<Uuid> = pending.iter().map(|(_, id)| *id).collect();
            misses.sort_unstable();
            misses.dedup();

            let counts = self.repository.count_votes_batch(&misses).await?;
            for item_id in &misses {
                let found = counts.get(item_id).copied().unwrap_or_default();
                self.cache
                    .set_if_newer(*item_id, found.count, found.version);
            }
            for (slot, item_id) in pending {
                resolved[slot].1 = Some(counts.get(&item_id).map_or(0, |found| found.count));
            }
        }

        Ok(resolved
            .into_iter()
            .map(|(id, count)| ItemCount {
                id,
                count: count.unwrap_or(0),
            })
            .collect())
    }
}
