use crate::domain::{
    errors::DomainError,
    reaction::{
        repository::{VersionedCount, VoteRepository},
        toggle::{ToggleAction, ToggleOutcome, plan_toggle},
        vote::{Vote, VoteType},
    },
};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

/// Reads of the pair after losing a race on the unique (item_id, user_id) key.
const MAX_TOGGLE_ATTEMPTS: u32 = 3;

const VOTE_COLUMNS: &str = "id, item_id, user_id, vote_type, created_at, updated_at";

pub struct SqlxVoteRepository {
    pub pool: PgPool,
}

impl SqlxVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn find_vote_for_update(
    conn: &mut PgConnection,
    item_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Vote>, DomainError> {
    let vote = sqlx::query_as::<_, Vote>(&format!(
        "SELECT {VOTE_COLUMNS} FROM votes WHERE item_id = $1 AND user_id = $2 FOR UPDATE"
    ))
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    Ok(vote)
}

/// Returns false when a concurrent toggle inserted the pair first.
async fn insert_vote(
    conn: &mut PgConnection,
    item_id: Uuid,
    user_id: Uuid,
    vote_type: VoteType,
) -> Result<bool, DomainError> {
    let result = sqlx::query(
        "INSERT INTO votes (id, item_id, user_id, vote_type) VALUES ($1, $2, $3, $4) \
         ON CONFLICT (item_id, user_id) DO NOTHING",
    )
    .bind(Uuid::now_v7())
    .bind(item_id)
    .bind(user_id)
    .bind(vote_type)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

async fn update_vote_type(
    conn: &mut PgConnection,
    vote_id: Uuid,
    from: VoteType,
    to: VoteType,
) -> Result<bool, DomainError> {
    let result = sqlx::query(
        "UPDATE votes SET vote_type = $3, updated_at = NOW() WHERE id = $1 AND vote_type = $2",
    )
    .bind(vote_id)
    .bind(from)
    .bind(to)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

async fn delete_vote(conn: &mut PgConnection, vote_id: Uuid) -> Result<bool, DomainError> {
    let result = sqlx::query("DELETE FROM votes WHERE id = $1")
        .bind(vote_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Take the next toggle version for the item.
///
/// The upsert row-locks the item's version until commit, so concurrent toggles
/// on one item receive versions in commit order.
async fn bump_item_version(conn: &mut PgConnection, item_id: Uuid) -> Result<i64, DomainError> {
    let version = sqlx::query_scalar::<_, i64>(
        "INSERT INTO item_vote_versions (item_id, version) VALUES ($1, 1) \
         ON CONFLICT (item_id) DO UPDATE \
         SET version = item_vote_versions.version + 1, updated_at = NOW() \
         RETURNING version",
    )
    .bind(item_id)
    .fetch_one(conn)
    .await?;
    Ok(version)
}

async fn count_for_item(conn: &mut PgConnection, item_id: Uuid) -> Result<i64, DomainError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM votes WHERE item_id = $1")
        .bind(item_id)
        .fetch_one(conn)
        .await?;
    Ok(count)
}

#[async_trait]
impl VoteRepository for SqlxVoteRepository {
    async fn find_vote(&self, item_id: Uuid, user_id: Uuid) -> Result<Option<Vote>, DomainError> {
        let vote = sqlx::query_as::<_, Vote>(&format!(
            "SELECT {VOTE_COLUMNS} FROM votes WHERE item_id = $1 AND user_id = $2"
        ))
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vote)
    }

    async fn toggle_vote(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        vote_type: VoteType,
    ) -> Result<ToggleOutcome, DomainError> {
        let mut tx = self.pool.begin().await?;

        let mut applied = None;
        for attempt in 1..=MAX_TOGGLE_ATTEMPTS {
            // Row lock on an existing vote serializes toggles on the pair; the
            // unique key covers the case where no row exists yet.
            let existing = find_vote_for_update(&mut tx, item_id, user_id).await?;
            let action = plan_toggle(existing.as_ref(), vote_type);
            let done = match action {
                ToggleAction::Insert => insert_vote(&mut tx, item_id, user_id, vote_type).await?,
                ToggleAction::Update { vote_id, from } => {
                    update_vote_type(&mut tx, vote_id, from, vote_type).await?
                }
                ToggleAction::Delete { vote_id } => delete_vote(&mut tx, vote_id).await?,
            };
            if done {
                applied = Some(action);
                break;
            }
            tracing::debug!(%item_id, %user_id, attempt, "toggle raced a concurrent vote, re-reading");
        }

        let action = applied.ok_or_else(|| {
            DomainError::StorageError(format!(
                "toggle on item {} did not settle after {} attempts",
                item_id, MAX_TOGGLE_ATTEMPTS
            ))
        })?;

        // Recount while holding the version lock: every lower version has
        // committed and no higher one has.
        let version = bump_item_version(&mut tx, item_id).await?;
        let count = count_for_item(&mut tx, item_id).await?;
        tx.commit().await?;

        Ok(ToggleOutcome {
            change: action.into(),
            count,
            version,
        })
    }

    async fn count_votes(&self, item_id: Uuid) -> Result<i64, DomainError> {
        let mut conn = self.pool.acquire().await?;
        count_for_item(&mut conn, item_id).await
    }

    async fn count_votes_batch(
        &self,
        item_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, VersionedCount>, DomainError> {
        if item_ids.is_empty() {
            return Ok(HashMap::new());
        }
        // One statement, one snapshot: counts and versions agree.
        let rows = sqlx::query_as::<_, (Uuid, i64, i64)>(
            "WITH counts AS ( \
                 SELECT item_id, COUNT(*) AS vote_count FROM votes \
                 WHERE item_id = ANY($1) GROUP BY item_id \
             ), versions AS ( \
                 SELECT item_id, version FROM item_vote_versions WHERE item_id = ANY($1) \
             ) \
             SELECT COALESCE(c.item_id, v.item_id), \
                    COALESCE(c.vote_count, 0)::BIGINT, \
                    COALESCE(v.version, 0)::BIGINT \
             FROM counts c FULL OUTER JOIN versions v ON v.item_id = c.item_id",
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(item_id, count, version)| (item_id, VersionedCount { count, version }))
            .collect())
    }

    async fn list_votes(&self, item_id: Uuid) -> Result<Vec<Vote>, DomainError> {
        let votes = sqlx::query_as::<_, Vote>(&format!(
            "SELECT {VOTE_COLUMNS} FROM votes WHERE item_id = $1 ORDER BY created_at DESC"
        ))
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(votes)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
