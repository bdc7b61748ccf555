use serde::Serialize;
use uuid::Uuid;

use super::vote::{Vote, VoteType};

/// Store mutation required to apply a toggle to the current state of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Insert,
    Update { vote_id: Uuid, from: VoteType },
    Delete { vote_id: Uuid },
}

/// Decide how a toggle mutates the (item, user) pair.
///
/// No vote yet inserts one, the same type again removes it, and a different
/// type replaces the existing one in place.
pub fn plan_toggle(existing: Option<&Vote>, requested: VoteType) -> ToggleAction {
    match existing {
        None => ToggleAction::Insert,
        Some(vote) if vote.vote_type == requested => ToggleAction::Delete { vote_id: vote.id },
        Some(vote) => ToggleAction::Update {
            vote_id: vote.id,
            from: vote.vote_type,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChange {
    Created,
    Updated,
    Removed,
}

impl From<ToggleAction> for VoteChange {
    fn from(action: ToggleAction) -> Self {
        match action {
            ToggleAction::Insert => Self::Created,
            ToggleAction::Update { .. } => Self::Updated,
            ToggleAction::Delete { .. } => Self::Removed,
        }
    }
}

/// Result of an applied toggle. `count` is read after the mutation.
///
/// `version` is the item's toggle sequence number assigned by the store. Two
/// toggles on one item never share a version, and the later commit always
/// carries the higher one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub change: VoteChange,
    pub count: i64,
    pub version: i64,
}
