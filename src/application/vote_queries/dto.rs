use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::reaction::vote::{Vote, VoteType};

/// Public projection of a vote; identifiers rendered as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoteView {
    pub id: String,
    pub item_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

impl From<Vote> for VoteView {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id.to_string(),
            item_id: vote.item_id.to_string(),
            user_id: vote.user_id.to_string(),
            vote_type: vote.vote_type,
            created_at: vote.created_at,
        }
    }
}
