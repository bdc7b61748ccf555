use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::reaction::toggle::{ToggleOutcome, VoteChange};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToggleVoteRequest {
    pub item_id: String,
    #[serde(rename = "type")]
    pub vote_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToggleVoteResponse {
    pub voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub updated: Option<bool>,
    pub count: i64,
}

impl From<ToggleOutcome> for ToggleVoteResponse {
    fn from(outcome: ToggleOutcome) -> Self {
        let (voted, created, updated) = match outcome.change {
            VoteChange::Created => (true, Some(true), None),
            VoteChange::Updated => (true, None, Some(true)),
            VoteChange::Removed => (false, None, None),
        };
        Self {
            voted,
            created,
            updated,
            count: outcome.count,
        }
    }
}
