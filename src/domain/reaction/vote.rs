use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Kind of reaction a user leaves on an item.
///
/// Every variant contributes equally to an item's aggregate count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, sqlx::Type)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "vote_type", rename_all = "lowercase")]
pub enum VoteType {
    Like,
    Dislike,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(DomainError::ValidationError(format!(
                "unsupported vote type '{}'",
                other
            ))),
        }
    }
}

/// One user's reaction to one item. At most one exists per (item, user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: Uuid,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(item_id: Uuid, user_id: Uuid, vote_type: VoteType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            item_id,
            user_id,
            vote_type,
            created_at: now,
            updated_at: now,
        }
    }
}
