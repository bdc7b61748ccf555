pub mod batch_count;
pub mod toggle_vote;
pub mod vote_queries;
