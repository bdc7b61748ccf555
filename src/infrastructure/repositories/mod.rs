pub mod sqlx_vote_repository;
