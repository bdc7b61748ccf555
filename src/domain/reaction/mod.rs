pub mod identifier;
pub mod repository;
pub mod toggle;
pub mod vote;
