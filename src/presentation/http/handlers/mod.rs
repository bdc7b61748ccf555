pub mod health;
pub mod reactions;
