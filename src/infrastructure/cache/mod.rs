pub mod count_cache;
