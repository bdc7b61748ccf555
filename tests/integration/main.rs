mod test_batch_count;
mod test_postgres_store;
