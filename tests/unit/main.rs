mod test_count_cache;
