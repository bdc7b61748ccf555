use reactions::infrastructure::cache::count_cache::CountCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn cache(capacity: usize) -> CountCache {
    CountCache::new(NonZeroUsize::new(capacity).unwrap(), Duration::from_secs(60))
}

#[test]
fn capacity_is_never_exceeded() {
    let cache = cache(8);
    for n in 0..100 {
        cache.set_if_newer(Uuid::now_v7(), n, 1);
    }
    assert_eq!(cache.len(), 8);
    assert_eq!(cache.stats().capacity, 8);
}

#[test]
fn concurrent_writers_leave_one_consistent_entry_per_key() {
    let cache = Arc::new(cache(16));
    let item_id = Uuid::now_v7();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                for n in 0..200 {
                    cache.set_if_newer(item_id, worker * 1000 + n, n);
                    let _ = cache.get(&item_id);
                    if n % 50 == 0 {
                        cache.invalidate(&item_id);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 1);
    if let Some(count) = cache.get(&item_id) {
        assert_eq!(count % 1000, 199, "highest version should win");
    }
}

#[test]
fn stats_track_hits_and_misses() {
    let cache = cache(4);
    let item_id = Uuid::now_v7();
    assert_eq!(cache.get(&item_id), None);
    cache.set_if_newer(item_id, 2, 1);
    assert_eq!(cache.get(&item_id), Some(2));
    assert_eq!(cache.get(&item_id), Some(2));

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
}

#[test]
fn racing_writers_never_regress_below_highest_version() {
    let cache = Arc::new(cache(4));
    let item_id = Uuid::now_v7();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                // Each worker offers every version, in a different order.
                for n in 0..100i64 {
                    let version = if worker % 2 == 0 { n } else { 99 - n };
                    cache.set_if_newer(item_id, version * 10, version);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.get(&item_id), Some(990));
}
