//! Shared caches and the global registry under parallel access.

use checked_values::CanonicalCache;
use checked_values::registry::{self, Arg};
use checked_values::value::{Bic, VatId};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

const THREADS: usize = 8;
const ROUNDS: usize = 200;

#[test]
fn test_concurrent_of_retains_single_instance() {
    let results: Vec<Vec<Arc<Bic>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    (0..ROUNDS)
                        .map(|_| Bic::of("COBADEFFXXX").unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = &results[0][0];
    for value in results.iter().flatten() {
        assert!(Arc::ptr_eq(first, value));
    }
    assert!(Bic::canonical_cache().get("COBADEFFXXX").is_some());
}

#[test]
fn test_racing_constructions_are_discarded() {
    let cache: CanonicalCache<String, String> = CanonicalCache::new();
    let constructions = AtomicUsize::new(0);

    let values: Vec<Arc<String>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    cache
                        .get_or_create("shared", |raw: &str| {
                            constructions.fetch_add(1, Ordering::SeqCst);
                            thread::yield_now();
                            Ok::<_, ()>(raw.to_uppercase())
                        })
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(constructions.load(Ordering::SeqCst) >= 1);
    assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_distinct_inputs_in_parallel() {
    let cache: CanonicalCache<String, String> = CanonicalCache::new();
    thread::scope(|scope| {
        for t in 0..THREADS {
            let cache = &cache;
            scope.spawn(move || {
                let held: Vec<_> = (0..ROUNDS)
                    .map(|i| {
                        cache
                            .get_or_create(format!("{}-{}", t, i).as_str(), |raw: &str| {
                                Ok::<_, ()>(raw.to_string())
                            })
                            .unwrap()
                    })
                    .collect();
                assert_eq!(held.len(), ROUNDS);
            });
        }
    });
    assert_eq!(cache.live_len(), 0);
    cache.purge();
    assert!(cache.is_empty());
}

#[test]
fn test_global_registry_from_many_threads() {
    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..ROUNDS / 10 {
                    let value = registry::global()
                        .construct("VatId", &[Arg::from("DE136695976")])
                        .unwrap();
                    let vat = value.as_any().downcast_ref::<VatId>().unwrap();
                    assert_eq!(vat.country_code(), "DE");
                    assert!(
                        registry::global()
                            .validate_only("VatId", &[Arg::from("DE136695978")])
                            .is_err()
                    );
                }
            });
        }
    });
}
