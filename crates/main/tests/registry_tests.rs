//! Concurrency tests for the signature registry.

#![cfg(feature = "derive")]
#![allow(dead_code)]

use std::sync::{Arc, Barrier};
use std::thread;

use tysig::{Introspect, Options, SignatureRegistry, TypedSignature};

#[derive(Introspect)]
struct Prompt {
    #[sig(required)]
    text: String,
}

#[derive(Introspect)]
struct Completion {
    text: String,
    tokens: u32,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn test_concurrent_first_use_converges() {
    init_tracing();

    const THREADS: usize = 16;
    let registry = SignatureRegistry::with_options(&Options::default().with_registry_shards(4));
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    registry.get_or_create::<Prompt, Completion>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let first = &results[0];
    assert!(results.iter().all(|meta| Arc::ptr_eq(meta, first)));
    assert_eq!(registry.len(), 1);

    let stats = registry.stats();
    assert_eq!(stats.hits + stats.misses, THREADS as u64);
    assert!(stats.misses >= 1);
}

#[test]
fn test_distinct_pairs_do_not_collide() {
    init_tracing();

    let registry = SignatureRegistry::new();
    thread::scope(|scope| {
        scope.spawn(|| registry.get_or_create::<Prompt, Completion>());
        scope.spawn(|| registry.get_or_create::<Completion, Prompt>());
        scope.spawn(|| registry.get_or_create::<Prompt, Prompt>());
    });
    assert_eq!(registry.len(), 3);
    assert!(registry.contains::<Completion, Prompt>());
}

#[test]
fn test_typed_handles_share_cached_metadata() {
    let registry = SignatureRegistry::default();
    let a = TypedSignature::<Prompt, Completion>::cached(&registry);
    let b = a.clone();
    let c = TypedSignature::<Prompt, Completion>::cached(&registry);

    assert!(Arc::ptr_eq(&a.shared_metadata(), &b.shared_metadata()));
    assert!(Arc::ptr_eq(&a.shared_metadata(), &c.shared_metadata()));

    let uncached = TypedSignature::<Prompt, Completion>::new();
    assert!(!Arc::ptr_eq(&a.shared_metadata(), &uncached.shared_metadata()));
    assert_eq!(a.metadata(), uncached.metadata());
}
