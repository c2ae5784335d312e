//! Resolver integration tests
//!
//! Concurrency through real threads, plus the process-wide instance. The
//! shared instance is exercised from a single test so no other test in this
//! binary can observe or disturb its state.

#![cfg(not(feature = "loom"))]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use kgate_ident::{
    dbj2, reset_state, resolve, resolve_with, shared, stats, Collision, CollisionSink,
    IdentifierResolver,
};

// ============================================================================
// Counting Sink
// ============================================================================

#[derive(Default)]
struct CountingSink {
    reports: AtomicUsize,
}

impl CollisionSink for CountingSink {
    fn report(&self, _collision: &Collision) {
        self.reports.fetch_add(1, Ordering::SeqCst);
    }
}

const NAMES: [&str; 8] = [
    "NtAllocateVirtualMemory",
    "NtProtectVirtualMemory",
    "NtCreateThreadEx",
    "NtWriteVirtualMemory",
    "NtQuerySystemInformation",
    "NtOpenProcess",
    "NtClose",
    "NtDelayExecution",
];

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_concurrent_resolves_agree() {
    let resolver = Arc::new(IdentifierResolver::with_sink(CountingSink::default()));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || {
                (0..200)
                    .map(|i| {
                        let name = NAMES[(t + i) % NAMES.len()];
                        (name, resolver.resolve(name))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (name, identifier) in handle.join().unwrap() {
            assert_eq!(identifier, dbj2(name.as_bytes()));
        }
    }

    let stats = resolver.stats();
    assert_eq!(stats.total_entries, NAMES.len());
    assert_eq!(stats.unique_hashes, NAMES.len());
    assert_eq!(stats.collisions, 0);
    assert!(stats.cache_hit_ratio > 0.9);
    assert_eq!(resolver.sink().reports.load(Ordering::SeqCst), 0);
}

#[test]
fn test_concurrent_collision_reported_once() {
    for _ in 0..50 {
        let resolver = Arc::new(IdentifierResolver::with_sink(CountingSink::default()));
        let handles: Vec<_> = ["0Q", "10"]
            .into_iter()
            .map(|name| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || resolver.resolve(name))
            })
            .collect();
        let ids: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(ids[0], ids[1]);
        assert_eq!(resolver.sink().reports.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.stats().collisions, 1);
    }
}

#[test]
fn test_reset_under_load_stays_consistent() {
    let resolver = Arc::new(IdentifierResolver::with_sink(CountingSink::default()));

    let workers: Vec<_> = (0..4)
        .map(|t| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || {
                for i in 0..500 {
                    let name = NAMES[(t * 3 + i) % NAMES.len()];
                    assert_eq!(resolver.resolve(name), dbj2(name.as_bytes()));
                }
            })
        })
        .collect();
    let resetter = {
        let resolver = Arc::clone(&resolver);
        thread::spawn(move || {
            for _ in 0..50 {
                resolver.reset();
                thread::yield_now();
            }
        })
    };

    for worker in workers {
        worker.join().unwrap();
    }
    resetter.join().unwrap();

    let stats = resolver.stats();
    assert!(stats.total_entries <= NAMES.len());
    assert!(stats.unique_hashes <= NAMES.len());
    assert_eq!(resolver.sink().reports.load(Ordering::SeqCst), 0);
}

#[test]
fn test_shared_instance_lifecycle() {
    reset_state();
    assert_eq!(stats().total_entries, 0);

    let names = ["kernel32.dll", "ntdll.dll", "NtClose"];
    for name in names {
        assert_eq!(resolve(name), dbj2(name.as_bytes()));
    }
    let after = stats();
    assert_eq!(after.total_entries, names.len());
    assert_eq!(after.unique_hashes, names.len());
    assert_eq!(after.collisions, 0);

    // Repeat lookups are hits and add nothing.
    resolve("ntdll.dll");
    assert_eq!(stats().total_entries, names.len());
    assert!(shared().is_cached("ntdll.dll"));

    assert_eq!(resolve_with("ntdll.dll", "nope"), resolve_with("ntdll.dll", "dbj2"));
    assert_ne!(resolve_with("ntdll.dll", "fnv1a"), resolve_with("ntdll.dll", "dbj2"));

    reset_state();
    let cleared = stats();
    assert_eq!(cleared.total_entries, 0);
    assert_eq!(cleared.unique_hashes, 0);
    assert_eq!(cleared.collisions, 0);

    resolve("ntdll.dll");
    assert_eq!(stats().total_entries, 1);
    reset_state();
}
