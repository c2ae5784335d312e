//! Identifier resolver: cache and collision registry
//!
//! # Locking
//!
//! The cache and the collision registry each have their own reader/writer
//! lock. `resolve` never holds both:
//!
//! 1. cache read lock: lookup, released
//! 2. compute (no lock)
//! 3. cache write lock: insert, released
//! 4. registry write lock: check/register, released
//! 5. report the collision, if any (no lock)
//!
//! [`reset`](IdentifierResolver::reset) and [`stats`](IdentifierResolver::stats)
//! take both, always cache first, so they see and leave a consistent pair.
//!
//! With the `loom` feature the locks and counters come from `loom::sync`, so
//! the model tests drive this exact type. Loom primitives cannot live in a
//! `static`, so the shared instance and its free functions are not built then.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

#[cfg(not(feature = "loom"))]
use core::sync::atomic::{AtomicU64, Ordering};
#[cfg(not(feature = "loom"))]
use spin::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "loom")]
use loom::sync::atomic::{AtomicU64, Ordering};
#[cfg(feature = "loom")]
use loom::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::hash::{self, HashAlgorithm};
use crate::sink::{Collision, CollisionSink, TracingSink};
use crate::stats::ResolverStats;

/// Memoizing string-to-identifier resolver with collision tracking.
///
/// The cache only ever memoizes DBJ2, the pure function behind
/// [`resolve`](Self::resolve); an entry is never replaced once present.
pub struct IdentifierResolver<S = TracingSink> {
    /// name -> identifier
    cache: RwLock<BTreeMap<Vec<u8>, u32>>,
    /// identifier -> first name seen for it
    collisions: RwLock<BTreeMap<u32, Vec<u8>>>,
    /// `resolve` calls answered from the cache
    hits: AtomicU64,
    /// All `resolve` calls
    lookups: AtomicU64,
    sink: S,
}

impl IdentifierResolver<TracingSink> {
    /// Create an empty resolver that reports collisions through `tracing`
    #[cfg(not(feature = "loom"))]
    pub const fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    /// Create an empty resolver that reports collisions through `tracing`
    #[cfg(feature = "loom")]
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }
}

impl Default for IdentifierResolver<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CollisionSink> IdentifierResolver<S> {
    /// Create an empty resolver with a custom collision sink
    #[cfg(not(feature = "loom"))]
    pub const fn with_sink(sink: S) -> Self {
        Self {
            cache: RwLock::new(BTreeMap::new()),
            collisions: RwLock::new(BTreeMap::new()),
            hits: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
            sink,
        }
    }

    /// Create an empty resolver with a custom collision sink
    #[cfg(feature = "loom")]
    pub fn with_sink(sink: S) -> Self {
        Self {
            cache: RwLock::new(BTreeMap::new()),
            collisions: RwLock::new(BTreeMap::new()),
            hits: AtomicU64::new(0),
            lookups: AtomicU64::new(0),
            sink,
        }
    }

    /// The collision sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    // === Resolution ===

    /// Cached DBJ2 identifier for `name`
    pub fn resolve(&self, name: &str) -> u32 {
        self.resolve_bytes(name.as_bytes())
    }

    /// Cached DBJ2 identifier for a raw byte name
    pub fn resolve_bytes(&self, name: &[u8]) -> u32 {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        let cached = read(&self.cache).get(name).copied();
        if let Some(identifier) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return identifier;
        }

        let identifier = hash::dbj2(name);
        // A racing resolver may have inserted first; its value is identical.
        write(&self.cache).entry(name.to_vec()).or_insert(identifier);

        if let Some(collision) = self.register(identifier, name) {
            self.sink.report(&collision);
        }
        identifier
    }

    /// Uncached identifier using the algorithm named `algorithm`.
    ///
    /// `"dbj2"` and `"fnv1a"` are recognized; anything else means DBJ2.
    pub fn resolve_with(&self, name: &str, algorithm: &str) -> u32 {
        HashAlgorithm::from_name(algorithm).hash(name.as_bytes())
    }

    /// Uncached identifier using an explicit algorithm
    pub fn resolve_using(&self, name: &[u8], algorithm: HashAlgorithm) -> u32 {
        algorithm.hash(name)
    }

    /// Record `name` as canonical for `identifier`, or return the collision.
    fn register(&self, identifier: u32, name: &[u8]) -> Option<Collision> {
        let mut registry = write(&self.collisions);
        match registry.get(&identifier) {
            Some(existing) if existing.as_slice() != name => {
                Some(Collision::new(identifier, existing, name))
            }
            Some(_) => None,
            None => {
                registry.insert(identifier, name.to_vec());
                None
            }
        }
    }

    // === Administration ===

    /// Drop every cached entry and registered identifier, and zero the hit
    /// counters. Later resolves recompute from scratch.
    pub fn reset(&self) {
        {
            let mut cache = write(&self.cache);
            let mut registry = write(&self.collisions);
            cache.clear();
            registry.clear();
            self.hits.store(0, Ordering::Relaxed);
            self.lookups.store(0, Ordering::Relaxed);
        }
        tracing::debug!(target: "kgate_ident", "identifier resolver reset");
    }

    /// Snapshot of the current state
    pub fn stats(&self) -> ResolverStats {
        let cache = read(&self.cache);
        let registry = read(&self.collisions);
        ResolverStats::new(
            cache.len(),
            registry.len(),
            self.hits.load(Ordering::Relaxed),
            self.lookups.load(Ordering::Relaxed),
        )
    }

    /// Whether `name` is currently cached
    pub fn is_cached(&self, name: &str) -> bool {
        read(&self.cache).contains_key(name.as_bytes())
    }

    /// The name registered as canonical for `identifier`, if any
    pub fn canonical_name(&self, identifier: u32) -> Option<Vec<u8>> {
        read(&self.collisions).get(&identifier).cloned()
    }
}

// ============================================================================
// Lock Access
// ============================================================================

#[cfg(not(feature = "loom"))]
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read()
}

#[cfg(not(feature = "loom"))]
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write()
}

// No code panics while holding a resolver lock, so poisoning is unreachable.
#[cfg(feature = "loom")]
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(feature = "loom")]
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// Shared Instance
// ============================================================================

/// The process-wide resolver.
///
/// Created empty at startup, grows as names are resolved, and is only
/// emptied by [`reset_state`].
#[cfg(not(feature = "loom"))]
static SHARED: IdentifierResolver = IdentifierResolver::new();

/// The process-wide resolver behind the free functions
#[cfg(not(feature = "loom"))]
pub fn shared() -> &'static IdentifierResolver {
    &SHARED
}

/// Cached DBJ2 identifier for `name`, using the shared resolver
#[cfg(not(feature = "loom"))]
pub fn resolve(name: &str) -> u32 {
    SHARED.resolve(name)
}

/// Uncached identifier for `name` with the named algorithm (unknown → DBJ2)
#[cfg(not(feature = "loom"))]
pub fn resolve_with(name: &str, algorithm: &str) -> u32 {
    SHARED.resolve_with(name, algorithm)
}

/// Empty the shared resolver's cache and collision registry
#[cfg(not(feature = "loom"))]
pub fn reset_state() {
    SHARED.reset()
}

/// Snapshot of the shared resolver
#[cfg(not(feature = "loom"))]
pub fn stats() -> ResolverStats {
    SHARED.stats()
}

// ============================================================================
// Tests
// ============================================================================
