//! Resolver statistics snapshot

use serde::Serialize;

/// Point-in-time view of an [`IdentifierResolver`](crate::IdentifierResolver).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ResolverStats {
    /// Names held in the cache
    pub total_entries: usize,
    /// Distinct identifiers in the collision registry
    pub unique_hashes: usize,
    /// `total_entries - unique_hashes`, never negative
    pub collisions: usize,
    /// Cache hits over lookups through `resolve` (0.0 before any lookup)
    pub cache_hit_ratio: f64,
}

impl ResolverStats {
    pub(crate) fn new(total_entries: usize, unique_hashes: usize, hits: u64, lookups: u64) -> Self {
        // A reset racing a resolve can zero `lookups` before that resolve
        // counts its hit.
        let hits = hits.min(lookups);
        let cache_hit_ratio = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        };
        Self {
            total_entries,
            unique_hashes,
            collisions: total_entries.saturating_sub(unique_hashes),
            cache_hit_ratio,
        }
    }
}
