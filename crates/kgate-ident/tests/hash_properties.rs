//! Property tests for the hash preprocessing and the resolver cache

use kgate_ident::{dbj2, fnv1a};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_hash_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(dbj2(&bytes), dbj2(&bytes));
        prop_assert_eq!(fnv1a(&bytes), fnv1a(&bytes));
    }

    #[test]
    fn prop_ascii_case_is_folded(name in "[A-Za-z0-9_.]{0,40}") {
        let upper = name.to_ascii_uppercase();
        let lower = name.to_ascii_lowercase();
        prop_assert_eq!(dbj2(upper.as_bytes()), dbj2(lower.as_bytes()));
        prop_assert_eq!(fnv1a(upper.as_bytes()), fnv1a(lower.as_bytes()));
    }

    #[test]
    fn prop_zero_bytes_are_elided(
        bytes in proptest::collection::vec(1u8.., 0..32),
        positions in proptest::collection::vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let mut padded = bytes.clone();
        for position in positions {
            let at = position.index(padded.len() + 1);
            padded.insert(at, 0);
        }
        prop_assert_eq!(dbj2(&padded), dbj2(&bytes));
        prop_assert_eq!(fnv1a(&padded), fnv1a(&bytes));
    }
}

/// Resolver-backed properties. Built on spin locks, so not under `loom`.
#[cfg(not(feature = "loom"))]
mod resolver_properties {
    use kgate_ident::{dbj2, HashAlgorithm, IdentifierResolver};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_cache_never_diverges(names in proptest::collection::vec("[a-zA-Z]{1,12}", 1..20)) {
            let resolver = IdentifierResolver::new();
            for name in &names {
                prop_assert_eq!(resolver.resolve(name), dbj2(name.as_bytes()));
            }
            for name in &names {
                prop_assert_eq!(resolver.resolve(name), dbj2(name.as_bytes()));
            }
        }

        #[test]
        fn prop_unknown_algorithm_is_dbj2(name in "[a-zA-Z]{0,16}", algorithm in "[a-z0-9]{0,8}") {
            prop_assume!(algorithm != "fnv1a");
            let resolver = IdentifierResolver::new();
            prop_assert_eq!(resolver.resolve_with(&name, &algorithm), dbj2(name.as_bytes()));
            prop_assert_eq!(
                resolver.resolve_with(&name, "fnv1a"),
                HashAlgorithm::Fnv1a.hash(name.as_bytes())
            );
        }
    }
}
