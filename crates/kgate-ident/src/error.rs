//! Error types

use alloc::string::String;

/// Returned by strict algorithm parsing (`"...".parse::<HashAlgorithm>()`).
///
/// The resolver itself never fails: [`resolve_with`](crate::resolve_with)
/// falls back to DBJ2 for unknown names instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown hash algorithm `{name}` (expected `dbj2` or `fnv1a`)")]
pub struct UnknownAlgorithm {
    name: String,
}

impl UnknownAlgorithm {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    /// The name that failed to parse
    pub fn name(&self) -> &str {
        &self.name
    }
}
