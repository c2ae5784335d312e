//! kgate Identifier Resolver
//!
//! Derives stable 32-bit identifiers from names so call sites can refer to
//! kernel routines by number instead of by plaintext string.
//!
//! # Components
//!
//! - [`hash`] - DBJ2 (default) and FNV-1a, both `const fn`, with zero-byte
//!   elision and case folding
//! - [`resolver`] - [`IdentifierResolver`]: memoizing cache plus collision
//!   registry, each behind its own reader/writer lock
//! - [`sink`] - where collision diagnostics go ([`TracingSink`] by default)
//! - [`stats`] - read-only snapshot of the resolver state
//!
//! # Shared Instance
//!
//! The free functions [`resolve`], [`resolve_with`], [`reset_state`] and
//! [`stats()`] operate on one process-wide resolver ([`shared`]). It is a
//! plain `static`, created empty and reset only on request. Components that
//! want isolation construct their own [`IdentifierResolver`]. The shared
//! instance is not built with the `loom` feature.
//!
//! # Example
//!
//! ```
//! # #[cfg(not(feature = "loom"))]
//! # {
//! use kgate_ident::{dbj2, resolve};
//!
//! const NT_CLOSE: u32 = dbj2(b"NtClose");
//! assert_eq!(resolve("ntclose"), NT_CLOSE);
//! # }
//! ```

#![no_std]
#![forbid(unsafe_code)]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod constants;
pub mod error;
pub mod hash;
pub mod resolver;
pub mod sink;
pub mod stats;


pub use error::UnknownAlgorithm;
pub use hash::{dbj2, fnv1a, HashAlgorithm};
pub use resolver::IdentifierResolver;
#[cfg(not(feature = "loom"))]
pub use resolver::{reset_state, resolve, resolve_with, shared, stats};
pub use sink::{Collision, CollisionSink, TracingSink};
pub use stats::ResolverStats;
