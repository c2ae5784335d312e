//! Collision diagnostics
//!
//! A collision is two different names producing the same identifier. It is
//! reported and then ignored: both names keep resolving to that identifier.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A detected identifier collision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    identifier: u32,
    existing: Vec<u8>,
    incoming: Vec<u8>,
}

impl Collision {
    pub(crate) fn new(identifier: u32, existing: &[u8], incoming: &[u8]) -> Self {
        Self {
            identifier,
            existing: existing.to_vec(),
            incoming: incoming.to_vec(),
        }
    }

    /// The shared identifier
    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    /// The name first registered for the identifier
    pub fn existing(&self) -> &[u8] {
        &self.existing
    }

    /// The name that collided with it
    pub fn incoming(&self) -> &[u8] {
        &self.incoming
    }

    /// [`existing`](Self::existing), lossily decoded for display
    pub fn existing_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.existing)
    }

    /// [`incoming`](Self::incoming), lossily decoded for display
    pub fn incoming_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.incoming)
    }
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "identifier {:#010x}: existing {:?}, new {:?}",
            self.identifier,
            self.existing_lossy(),
            self.incoming_lossy()
        )
    }
}

/// Receives collision reports.
///
/// Called with no resolver lock held, so an implementation may resolve
/// names itself.
pub trait CollisionSink: Send + Sync {
    /// Record one collision. Must not panic.
    fn report(&self, collision: &Collision);
}

/// Default sink: one `warn` event per collision on target
/// `kgate_ident::collision`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl CollisionSink for TracingSink {
    fn report(&self, collision: &Collision) {
        tracing::warn!(
            target: "kgate_ident::collision",
            identifier = format_args!("{:#010x}", collision.identifier()),
            existing = %collision.existing_lossy(),
            incoming = %collision.incoming_lossy(),
            "hash collision detected"
        );
    }
}

impl<S: CollisionSink + ?Sized> CollisionSink for &S {
    fn report(&self, collision: &Collision) {
        (**self).report(collision)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use tracing_test::traced_test;

    #[test]
    fn test_collision_accessors() {
        let collision = Collision::new(0x0059_70C6, b"0Q", b"10");
        assert_eq!(collision.identifier(), 0x0059_70C6);
        assert_eq!(collision.existing(), b"0Q");
        assert_eq!(collision.incoming(), b"10");
    }

    #[test]
    fn test_collision_display_is_lossy() {
        let collision = Collision::new(1, b"ok", &[0x66, 0xFF]);
        assert_eq!(
            format!("{}", collision),
            "identifier 0x00000001: existing \"ok\", new \"f\u{FFFD}\""
        );
    }

    #[test]
    #[traced_test]
    fn test_tracing_sink_emits_warning() {
        TracingSink.report(&Collision::new(0x0059_70C6, b"0Q", b"10"));
        assert!(logs_contain("hash collision detected"));
        assert!(logs_contain("0x005970c6"));
        assert!(logs_contain("existing=0Q"));
        assert!(logs_contain("incoming=10"));
    }
}
