//! Invoker trait and the native implementation
//!
//! The [`Invoker`] trait is the seam between call construction and the
//! kernel transition. [`DirectInvoker`] performs the real transition; tests
//! and dry-run tooling provide their own implementations.

use crate::types::{CallRequest, CallResult};

/// Something that can carry a [`CallRequest`] into the kernel.
pub trait Invoker {
    /// Perform the call and return the raw result word.
    ///
    /// # Safety
    ///
    /// For implementations that reach a real kernel, the request's
    /// identifier must name a routine of the running kernel and its argument
    /// words must satisfy that routine's contract. Nothing is validated.
    unsafe fn invoke(&self, request: CallRequest) -> CallResult;
}

impl<I: Invoker + ?Sized> Invoker for &I {
    unsafe fn invoke(&self, request: CallRequest) -> CallResult {
        // SAFETY: forwarded from the caller's contract.
        unsafe { (**self).invoke(request) }
    }
}

/// Native invoker: one `syscall` per request through the trampoline.
#[cfg(target_arch = "x86_64")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectInvoker;

#[cfg(target_arch = "x86_64")]
impl Invoker for DirectInvoker {
    unsafe fn invoke(&self, request: CallRequest) -> CallResult {
        tracing::trace!(
            identifier = request.identifier(),
            argc = request.argc(),
            "kernel transition"
        );
        // SAFETY: forwarded from the caller's contract.
        let word =
            unsafe { kgate_unsafe_primitives::invoke(request.identifier(), request.words()) };
        CallResult::from_raw(word)
    }
}
