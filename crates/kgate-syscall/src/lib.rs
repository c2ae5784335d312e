//! Typed kernel call layer for kgate
//!
//! This crate wraps the raw trampoline from `kgate-unsafe-primitives` in
//! owned request/result types and an [`Invoker`] trait, so an orchestration
//! layer can build calls from resolved identifiers and swap the native
//! invoker for a mock in tests.
//!
//! Nothing here interprets identifiers, argument words or results. A
//! [`CallResult`] is exactly the word the kernel returned.
//!
//! # Example
//!
//! ```ignore
//! use kgate_syscall::{invoke, DirectInvoker};
//!
//! // SAFETY: `nt_close` is the running kernel's identifier for the routine
//! // and `handle` is a handle owned by this process.
//! let status = unsafe { invoke!(DirectInvoker, nt_close, handle) };
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
extern crate alloc;

pub mod invoker;
pub mod types;

pub use invoker::Invoker;
#[cfg(target_arch = "x86_64")]
pub use invoker::DirectInvoker;
pub use types::{CallRequest, CallResult};

pub use kgate_unsafe_primitives::REGISTER_ARGS;

/// Build a [`CallRequest`] from an identifier and argument expressions and
/// hand it to an [`Invoker`].
///
/// Each argument is converted with `as usize`. The expansion calls an
/// `unsafe fn`, so the macro must be used inside an `unsafe` block.
///
/// ```ignore
/// let result = unsafe { invoke!(invoker, 0x18, process, base_ptr, 0, size_ptr, 0x3000, 0x04) };
/// ```
#[macro_export]
macro_rules! invoke {
    ($invoker:expr, $identifier:expr $(, $arg:expr)* $(,)?) => {
        $crate::Invoker::invoke(
            &$invoker,
            $crate::CallRequest::new($identifier)$(.arg($arg as usize))*,
        )
    };
}
