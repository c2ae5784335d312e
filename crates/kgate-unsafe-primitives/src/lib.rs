//! kgate Unsafe Primitives - Consolidated Unsafe Code TCB
//!
//! This crate contains ALL raw register and stack manipulation in kgate,
//! consolidated into a single auditable location. The other crates use
//! `#![forbid(unsafe_code)]` or only forward an `unsafe fn` contract here.
//!
//! # Design Principles
//!
//! 1. **Minimal unsafe surface**: one trampoline, one entry point
//! 2. **No validation**: identifiers and argument words are passed through as-is
//! 3. **Auditable**: the whole kernel transition is a single naked function
//!
//! # Module Organization
//!
//! - `trampoline` - Variable-arity kernel transition for the x86-64 Windows
//!   kernel call convention
//!
//! # Target Support
//!
//! The trampoline is built on every x86-64 target (the `win64` ABI is
//! available on all of them). Other architectures get an empty crate.

#![no_std]

#[cfg(test)]
extern crate std;

#[cfg(target_arch = "x86_64")]
pub mod trampoline;

#[cfg(target_arch = "x86_64")]
pub use trampoline::{invoke, SPILL_OFFSET};

/// Number of arguments the kernel call convention passes in registers.
///
/// Arguments past this count are spilled to the stack.
pub const REGISTER_ARGS: usize = 4;
