//! Variable-arity kernel trampoline
//!
//! Issues a single `syscall` with an arbitrary number of argument words,
//! laid out the way the x86-64 Windows kernel reads them:
//!
//! | Slot | Location at the transition |
//! |------|----------------------------|
//! | identifier | `eax` |
//! | argument 0 | `r10` (the transition overwrites `rcx`) |
//! | argument 1 | `rdx` |
//! | argument 2 | `r8` |
//! | argument 3 | `r9` |
//! | argument 4.. | `[rsp + 0x28 + 8 * (i - 4)]` |
//!
//! The result comes back in `rax` and is returned untouched.
//!
//! # Safety Design
//!
//! The raw transition lives in one naked function. It never writes to the
//! caller's frame: the spill words are copied into a private frame built
//! below the entry stack pointer, and the two non-volatile registers used by
//! the block copy (`rsi`, `rdi`) are parked in the caller-provided home slots
//! and restored before returning.
//!
//! # Usage
//!
//! ```ignore
//! // SAFETY: identifier and arguments are valid for the running kernel.
//! let status = unsafe { trampoline::invoke(identifier, &[handle, 0, len]) };
//! ```

use core::arch::naked_asm;

use crate::REGISTER_ARGS;

/// Offset from the transition stack pointer to the fifth argument.
///
/// Return-address slot (8 bytes) followed by the 32-byte home area.
pub const SPILL_OFFSET: usize = 0x28;

/// Signature shared by every trampoline built from the template.
///
/// `registers` always points at four words (zero-filled past the argument
/// count). `spill_len` is signed; non-positive counts skip the copy.
type Trampoline = unsafe extern "win64" fn(
    identifier: u32,
    registers: *const [usize; REGISTER_ARGS],
    spill: *const usize,
    spill_len: isize,
) -> usize;

// ============================================================================
// Trampoline Template
// ============================================================================

/// Builds a naked trampoline around the given transition instruction(s).
///
/// Entry (win64): `rcx` = identifier, `rdx` = register block,
/// `r8` = spill source, `r9` = spill count.
macro_rules! kernel_trampoline {
    ($(#[$meta:meta])* $vis:vis fn $name:ident => $transition:literal $(, $($operand:tt)+)?) => {
        $(#[$meta])*
        #[unsafe(naked)]
        $vis unsafe extern "win64" fn $name(
            identifier: u32,
            registers: *const [usize; REGISTER_ARGS],
            spill: *const usize,
            spill_len: isize,
        ) -> usize {
            naked_asm!(
                // Park rsi/rdi in the caller's home slots.
                "mov [rsp + 0x08], rsi",
                "mov [rsp + 0x10], rdi",
                "mov eax, ecx",
                "xor ecx, ecx",
                "test r9, r9",
                "cmovg rcx, r9",
                // Private frame below the entry rsp. rsp = 8 (mod 16) at the
                // transition, matching what a stub sees on entry.
                "mov r11, rsp",
                "lea rsi, [rcx * 8 + {frame}]",
                "sub rsp, rsi",
                "and rsp, -16",
                "sub rsp, 8",
                "mov [rsp], r11",
                "test rcx, rcx",
                "jz 2f",
                "mov rsi, r8",
                "lea rdi, [rsp + {spill}]",
                "rep movsq",
                "2:",
                "mov r10, [rdx]",
                "mov r8, [rdx + 0x10]",
                "mov r9, [rdx + 0x18]",
                "mov rdx, [rdx + 0x08]",
                $transition,
                "mov rsp, [rsp]",
                "mov rsi, [rsp + 0x08]",
                "mov rdi, [rsp + 0x10]",
                "ret",
                frame = const SPILL_OFFSET + 8,
                spill = const SPILL_OFFSET,
                $($($operand)+)?
            )
        }
    };
}

kernel_trampoline! {
    /// The privileged transition.
    fn kernel_transition => "syscall"
}

// ============================================================================
// Entry Point
// ============================================================================

/// Perform one kernel transition carrying `args`.
///
/// The first four words travel in registers, the rest are spilled to the
/// stack slots the kernel reads. Zero arguments is valid. The returned word
/// is whatever the kernel left in `rax`.
///
/// # Safety
///
/// - `identifier` must name a routine of the running kernel, and `args` must
///   satisfy that routine's contract (pointer arguments valid for the
///   accesses the kernel performs, and so on). Nothing is validated here.
/// - The spill area must fit in the committed part of the current stack.
///   There is no stack probing, so keep `args` to a few hundred words.
pub unsafe fn invoke(identifier: u32, args: &[usize]) -> usize {
    // SAFETY: forwarded from this function's contract.
    unsafe { marshal(kernel_transition, identifier, args) }
}

/// Split `args` into the register block and the spill slice and enter `trampoline`.
///
/// # Safety
///
/// Same contract as [`invoke`] for whatever `trampoline` transitions into.
#[inline]
unsafe fn marshal(trampoline: Trampoline, identifier: u32, args: &[usize]) -> usize {
    let (head, spill) = args.split_at(args.len().min(REGISTER_ARGS));
    let mut registers = [0usize; REGISTER_ARGS];
    registers[..head.len()].copy_from_slice(head);

    // SAFETY: `registers` and `spill` outlive the call, and `spill.len()` is
    // the exact element count so the block copy stays inside the slice.
    unsafe { trampoline(identifier, &registers, spill.as_ptr(), spill.len() as isize) }
}

// ============================================================================
// Tests
// ============================================================================
