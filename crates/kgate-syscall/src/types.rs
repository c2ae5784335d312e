//! Request and result types for kernel calls

use alloc::vec::Vec;
use core::fmt;

use crate::REGISTER_ARGS;

// ============================================================================
// Call Request
// ============================================================================

/// A kernel call identifier and its ordered argument words.
///
/// Built once, then consumed by [`Invoker::invoke`](crate::Invoker::invoke).
/// Arity is not bounded here; the trampoline spills everything past the
/// fourth word onto the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRequest {
    identifier: u32,
    args: Vec<usize>,
}

impl CallRequest {
    /// Create a request with no arguments
    pub fn new(identifier: u32) -> Self {
        Self {
            identifier,
            args: Vec::new(),
        }
    }

    /// Create a request from an identifier and an argument list
    pub fn with_args(identifier: u32, args: impl IntoIterator<Item = usize>) -> Self {
        Self {
            identifier,
            args: args.into_iter().collect(),
        }
    }

    /// Append one argument word
    pub fn arg(mut self, word: usize) -> Self {
        self.args.push(word);
        self
    }

    /// Append several argument words, in order
    pub fn args(mut self, words: impl IntoIterator<Item = usize>) -> Self {
        self.args.extend(words);
        self
    }

    /// Kernel call number
    pub fn identifier(&self) -> u32 {
        self.identifier
    }

    /// All argument words, in call order
    pub fn words(&self) -> &[usize] {
        &self.args
    }

    /// Number of argument words
    pub fn argc(&self) -> usize {
        self.args.len()
    }

    /// The words that travel in registers (at most four)
    pub fn register_args(&self) -> &[usize] {
        &self.args[..self.args.len().min(REGISTER_ARGS)]
    }

    /// The words spilled to the stack (empty unless there are more than four)
    pub fn spilled_args(&self) -> &[usize] {
        self.args.get(REGISTER_ARGS..).unwrap_or(&[])
    }

    /// Split into identifier and argument words
    pub fn into_parts(self) -> (u32, Vec<usize>) {
        (self.identifier, self.args)
    }
}

// ============================================================================
// Call Result
// ============================================================================

/// The raw word returned by a kernel transition.
///
/// Opaque on purpose: it may be a status code, a pointer or a count
/// depending on the routine, and only the caller knows which.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CallResult(usize);

impl CallResult {
    /// Wrap a raw result word
    pub const fn from_raw(word: usize) -> Self {
        Self(word)
    }

    /// The raw result word
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl From<CallResult> for usize {
    fn from(result: CallResult) -> Self {
        result.0
    }
}

impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

// ============================================================================
// Tests
// ============================================================================
