//! Kernel error types.
//!
//! Every error in this kernel is recoverable: the dispatcher prints a
//! user-facing message and control returns to the prompt. Capacity
//! truncation is deliberately not represented here; writes past a fixed
//! buffer silently keep the prefix that fits, which is contract behavior
//! of the file store and line editor, not a fault.

use core::fmt;

/// Main kernel error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// A file name lookup missed.
    NotFound,

    /// No free slot is left in the file store.
    StoreFull,

    /// A command required an argument that was not supplied. The payload
    /// is the exact prompt shown to the user.
    MissingArgument { usage: &'static str },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Not found"),
            KernelError::StoreFull => write!(f, "Full"),
            KernelError::MissingArgument { usage } => write!(f, "{}", usage),
        }
    }
}
