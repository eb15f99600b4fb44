//! MicroOS kernel library.
//!
//! A small polling kernel built around one interactive subsystem: a
//! text-mode console ([`drivers::vga`]), a scan-code keyboard decoder
//! ([`drivers::keyboard`]), a fixed-capacity in-memory file store
//! ([`fs`]), and a line shell with built-in commands, a modal content
//! editor, and fuzzy command suggestions ([`shell`]).
//!
//! There is exactly one thread of control. All mutable kernel state lives
//! in a [`Context`] created once at boot and threaded by reference through
//! the event loop; there are no module-level singletons apart from the
//! serial logger. The only blocking points are the keyboard status poll
//! and the post-key debounce spin.
//!
//! The library also builds for the host so the pure logic (parsing, file
//! store, edit distance, highlighting) runs under `cargo test`.

#![cfg_attr(not(test), no_std)]

pub mod serial;

pub mod context;
pub mod drivers;
pub mod error;
pub mod fs;
pub mod logger;
pub mod mm;
pub mod process;
pub mod shell;

pub use context::Context;
pub use error::KernelError;
