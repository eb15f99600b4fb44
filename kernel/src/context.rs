//! The single owning context for all mutable kernel state.
//!
//! Built once in `kernel_main` and passed by mutable reference through
//! the shell loop, the dispatcher, and the modal editor. With exactly
//! one thread of control there is no locking anywhere on this path.

use crate::{
    drivers::{keyboard::Keyboard, vga::Vga},
    fs::FileStore,
    mm::FixedHeap,
    process::ProcessTable,
};

pub struct Context {
    pub vga: Vga,
    pub keyboard: Keyboard,
    pub store: FileStore,
    pub heap: FixedHeap,
    pub processes: ProcessTable,
}

impl Context {
    pub fn new(vga: Vga) -> Self {
        Self {
            vga,
            keyboard: Keyboard::new(),
            store: FileStore::new(),
            heap: FixedHeap::new(),
            processes: ProcessTable::new(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_context() -> Context {
    Context::new(crate::drivers::vga::test_vga())
}
