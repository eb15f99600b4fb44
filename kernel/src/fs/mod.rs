//! In-memory filesystem.

pub mod store;

pub use store::{FileSlot, FileStore, WriteMode, CONTENT_MAX, NAME_MAX, SLOT_COUNT};
