//! Fixed-capacity in-memory file table.
//!
//! Eight slots scanned linearly, each holding a name of up to 11 bytes
//! and up to 63 content bytes. Deleted slots are reused first-free, so
//! listing order is table order, not creation order. Writes that would
//! exceed the content capacity silently keep the prefix that fits; that
//! truncation is contract behavior, not an error. All files are volatile
//! and lost on restart.

use crate::error::KernelError;

/// Number of slots in the table.
pub const SLOT_COUNT: usize = 8;

/// Maximum stored name length in bytes; longer names are truncated on
/// create.
pub const NAME_MAX: usize = 11;

/// Content buffer capacity per slot.
const CONTENT_CAP: usize = 64;

/// Maximum stored content size in bytes.
pub const CONTENT_MAX: usize = CONTENT_CAP - 1;

/// Whether a write replaces the current content or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

/// One fixed-capacity entry of the table.
#[derive(Debug, Clone, Copy)]
pub struct FileSlot {
    used: bool,
    name: [u8; NAME_MAX],
    name_len: usize,
    content: [u8; CONTENT_CAP],
    size: usize,
}

const EMPTY_SLOT: FileSlot = FileSlot {
    used: false,
    name: [0; NAME_MAX],
    name_len: 0,
    content: [0; CONTENT_CAP],
    size: 0,
};

impl FileSlot {
    pub fn name(&self) -> &str {
        core::str::from_utf8(&self.name[..self.name_len]).unwrap_or("")
    }

    pub fn content(&self) -> &str {
        core::str::from_utf8(&self.content[..self.size]).unwrap_or("")
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Dot-prefixed names are suppressed by a plain `ls`.
    pub fn is_hidden(&self) -> bool {
        self.name.first() == Some(&b'.') && self.name_len > 0
    }
}

/// The file table. Owned by the boot context and mutated in place; safe
/// because there is exactly one thread of control.
pub struct FileStore {
    slots: [FileSlot; SLOT_COUNT],
}

impl FileStore {
    pub const fn new() -> Self {
        Self {
            slots: [EMPTY_SLOT; SLOT_COUNT],
        }
    }

    /// Index of the first used slot with this exact name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.used && slot.name() == name)
    }

    /// Claim the first free slot for an empty file with this name.
    ///
    /// The name is truncated to [`NAME_MAX`] bytes. Callers keep the
    /// at-most-one-slot-per-name invariant by calling [`find`] first.
    ///
    /// [`find`]: FileStore::find
    pub fn create(&mut self, name: &str) -> Result<usize, KernelError> {
        let idx = self
            .slots
            .iter()
            .position(|slot| !slot.used)
            .ok_or(KernelError::StoreFull)?;

        let slot = &mut self.slots[idx];
        *slot = EMPTY_SLOT;
        slot.used = true;
        let n = name.len().min(NAME_MAX);
        slot.name[..n].copy_from_slice(&name.as_bytes()[..n]);
        slot.name_len = n;
        log::debug!("fs: created '{}' in slot {}", slot.name(), idx);
        Ok(idx)
    }

    /// Copy bytes into a slot, returning how many were stored.
    ///
    /// Overwrite resets the size to zero first; append starts at the
    /// current size. Both stop at [`CONTENT_MAX`] bytes.
    pub fn write(&mut self, idx: usize, bytes: &[u8], mode: WriteMode) -> usize {
        let slot = &mut self.slots[idx];
        let start = match mode {
            WriteMode::Overwrite => 0,
            WriteMode::Append => slot.size,
        };
        let n = bytes.len().min(CONTENT_MAX - start);
        slot.content[start..start + n].copy_from_slice(&bytes[..n]);
        slot.size = start + n;
        log::debug!("fs: wrote {} bytes to slot {} ({:?})", n, idx, mode);
        n
    }

    /// Release a slot: clears the used flag, size, and content.
    pub fn delete(&mut self, idx: usize) {
        self.slots[idx] = EMPTY_SLOT;
        log::debug!("fs: freed slot {}", idx);
    }

    pub fn get(&self, idx: usize) -> &FileSlot {
        &self.slots[idx]
    }

    /// Used slots in table order.
    pub fn iter(&self) -> impl Iterator<Item = &FileSlot> {
        self.slots.iter().filter(|slot| slot.used)
    }

    /// Number of used slots, reported by `sysinfo`.
    pub fn used_count(&self) -> usize {
        self.iter().count()
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_write_find_round_trip() {
        let mut store = FileStore::new();
        let idx = store.create("a").unwrap();
        store.write(idx, b"hi", WriteMode::Overwrite);

        let found = store.find("a").unwrap();
        assert_eq!(found, idx);
        assert_eq!(store.get(found).content(), "hi");
        assert_eq!(store.get(found).size(), 2);
    }

    #[test]
    fn append_accumulates_without_resetting() {
        let mut store = FileStore::new();
        let idx = store.create("f").unwrap();
        store.write(idx, b"ab", WriteMode::Append);
        store.write(idx, b"cd", WriteMode::Append);
        assert_eq!(store.get(idx).content(), "abcd");
        assert_eq!(store.get(idx).size(), 4);
    }

    #[test]
    fn overwrite_truncates_prior_content() {
        let mut store = FileStore::new();
        let idx = store.create("f").unwrap();
        store.write(idx, b"a long first payload", WriteMode::Overwrite);
        store.write(idx, b"x", WriteMode::Overwrite);
        assert_eq!(store.get(idx).content(), "x");
        assert_eq!(store.get(idx).size(), 1);
    }

    #[test]
    fn writes_stop_exactly_at_the_capacity_boundary() {
        let mut store = FileStore::new();
        let idx = store.create("big").unwrap();
        let stored = store.write(idx, &[b'a'; 100], WriteMode::Overwrite);
        assert_eq!(stored, CONTENT_MAX);
        assert_eq!(store.get(idx).size(), CONTENT_MAX);

        // An append at the boundary stores nothing further.
        assert_eq!(store.write(idx, b"zz", WriteMode::Append), 0);
        assert_eq!(store.get(idx).size(), CONTENT_MAX);
    }

    #[test]
    fn append_past_the_boundary_keeps_only_the_prefix() {
        let mut store = FileStore::new();
        let idx = store.create("f").unwrap();
        store.write(idx, &[b'a'; 60], WriteMode::Overwrite);
        let stored = store.write(idx, b"bbbbbb", WriteMode::Append);
        assert_eq!(stored, 3);
        assert_eq!(store.get(idx).size(), CONTENT_MAX);
        assert!(store.get(idx).content().ends_with("bbb"));
    }

    #[test]
    fn create_fails_when_all_slots_are_used() {
        let mut store = FileStore::new();
        for i in 0..SLOT_COUNT {
            assert!(store.create("x").is_ok(), "slot {} should be free", i);
        }
        assert_eq!(store.create("y"), Err(KernelError::StoreFull));
    }

    #[test]
    fn delete_frees_the_slot_for_reuse() {
        let mut store = FileStore::new();
        for _ in 0..SLOT_COUNT {
            store.create("x").unwrap();
        }
        let idx = store.find("x").unwrap();
        store.delete(idx);
        assert_eq!(store.used_count(), SLOT_COUNT - 1);

        let reused = store.create("fresh").unwrap();
        assert_eq!(reused, idx);
        assert_eq!(store.get(reused).size(), 0);
    }

    #[test]
    fn long_names_are_truncated_to_name_max() {
        let mut store = FileStore::new();
        let idx = store.create("a-very-long-filename.txt").unwrap();
        assert_eq!(store.get(idx).name().len(), NAME_MAX);
        assert_eq!(store.get(idx).name(), "a-very-long");
    }

    #[test]
    fn hidden_files_are_flagged() {
        let mut store = FileStore::new();
        let dot = store.create(".config").unwrap();
        let plain = store.create("notes").unwrap();
        assert!(store.get(dot).is_hidden());
        assert!(!store.get(plain).is_hidden());
    }

    #[test]
    fn iteration_is_in_table_order() {
        let mut store = FileStore::new();
        store.create("one").unwrap();
        let two = store.create("two").unwrap();
        store.create("three").unwrap();
        store.delete(two);
        store.create("reused").unwrap();

        let names: Vec<&str> = store.iter().map(|slot| slot.name()).collect();
        assert_eq!(names, ["one", "reused", "three"]);
    }
}
