//! Fixed-capacity input line buffer.

/// Input line capacity in bytes. Keystrokes beyond this are dropped
/// silently; the line is never reallocated.
pub const LINE_CAP: usize = 128;

/// The shell's current input line. `Copy` so the outer loop can snapshot
/// a committed line, reset the buffer, and dispatch the snapshot.
#[derive(Clone, Copy)]
pub struct LineBuffer {
    bytes: [u8; LINE_CAP],
    len: usize,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; LINE_CAP],
            len: 0,
        }
    }

    /// Append one byte. Returns false (and drops the byte) at capacity,
    /// so the caller knows whether to echo it.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len < LINE_CAP {
            self.bytes[self.len] = byte;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Drop the last byte. Returns false on an empty line so the caller
    /// knows whether to erase a glyph.
    pub fn backspace(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
