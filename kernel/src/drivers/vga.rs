//! VGA text-mode console.
//!
//! Owns the visible 80x25 character grid and the cursor; every other
//! component writes through it. Writes are eager and volatile, never
//! buffered, and each one repositions the hardware cursor to match the
//! logical one. Overflow is impossible by construction: writing past
//! column 79 wraps to the next row and writing past row 24 scrolls the
//! grid up by one row.

use core::{fmt, ptr::write_volatile};

/// VGA text-mode color palette. Not every variant is used, but the
/// attribute byte can name any of the sixteen.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// A foreground/background attribute byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> ColorCode {
        ColorCode(((background as u8) << 4) | (foreground as u8))
    }

    /// Background half of the attribute, for callers that recolor the
    /// foreground while keeping the backdrop.
    pub fn background(self) -> Color {
        // SAFETY: the high nibble is always a value written by `new`, so
        // it is one of the sixteen discriminants.
        unsafe { core::mem::transmute(self.0 >> 4) }
    }
}

/// One cell of the grid: a character code plus its color attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    ascii_character: u8,
    color_code: ColorCode,
}

#[cfg(test)]
const BLANK: ScreenChar = ScreenChar {
    ascii_character: b' ',
    color_code: ColorCode::new(Color::Black, Color::Black),
};

pub const BUFFER_HEIGHT: usize = 25;
pub const BUFFER_WIDTH: usize = 80;

/// The memory-mapped character grid.
#[repr(transparent)]
pub struct Buffer {
    chars: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

impl Buffer {
    #[cfg(test)]
    pub(crate) fn blank() -> Self {
        Buffer {
            chars: [[BLANK; BUFFER_WIDTH]; BUFFER_HEIGHT],
        }
    }
}

/// Cursor position, always in bounds after every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
}

/// Handle to the text-mode display.
///
/// Not a global: built once at boot over the buffer at `0xB8000` and
/// threaded through the event loop. Tests build one over an in-memory
/// buffer instead.
pub struct Vga {
    buffer: &'static mut Buffer,
    cursor: Cursor,
    /// Active color used by the `fmt::Write` impl.
    color: ColorCode,
}

impl Vga {
    pub fn new(buffer: &'static mut Buffer) -> Self {
        Self {
            buffer,
            cursor: Cursor { col: 0, row: 0 },
            color: ColorCode::new(Color::White, Color::Black),
        }
    }

    /// Build a handle over the hardware text buffer.
    ///
    /// # Safety
    ///
    /// The caller must be the sole owner of the VGA text buffer for the
    /// lifetime of the kernel; creating two handles would alias the
    /// memory-mapped grid.
    #[cfg(target_arch = "x86_64")]
    pub unsafe fn hardware() -> Self {
        // SAFETY: 0xB8000 is the well-known physical address of the VGA
        // text buffer, identity-mapped by the boot stub. The caller
        // guarantees exclusive ownership.
        Self::new(unsafe { &mut *(0xB8000 as *mut Buffer) })
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Set the active color used by formatted (`write!`) output.
    pub fn set_color(&mut self, color: ColorCode) {
        self.color = color;
    }

    pub fn color(&self) -> ColorCode {
        self.color
    }

    /// Write one glyph at the cursor and advance it.
    ///
    /// Newline moves to column 0 of the next row. Backspace moves the
    /// cursor back one cell and blanks it, wrapping to the last column of
    /// the previous row when at column 0. Any other byte is written and
    /// the cursor advances, wrapping and scrolling as needed.
    pub fn put(&mut self, byte: u8, color: ColorCode) {
        match byte {
            b'\n' => {
                self.cursor.col = 0;
                self.cursor.row += 1;
            }
            0x08 => {
                if self.cursor.col > 0 {
                    self.cursor.col -= 1;
                    self.write_cell(self.cursor.row, self.cursor.col, b' ', color);
                } else if self.cursor.row > 0 {
                    self.cursor.col = BUFFER_WIDTH - 1;
                    self.cursor.row -= 1;
                    self.write_cell(self.cursor.row, self.cursor.col, b' ', color);
                }
            }
            byte => {
                self.write_cell(self.cursor.row, self.cursor.col, byte, color);
                self.cursor.col += 1;
            }
        }

        if self.cursor.col >= BUFFER_WIDTH {
            self.cursor.col = 0;
            self.cursor.row += 1;
        }
        if self.cursor.row >= BUFFER_HEIGHT {
            self.scroll(color);
            self.cursor.row = BUFFER_HEIGHT - 1;
        }
        self.update_hardware_cursor();
    }

    /// Write a string glyph by glyph in one color.
    pub fn print(&mut self, s: &str, color: ColorCode) {
        for byte in s.bytes() {
            self.put(byte, color);
        }
    }

    /// Blank the entire grid in the given color and home the cursor.
    pub fn clear(&mut self, color: ColorCode) {
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row, color);
        }
        self.cursor = Cursor { col: 0, row: 0 };
        self.update_hardware_cursor();
    }

    fn scroll(&mut self, color: ColorCode) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                // SAFETY: Volatile accesses to the text buffer. Row is
                // bounded by BUFFER_HEIGHT (loop range 1..25) and col by
                // BUFFER_WIDTH, so row-1 and col are always in bounds.
                let character = unsafe { core::ptr::read_volatile(&self.buffer.chars[row][col]) };
                // SAFETY: Same bounds as the read above.
                unsafe {
                    write_volatile(&mut self.buffer.chars[row - 1][col], character);
                }
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1, color);
    }

    fn clear_row(&mut self, row: usize, color: ColorCode) {
        for col in 0..BUFFER_WIDTH {
            self.write_cell(row, col, b' ', color);
        }
    }

    fn write_cell(&mut self, row: usize, col: usize, byte: u8, color: ColorCode) {
        // SAFETY: write_volatile to the text buffer; callers pass row/col
        // that the cursor invariant keeps within the 25x80 grid.
        unsafe {
            write_volatile(
                &mut self.buffer.chars[row][col],
                ScreenChar {
                    ascii_character: byte,
                    color_code: color,
                },
            );
        }
    }

    /// Reposition the hardware cursor indicator to the logical cursor via
    /// the CRT controller index/data ports.
    fn update_hardware_cursor(&mut self) {
        #[cfg(all(target_arch = "x86_64", not(test)))]
        {
            use x86_64::instructions::port::Port;

            let pos = (self.cursor.row * BUFFER_WIDTH + self.cursor.col) as u16;
            let mut index: Port<u8> = Port::new(0x3D4);
            let mut data: Port<u8> = Port::new(0x3D5);
            // SAFETY: Writing the CRTC cursor-location registers (0x0E/0x0F)
            // through the standard index/data port pair only moves the
            // blinking cursor; it has no memory effects.
            unsafe {
                index.write(0x0Fu8);
                data.write((pos & 0xFF) as u8);
                index.write(0x0Eu8);
                data.write((pos >> 8) as u8);
            }
        }
    }
}

impl fmt::Write for Vga {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let color = self.color;
        self.print(s, color);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_vga() -> Vga {
    Vga::new(Box::leak(Box::new(Buffer::blank())))
}

#[cfg(test)]
impl Vga {
    /// Text content of one row, trailing blanks trimmed.
    pub(crate) fn row_text(&self, row: usize) -> String {
        let mut s: String = self.buffer.chars[row]
            .iter()
            .map(|c| c.ascii_character as char)
            .collect();
        while s.ends_with(' ') {
            s.pop();
        }
        s
    }

    /// Whether any row of the grid contains `needle`.
    pub(crate) fn screen_contains(&self, needle: &str) -> bool {
        (0..BUFFER_HEIGHT).any(|row| self.row_text(row).contains(needle))
    }

    pub(crate) fn char_at(&self, row: usize, col: usize) -> (u8, ColorCode) {
        let cell = self.buffer.chars[row][col];
        (cell.ascii_character, cell.color_code)
    }
}
