//! Modal content editor.
//!
//! Entering the editor takes over the whole grid and the keyboard until
//! the escape key commits the working copy back to the file store. The
//! shell prompt does not run while the editor is active.

use crate::context::Context;
use crate::drivers::keyboard::{debounce, SCANCODE_ESC};
use crate::drivers::vga::{Color, ColorCode};
use crate::fs::{WriteMode, CONTENT_MAX};
use crate::shell::syntax;

const EDITOR_COLOR: ColorCode = ColorCode::new(Color::White, Color::Blue);

/// Working copy of the file being edited. Edits apply here; the store is
/// only touched on commit.
struct EditBuffer {
    bytes: [u8; CONTENT_MAX + 1],
    len: usize,
}

impl EditBuffer {
    fn load(content: &[u8]) -> Self {
        let mut buf = Self {
            bytes: [0; CONTENT_MAX + 1],
            len: content.len().min(CONTENT_MAX),
        };
        buf.bytes[..buf.len].copy_from_slice(&content[..buf.len]);
        buf
    }

    /// Apply one decoded key. Backspace deletes the last byte; anything
    /// else (newline included) appends while under capacity.
    fn apply(&mut self, byte: u8) {
        match byte {
            0x08 => {
                if self.len > 0 {
                    self.len -= 1;
                }
            }
            _ => {
                if self.len < CONTENT_MAX {
                    self.bytes[self.len] = byte;
                    self.len += 1;
                }
            }
        }
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }
}

/// Run the editor over the file in `slot` until the escape key, then
/// commit the working copy and return to the shell.
pub fn run(ctx: &mut Context, slot: usize) {
    let mut buf = EditBuffer::load(ctx.store.get(slot).content().as_bytes());

    redraw(ctx, slot, &buf);

    loop {
        let Some(scancode) = ctx.keyboard.poll_scancode() else {
            continue;
        };
        if scancode == SCANCODE_ESC {
            break;
        }
        if let Some(byte) = ctx.keyboard.decode(scancode) {
            debounce();
            buf.apply(byte);
            redraw(ctx, slot, &buf);
        }
    }

    ctx.store.write(slot, &buf.bytes[..buf.len], WriteMode::Overwrite);
    ctx.vga.clear(ColorCode::new(Color::White, Color::Black));
    ctx.vga
        .print("Saved.\n", ColorCode::new(Color::LightGreen, Color::Black));
}

/// Full repaint: clear, header, highlighted content. No incremental
/// updates, every edit redraws the grid.
fn redraw(ctx: &mut Context, slot: usize, buf: &EditBuffer) {
    let Context { vga, store, .. } = ctx;
    vga.clear(EDITOR_COLOR);
    vga.print(
        "EDITING (ESC to Save): ",
        ColorCode::new(Color::Yellow, Color::Blue),
    );
    vga.print(store.get(slot).name(), EDITOR_COLOR);
    vga.print("\n\n", EDITOR_COLOR);
    vga.set_color(EDITOR_COLOR);
    syntax::print_highlighted(vga, buf.as_str());
}
