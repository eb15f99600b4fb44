//! Hardware drivers: the text-mode display and the PS/2 keyboard.

pub mod keyboard;
pub mod vga;
