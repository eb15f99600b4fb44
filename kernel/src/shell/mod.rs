//! Interactive shell: prompt, line editing, and command dispatch.

pub mod commands;
pub mod editor;
pub mod fuzzy;
pub mod line;
pub mod parse;
pub mod syntax;

use crate::context::Context;
use crate::drivers::vga::{Color, ColorCode};
use line::LineBuffer;

const PROMPT_COLOR: ColorCode = ColorCode::new(Color::LightGreen, Color::Black);
const ECHO_COLOR: ColorCode = ColorCode::new(Color::White, Color::Black);
const BANNER_COLOR: ColorCode = ColorCode::new(Color::Yellow, Color::Black);
const HINT_COLOR: ColorCode = ColorCode::new(Color::LightGray, Color::Black);
const SHELL_COLOR: ColorCode = ColorCode::new(Color::LightCyan, Color::Black);

pub struct Shell {
    input: LineBuffer,
}

impl Shell {
    pub const fn new() -> Self {
        Self {
            input: LineBuffer::new(),
        }
    }

    /// Print the boot banner and the first prompt.
    pub fn banner(&self, ctx: &mut Context) {
        let vga = &mut ctx.vga;
        vga.set_color(SHELL_COLOR);
        vga.print(
            concat!("MicroOS v", env!("CARGO_PKG_VERSION"), "\n"),
            BANNER_COLOR,
        );
        vga.print(
            "Commands: ls [-a], touch, echo, cat, clear, edit, rm, help, sysinfo\n",
            HINT_COLOR,
        );
        vga.print("$ ", PROMPT_COLOR);
    }

    /// Run the shell forever: poll, decode, edit, dispatch.
    pub fn run(&mut self, ctx: &mut Context) -> ! {
        loop {
            if let Some(byte) = ctx.keyboard.poll() {
                self.handle_byte(byte, ctx);
            }
        }
    }

    /// Feed one decoded byte through the line editor.
    pub fn handle_byte(&mut self, byte: u8, ctx: &mut Context) {
        match byte {
            b'\n' => {
                ctx.vga.print("\n", ECHO_COLOR);
                // Snapshot the line so dispatch can borrow it while the
                // live buffer resets for the next prompt.
                let committed = self.input;
                self.input.clear();
                commands::execute_line(committed.as_str(), ctx);
                ctx.vga.set_color(SHELL_COLOR);
                ctx.vga.print("$ ", PROMPT_COLOR);
            }
            0x08 => {
                if self.input.backspace() {
                    ctx.vga.put(0x08, ECHO_COLOR);
                }
            }
            _ => {
                // Echo only what the buffer kept; dropped keystrokes
                // leave the screen untouched too.
                if self.input.push(byte) {
                    ctx.vga.put(byte, ECHO_COLOR);
                }
            }
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_context;

    fn type_line(shell: &mut Shell, ctx: &mut Context, text: &str) {
        for byte in text.bytes() {
            shell.handle_byte(byte, ctx);
        }
        shell.handle_byte(b'\n', ctx);
    }

    #[test]
    fn typed_characters_echo_and_commit_on_enter() {
        let mut ctx = test_context();
        let mut shell = Shell::new();
        type_line(&mut shell, &mut ctx, "touch a.txt");
        assert!(ctx.vga.screen_contains("touch a.txt"));
        assert!(ctx.store.find("a.txt").is_some());
        assert!(shell.input.is_empty());
    }

    #[test]
    fn backspace_fixes_a_typo_before_commit() {
        let mut ctx = test_context();
        let mut shell = Shell::new();
        for byte in b"touch xz" {
            shell.handle_byte(*byte, &mut ctx);
        }
        shell.handle_byte(0x08, &mut ctx);
        shell.handle_byte(b'y', &mut ctx);
        shell.handle_byte(b'\n', &mut ctx);
        assert!(ctx.store.find("xy").is_some());
        assert!(ctx.store.find("xz").is_none());
    }

    #[test]
    fn overlong_input_is_dropped_not_wrapped() {
        let mut ctx = test_context();
        let mut shell = Shell::new();
        for _ in 0..200 {
            shell.handle_byte(b'a', &mut ctx);
        }
        assert_eq!(shell.input.len(), line::LINE_CAP);
    }

    #[test]
    fn clear_as_the_first_command_blanks_in_the_shell_color() {
        let mut ctx = test_context();
        let mut shell = Shell::new();
        // The active color a first-command `clear` reads is established
        // by the banner; the per-prompt reset has not run yet.
        shell.banner(&mut ctx);
        type_line(&mut shell, &mut ctx, "clear");
        assert_eq!(ctx.vga.char_at(5, 5), (b' ', SHELL_COLOR));
    }

    #[test]
    fn prompt_reappears_after_each_command() {
        let mut ctx = test_context();
        let mut shell = Shell::new();
        type_line(&mut shell, &mut ctx, "echo hi");
        let row = ctx.vga.cursor().row;
        assert_eq!(ctx.vga.row_text(row), "$");
    }
}
