//! Built-in command dispatch.
//!
//! The first token of a committed line is matched, case-sensitively,
//! against [`BUILTINS`]. Lines containing `>` never reach the table:
//! they take the redirection branch instead.

use core::fmt::Write;

use crate::context::Context;
use crate::drivers::vga::{Color, ColorCode, Vga};
use crate::error::KernelError;
use crate::fs::{FileStore, WriteMode};
use crate::shell::parse::{self, Args};
use crate::shell::{editor, fuzzy};

const TEXT: ColorCode = ColorCode::new(Color::White, Color::Black);
const SUCCESS: ColorCode = ColorCode::new(Color::LightGreen, Color::Black);
const ERROR: ColorCode = ColorCode::new(Color::LightRed, Color::Black);
const INFO: ColorCode = ColorCode::new(Color::Yellow, Color::Black);
const DIM: ColorCode = ColorCode::new(Color::DarkGray, Color::Black);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ls,
    Touch,
    Cat,
    Echo,
    Clear,
    Edit,
    Rm,
    Help,
    Sysinfo,
}

/// Dispatch table. The order doubles as the fuzzy matcher's tie-break
/// order and must stay stable.
pub const BUILTINS: &[(&str, Command)] = &[
    ("ls", Command::Ls),
    ("touch", Command::Touch),
    ("cat", Command::Cat),
    ("echo", Command::Echo),
    ("clear", Command::Clear),
    ("edit", Command::Edit),
    ("rm", Command::Rm),
    ("help", Command::Help),
    ("sysinfo", Command::Sysinfo),
];

/// Execute one committed line. Empty lines are ignored.
pub fn execute_line(line: &str, ctx: &mut Context) {
    if line.contains('>') {
        if let Err(err) = write_redirect(line, &mut ctx.store) {
            ctx.vga.set_color(ERROR);
            let _ = writeln!(ctx.vga, "{err}");
        }
        return;
    }

    let args = parse::split_args(line);
    let Some(word) = args.get(0) else {
        return;
    };

    match BUILTINS.iter().find(|(name, _)| *name == word) {
        Some((_, command)) => run_builtin(*command, &args, ctx),
        None => {
            ctx.vga.print("Unknown: ", ERROR);
            ctx.vga.print(word, ERROR);
            ctx.vga.print("\n", ERROR);
            if let Some(name) = fuzzy::suggest(word) {
                ctx.vga.print("Did you mean: ", INFO);
                ctx.vga.print(name, INFO);
                ctx.vga.print("?\n", INFO);
            }
        }
    }
}

/// The redirection branch: write the quoted (or trailing) payload to the
/// named file. A plain `>` creates the file on miss; `>>` does not.
fn write_redirect(line: &str, store: &mut FileStore) -> Result<(), KernelError> {
    let redirect = parse::find_redirect(line).ok_or(KernelError::MissingArgument {
        usage: "Filename?",
    })?;

    let idx = match store.find(redirect.filename) {
        Some(idx) => idx,
        None if !redirect.append => store.create(redirect.filename)?,
        None => return Err(KernelError::NotFound),
    };

    let mode = if redirect.append {
        WriteMode::Append
    } else {
        WriteMode::Overwrite
    };
    store.write(idx, redirect.payload.as_bytes(), mode);
    Ok(())
}

fn run_builtin(command: Command, args: &Args<'_>, ctx: &mut Context) {
    match command {
        Command::Ls => ls(args, ctx),
        Command::Touch => touch(args, ctx),
        Command::Cat => cat(args, ctx),
        Command::Echo => echo(args, ctx),
        Command::Clear => {
            let color = ctx.vga.color();
            ctx.vga.clear(color);
        }
        Command::Edit => edit(args, ctx),
        Command::Rm => rm(args, ctx),
        Command::Help => help(&mut ctx.vga),
        Command::Sysinfo => sysinfo(ctx),
    }
}

fn ls(args: &Args<'_>, ctx: &mut Context) {
    let show_all = args.get(1) == Some("-a");
    let Context { vga, store, .. } = ctx;
    for file in store.iter() {
        if !show_all && file.is_hidden() {
            continue;
        }
        vga.print(file.name(), TEXT);
        vga.print(" ", TEXT);
        vga.set_color(DIM);
        let _ = write!(vga, "({}B) ", file.size());
    }
    vga.print("\n", TEXT);
}

fn touch(args: &Args<'_>, ctx: &mut Context) {
    let Some(name) = args.get(1) else {
        ctx.vga.print("Name?\n", ERROR);
        return;
    };
    // Touching an existing file leaves it alone; one slot per name.
    if ctx.store.find(name).is_some() {
        ctx.vga.print("OK\n", SUCCESS);
        return;
    }
    match ctx.store.create(name) {
        Ok(_) => ctx.vga.print("OK\n", SUCCESS),
        Err(err) => {
            ctx.vga.set_color(ERROR);
            let _ = writeln!(ctx.vga, "{err}");
        }
    }
}

fn cat(args: &Args<'_>, ctx: &mut Context) {
    let Some(name) = args.get(1) else {
        ctx.vga.print("Filename?\n", ERROR);
        return;
    };
    let Context { vga, store, .. } = ctx;
    match store.find(name) {
        Some(idx) => {
            vga.set_color(TEXT);
            crate::shell::syntax::print_highlighted(vga, store.get(idx).content());
            vga.print("\n", TEXT);
        }
        None => vga.print("404\n", ERROR),
    }
}

fn echo(args: &Args<'_>, ctx: &mut Context) {
    // Every argument is followed by a space, the last one included.
    for arg in args.rest() {
        ctx.vga.print(arg, TEXT);
        ctx.vga.print(" ", TEXT);
    }
    ctx.vga.print("\n", TEXT);
}

fn edit(args: &Args<'_>, ctx: &mut Context) {
    let Some(name) = args.get(1) else {
        ctx.vga.print("Filename?\n", ERROR);
        return;
    };
    let idx = match ctx.store.find(name) {
        Some(idx) => idx,
        None => match ctx.store.create(name) {
            Ok(idx) => idx,
            Err(err) => {
                ctx.vga.set_color(ERROR);
                let _ = writeln!(ctx.vga, "{err}");
                return;
            }
        },
    };
    editor::run(ctx, idx);
}

fn rm(args: &Args<'_>, ctx: &mut Context) {
    let Some(name) = args.get(1) else {
        ctx.vga.print("Usage: rm <filename>\n", ERROR);
        return;
    };
    match ctx.store.find(name) {
        Some(idx) => {
            ctx.store.delete(idx);
            ctx.vga.print("Deleted: ", SUCCESS);
            ctx.vga.print(name, SUCCESS);
            ctx.vga.print("\n", SUCCESS);
        }
        None => {
            ctx.vga.print("Not found: ", ERROR);
            ctx.vga.print(name, ERROR);
            ctx.vga.print("\n", ERROR);
        }
    }
}

fn help(vga: &mut Vga) {
    vga.print("=== HELP ===\n", INFO);
    vga.print("ls [-a]     : List files\n", TEXT);
    vga.print("touch <f>   : Create file\n", TEXT);
    vga.print("cat <f>     : Display file\n", TEXT);
    vga.print("echo <text> : Print text\n", TEXT);
    vga.print("edit <f>    : Edit file\n", TEXT);
    vga.print("rm <f>      : Delete file\n", TEXT);
    vga.print("sysinfo     : System stats\n", TEXT);
    vga.print("clear       : Clear screen\n", TEXT);
    vga.print("help        : Show help\n", TEXT);
    vga.print("=== END HELP ===\n", INFO);
}

fn sysinfo(ctx: &mut Context) {
    let stats = ctx.heap.stats();
    let Context { vga, processes, .. } = ctx;

    vga.print("=== SYSTEM INFO ===\n", INFO);
    mem_line(vga, "Memory Total: ", stats.total, Color::LightRed);
    mem_line(vga, "Memory Used: ", stats.used, Color::LightGreen);
    mem_line(vga, "Memory Free: ", stats.free, Color::Green);
    vga.print("Processes: ", TEXT);
    vga.set_color(ColorCode::new(Color::LightCyan, Color::Black));
    let _ = write!(vga, "{}", processes.count());
    vga.print("\n", TEXT);
    vga.print("=== END INFO ===\n", INFO);
}

fn mem_line(vga: &mut Vga, label: &str, value: usize, value_color: Color) {
    vga.print(label, TEXT);
    vga.set_color(ColorCode::new(value_color, Color::Black));
    let _ = write!(vga, "{value}");
    vga.print(" bytes\n", TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_context;

    #[test]
    fn touch_creates_a_file_and_confirms() {
        let mut ctx = test_context();
        execute_line("touch log.txt", &mut ctx);
        assert!(ctx.store.find("log.txt").is_some());
        assert!(ctx.vga.screen_contains("OK"));
    }

    #[test]
    fn touch_without_a_name_asks_for_one() {
        let mut ctx = test_context();
        execute_line("touch", &mut ctx);
        assert!(ctx.vga.screen_contains("Name?"));
        assert_eq!(ctx.store.used_count(), 0);
    }

    #[test]
    fn touch_twice_keeps_one_slot_and_its_content() {
        let mut ctx = test_context();
        execute_line("echo \"keep\" > a", &mut ctx);
        execute_line("touch a", &mut ctx);
        assert_eq!(ctx.store.used_count(), 1);
        let idx = ctx.store.find("a").unwrap();
        assert_eq!(ctx.store.get(idx).content(), "keep");
    }

    #[test]
    fn touch_reports_full_on_the_ninth_file() {
        let mut ctx = test_context();
        for i in 0..8 {
            let name = format!("f{i}");
            execute_line(&format!("touch {name}"), &mut ctx);
        }
        execute_line("touch extra", &mut ctx);
        assert!(ctx.vga.screen_contains("Full"));
        assert!(ctx.store.find("extra").is_none());
    }

    #[test]
    fn ls_prints_names_with_sizes() {
        let mut ctx = test_context();
        execute_line("touch log.txt", &mut ctx);
        execute_line("ls", &mut ctx);
        assert!(ctx.vga.screen_contains("log.txt (0B)"));
    }

    #[test]
    fn ls_hides_dotfiles_unless_asked() {
        let mut ctx = test_context();
        execute_line("touch .secret", &mut ctx);
        execute_line("touch plain", &mut ctx);
        execute_line("ls", &mut ctx);
        assert!(!ctx.vga.screen_contains(".secret"));
        execute_line("ls -a", &mut ctx);
        assert!(ctx.vga.screen_contains(".secret"));
        assert!(ctx.vga.screen_contains("plain"));
    }

    #[test]
    fn redirect_creates_and_fills_a_file() {
        let mut ctx = test_context();
        execute_line("echo \"hi\" > log.txt", &mut ctx);
        let idx = ctx.store.find("log.txt").unwrap();
        assert_eq!(ctx.store.get(idx).content(), "hi");
        assert_eq!(ctx.store.get(idx).size(), 2);
        execute_line("ls", &mut ctx);
        assert!(ctx.vga.screen_contains("log.txt (2B)"));
    }

    #[test]
    fn append_redirect_accumulates() {
        let mut ctx = test_context();
        execute_line("echo \"ab\" > f", &mut ctx);
        execute_line("echo \"cd\" >> f", &mut ctx);
        let idx = ctx.store.find("f").unwrap();
        assert_eq!(ctx.store.get(idx).content(), "abcd");
    }

    #[test]
    fn append_to_a_missing_file_does_not_create_it() {
        let mut ctx = test_context();
        execute_line("echo \"x\" >> ghost", &mut ctx);
        assert!(ctx.store.find("ghost").is_none());
        assert!(ctx.vga.screen_contains("Not found"));
    }

    #[test]
    fn cat_prints_content_and_404_on_miss() {
        let mut ctx = test_context();
        execute_line("echo \"hello\" > a", &mut ctx);
        execute_line("cat a", &mut ctx);
        assert!(ctx.vga.screen_contains("hello"));
        execute_line("cat nope", &mut ctx);
        assert!(ctx.vga.screen_contains("404"));
    }

    #[test]
    fn echo_prints_each_argument_with_a_trailing_space() {
        let mut ctx = test_context();
        execute_line("echo one two three", &mut ctx);
        assert!(ctx.vga.screen_contains("one two three"));
        // The last argument gets a space too: cell 13 was written in the
        // text color, not left as an untouched blank.
        assert_eq!(ctx.vga.char_at(0, 13), (b' ', TEXT));
    }

    #[test]
    fn rm_deletes_and_reports_either_way() {
        let mut ctx = test_context();
        execute_line("touch gone", &mut ctx);
        execute_line("rm gone", &mut ctx);
        assert!(ctx.vga.screen_contains("Deleted: gone"));
        assert!(ctx.store.find("gone").is_none());
        execute_line("rm gone", &mut ctx);
        assert!(ctx.vga.screen_contains("Not found: gone"));
    }

    #[test]
    fn rm_without_a_name_prints_usage() {
        let mut ctx = test_context();
        execute_line("rm", &mut ctx);
        assert!(ctx.vga.screen_contains("Usage: rm <filename>"));
    }

    #[test]
    fn unknown_command_suggests_a_close_builtin() {
        let mut ctx = test_context();
        execute_line("claer", &mut ctx);
        assert!(ctx.vga.screen_contains("Unknown: claer"));
        assert!(ctx.vga.screen_contains("Did you mean: clear?"));
    }

    #[test]
    fn distant_unknown_command_gets_no_suggestion() {
        let mut ctx = test_context();
        execute_line("xyz123", &mut ctx);
        assert!(ctx.vga.screen_contains("Unknown: xyz123"));
        assert!(!ctx.vga.screen_contains("Did you mean"));
    }

    #[test]
    fn empty_lines_are_ignored() {
        let mut ctx = test_context();
        execute_line("   ", &mut ctx);
        assert_eq!(ctx.vga.cursor().row, 0);
        assert_eq!(ctx.vga.cursor().col, 0);
    }

    #[test]
    fn help_and_sysinfo_print_their_banners() {
        let mut ctx = test_context();
        execute_line("help", &mut ctx);
        assert!(ctx.vga.screen_contains("=== HELP ==="));
        let mut ctx = test_context();
        execute_line("sysinfo", &mut ctx);
        assert!(ctx.vga.screen_contains("=== SYSTEM INFO ==="));
        assert!(ctx.vga.screen_contains("Processes: 0"));
    }

    #[test]
    fn clear_blanks_the_grid_and_homes_the_cursor() {
        let mut ctx = test_context();
        execute_line("echo hi", &mut ctx);
        execute_line("clear", &mut ctx);
        assert_eq!(ctx.vga.row_text(0), "");
        assert_eq!(ctx.vga.cursor().col, 0);
        assert_eq!(ctx.vga.cursor().row, 0);
    }
}
