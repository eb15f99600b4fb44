//! Command line tokenizer and redirection scan.
//!
//! A committed line takes exactly one of two parse paths: lines containing
//! `>` go through [`find_redirect`] and never reach the argument splitter,
//! everything else goes through [`split_args`].

/// Maximum number of whitespace-delimited arguments kept per line.
pub const ARG_MAX: usize = 8;

/// Whitespace-split arguments, in order of appearance. Borrows the line.
pub struct Args<'a> {
    items: [&'a str; ARG_MAX],
    count: usize,
}

impl<'a> Args<'a> {
    pub fn get(&self, index: usize) -> Option<&'a str> {
        if index < self.count {
            Some(self.items[index])
        } else {
            None
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Arguments after the command word.
    pub fn rest(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.items[..self.count].iter().skip(1).copied()
    }
}

/// Split a line into at most [`ARG_MAX`] space-delimited tokens. Excess
/// tokens are dropped.
pub fn split_args(line: &str) -> Args<'_> {
    let mut args = Args {
        items: [""; ARG_MAX],
        count: 0,
    };
    for token in line.split_ascii_whitespace() {
        if args.count == ARG_MAX {
            break;
        }
        args.items[args.count] = token;
        args.count += 1;
    }
    args
}

/// A parsed redirection: `echo "payload" > file` or `>> file`.
#[derive(Debug, PartialEq, Eq)]
pub struct Redirect<'a> {
    pub append: bool,
    pub filename: &'a str,
    pub payload: &'a str,
}

/// Scan a raw line for its first `>` and extract the redirection parts.
///
/// The payload is the text between the first pair of double quotes before
/// the operator; on a quoteless line it is the substring from just after
/// the command word up to the operator, trimmed. Returns `None` when the
/// line has no `>` or no filename follows the operator.
pub fn find_redirect(line: &str) -> Option<Redirect<'_>> {
    let op = line.find('>')?;
    let append = line.as_bytes().get(op + 1) == Some(&b'>');
    let after_op = &line[op + if append { 2 } else { 1 }..];
    let filename = after_op.split_ascii_whitespace().next()?;

    let before_op = &line[..op];
    let payload = match quoted_span(before_op) {
        Some(span) => span,
        None => {
            // Everything between the command word and the operator.
            let rest = match before_op.find(char::is_whitespace) {
                Some(cut) => &before_op[cut..],
                None => "",
            };
            rest.trim()
        }
    };

    Some(Redirect {
        append,
        filename,
        payload,
    })
}

/// The text between the first two double quotes, if both are present.
fn quoted_span(text: &str) -> Option<&str> {
    let open = text.find('"')?;
    let body = &text[open + 1..];
    let close = body.find('"')?;
    Some(&body[..close])
}
