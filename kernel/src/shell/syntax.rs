//! Single-pass syntax highlighter for file content.

use crate::drivers::vga::{Color, ColorCode, Vga};

const KEYWORDS: [&str; 6] = ["int", "void", "char", "return", "if", "while"];

/// Token class of one highlighted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Comment,
    Str,
    Number,
    Keyword,
    Ident,
    Plain,
}

impl Class {
    fn foreground(self) -> Color {
        match self {
            Class::Comment => Color::DarkGray,
            Class::Str => Color::Green,
            Class::Number => Color::LightRed,
            Class::Keyword => Color::LightCyan,
            Class::Ident => Color::Yellow,
            Class::Plain => Color::White,
        }
    }
}

/// One maximal run of same-class text, borrowing the source.
#[derive(Debug, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub class: Class,
}

/// Left-to-right classifier over source text. Allocation-free; each call
/// to `next` scans one maximal run.
pub struct Spans<'a> {
    rest: &'a str,
}

pub fn spans(source: &str) -> Spans<'_> {
    Spans { rest: source }
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        let bytes = self.rest.as_bytes();
        let first = *bytes.first()?;

        let (len, class) = match first {
            b'#' => (line_len(bytes), Class::Comment),
            b'"' => (string_len(bytes), Class::Str),
            b'0'..=b'9' => (run_len(bytes, |b| b.is_ascii_digit()), Class::Number),
            b if is_ident(b) => {
                let len = run_len(bytes, is_ident);
                let word = &self.rest[..len];
                if KEYWORDS.contains(&word) {
                    (len, Class::Keyword)
                } else {
                    (len, Class::Ident)
                }
            }
            _ => (1, Class::Plain),
        };

        let (text, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(Span { text, class })
    }
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn run_len(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().position(|&b| !pred(b)).unwrap_or(bytes.len())
}

/// Comment run: `#` through end of line, exclusive of the newline.
fn line_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == b'\n').unwrap_or(bytes.len())
}

/// String run: opening quote through the next unescaped quote, inclusive.
fn string_len(bytes: &[u8]) -> usize {
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Print `source` through the classifier, one color per run. The caller's
/// active color supplies the background.
pub fn print_highlighted(vga: &mut Vga, source: &str) {
    let background = vga.color().background();
    for span in spans(source) {
        vga.print(span.text, ColorCode::new(span.class.foreground(), background));
    }
}
