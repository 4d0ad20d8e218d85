//! Escape sequence scanning.
//!
//! [`tokens`] splits a string into printable characters and whole control
//! sequences. Everything that needs to see "text without escapes" (measurement,
//! wrapping, the grid, the color writer) goes through this one scanner so the
//! components agree on where a sequence ends.
//!
//! ```rust
//! use gridgloss::ansi::{tokens, Token};
//!
//! let toks: Vec<_> = tokens("\x1b[1mhi").collect();
//! assert_eq!(toks, vec![Token::Control("\x1b[1m"), Token::Text('h'), Token::Text('i')]);
//! ```

use unicode_width::UnicodeWidthChar;

use crate::cell::{CellStyle, TextAttrs};
use crate::color::{ColorTarget, ConcreteColor, RgbColor};

/// Resets all SGR state.
pub const RESET: &str = "\x1b[0m";

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// A piece of scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A printable (or C0 control) character.
    Text(char),
    /// A complete escape sequence, or a truncated one running to end of input.
    Control(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Escape,
    Csi,
    Str,
    StrEscape,
}

/// Iterator over the [`Token`]s of a string.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    src: &'a str,
    pos: usize,
}

/// Scan `s` into tokens.
pub fn tokens(s: &str) -> Tokens<'_> {
    Tokens { src: s, pos: 0 }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos..];
        let ch = rest.chars().next()?;
        if ch != '\x1b' {
            self.pos += ch.len_utf8();
            return Some(Token::Text(ch));
        }
        let len = sequence_len(rest.as_bytes());
        let start = self.pos;
        self.pos += len;
        Some(Token::Control(&self.src[start..self.pos]))
    }
}

/// Length in bytes of the escape sequence at the start of `bytes`.
///
/// `bytes[0]` must be ESC. A sequence cut short by the end of input runs to
/// the end; one interrupted by a byte outside its grammar stops before that
/// byte, which then scans as ordinary input. Every byte a sequence accepts
/// before its end is ASCII, so the returned length always falls on a char
/// boundary.
pub(crate) fn sequence_len(bytes: &[u8]) -> usize {
    match scan_sequence(bytes) {
        Scan::Complete(n) | Scan::Malformed(n) => n,
        Scan::Incomplete => bytes.len(),
    }
}

/// Outcome of scanning one escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scan {
    /// Sequence ends after this many bytes.
    Complete(usize),
    /// Input ended before the sequence did.
    Incomplete,
    /// A byte outside the sequence grammar at this offset.
    Malformed(usize),
}

pub(crate) fn scan_sequence(bytes: &[u8]) -> Scan {
    debug_assert_eq!(bytes.first(), Some(&ESC));
    let mut state = State::Escape;
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        state = match state {
            State::Escape => match b {
                b'[' if i == 1 => State::Csi,
                b']' | b'P' | b'_' | b'^' | b'X' if i == 1 => State::Str,
                0x20..=0x2f => State::Escape,
                0x30..=0x7e => return Scan::Complete(i + 1),
                _ => return Scan::Malformed(i),
            },
            State::Csi => match b {
                0x20..=0x3f => State::Csi,
                0x40..=0x7e => return Scan::Complete(i + 1),
                _ => return Scan::Malformed(i),
            },
            State::Str => match b {
                BEL => return Scan::Complete(i + 1),
                ESC => State::StrEscape,
                _ => State::Str,
            },
            State::StrEscape => match b {
                b'\\' => return Scan::Complete(i + 1),
                ESC => State::StrEscape,
                _ => State::Str,
            },
        };
    }
    Scan::Incomplete
}

/// Display width of a single character; controls and combining marks are 0.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Remove every escape sequence from `s`.
pub fn strip(s: &str) -> String {
    tokens(s)
        .filter_map(|t| match t {
            Token::Text(c) => Some(c),
            Token::Control(_) => None,
        })
        .collect()
}

/// True when `seq` is a complete Select Graphic Rendition sequence.
pub fn is_sgr(seq: &str) -> bool {
    seq.len() >= 3
        && seq.starts_with("\x1b[")
        && seq.ends_with('m')
        && seq[2..seq.len() - 1]
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b';' || b == b':')
}

/// One logical SGR parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrParam<'a> {
    /// A single numeric parameter; `code` is `None` when it does not parse.
    Plain { code: Option<u16>, raw: &'a str },
    /// An extended color (`38`, `48` or `58` with its arguments).
    ///
    /// `color` is `None` when the arguments are missing or out of range.
    Extended {
        target: ColorTarget,
        color: Option<ConcreteColor>,
        raw: &'a str,
    },
}

/// Walker over the parameters of an SGR sequence.
#[derive(Debug, Clone)]
pub struct SgrParams<'a> {
    body: &'a str,
    pos: usize,
    done: bool,
}

/// Iterate the parameters of `seq`, which must satisfy [`is_sgr`].
///
/// An empty parameter list yields a single `0`.
pub fn sgr_params(seq: &str) -> SgrParams<'_> {
    let body = seq
        .strip_prefix("\x1b[")
        .and_then(|s| s.strip_suffix('m'))
        .unwrap_or("");
    SgrParams {
        body,
        pos: 0,
        done: false,
    }
}

impl<'a> SgrParams<'a> {
    fn next_part(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        let rest = &self.body[self.pos..];
        match rest.find(';') {
            Some(i) => {
                self.pos += i + 1;
                Some(&rest[..i])
            }
            None => {
                self.done = true;
                self.pos = self.body.len();
                Some(rest)
            }
        }
    }
}

fn parse_code(part: &str) -> Option<u16> {
    if part.is_empty() {
        Some(0)
    } else {
        part.parse().ok()
    }
}

fn extended_target(code: u16) -> Option<ColorTarget> {
    match code {
        38 => Some(ColorTarget::Foreground),
        48 => Some(ColorTarget::Background),
        58 => Some(ColorTarget::Underline),
        _ => None,
    }
}

fn component(part: &str) -> Option<u8> {
    part.parse().ok()
}

fn extended_color(args: &[&str]) -> Option<ConcreteColor> {
    match args {
        ["5", n] => component(n).map(ConcreteColor::from_index),
        ["2", r, g, b] | ["2", _, r, g, b] => Some(ConcreteColor::Rgb(RgbColor::new(
            component(r)?,
            component(g)?,
            component(b)?,
        ))),
        _ => None,
    }
}

impl<'a> Iterator for SgrParams<'a> {
    type Item = SgrParam<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let part = self.next_part()?;

        if part.contains(':') {
            let mut sub = part.split(':');
            let code = sub.next().and_then(parse_code);
            let args: Vec<&str> = sub.collect();
            return Some(match code.and_then(extended_target) {
                Some(target) => SgrParam::Extended {
                    target,
                    color: extended_color(&args),
                    raw: part,
                },
                None => SgrParam::Plain { code, raw: part },
            });
        }

        let code = parse_code(part);
        let Some(target) = code.and_then(extended_target) else {
            return Some(SgrParam::Plain { code, raw: part });
        };

        let mut args = Vec::with_capacity(4);
        if let Some(kind) = self.next_part() {
            args.push(kind);
            let wanted = match kind {
                "5" => 1,
                "2" => 3,
                _ => 0,
            };
            for _ in 0..wanted {
                match self.next_part() {
                    Some(p) => args.push(p),
                    None => break,
                }
            }
        }
        let end = if self.done { self.body.len() } else { self.pos - 1 };
        Some(SgrParam::Extended {
            target,
            color: extended_color(&args),
            raw: &self.body[start..end],
        })
    }
}

/// Running SGR state, folded one sequence at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SgrState {
    pub style: CellStyle,
}

impl SgrState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `seq` into the state. Returns false (and changes nothing) when
    /// `seq` is not an SGR sequence.
    pub fn apply(&mut self, seq: &str) -> bool {
        if !is_sgr(seq) {
            return false;
        }
        for param in sgr_params(seq) {
            match param {
                SgrParam::Plain { code: Some(code), .. } => self.apply_code(code),
                SgrParam::Plain { code: None, .. } => {}
                SgrParam::Extended {
                    target,
                    color: Some(color),
                    ..
                } => match target {
                    ColorTarget::Foreground => self.style.fg = Some(color),
                    ColorTarget::Background => self.style.bg = Some(color),
                    ColorTarget::Underline => {}
                },
                SgrParam::Extended { color: None, .. } => {}
            }
        }
        true
    }

    fn apply_code(&mut self, code: u16) {
        let style = &mut self.style;
        let attrs = &mut style.attrs;
        match code {
            0 => *style = CellStyle::PLAIN,
            1 => attrs.insert(TextAttrs::BOLD),
            2 => attrs.insert(TextAttrs::FAINT),
            3 => attrs.insert(TextAttrs::ITALIC),
            4 | 21 => attrs.insert(TextAttrs::UNDERLINE),
            5 | 6 => attrs.insert(TextAttrs::BLINK),
            7 => attrs.insert(TextAttrs::REVERSE),
            9 => attrs.insert(TextAttrs::STRIKETHROUGH),
            22 => attrs.remove(TextAttrs::BOLD | TextAttrs::FAINT),
            23 => attrs.remove(TextAttrs::ITALIC),
            24 => attrs.remove(TextAttrs::UNDERLINE),
            25 => attrs.remove(TextAttrs::BLINK),
            27 => attrs.remove(TextAttrs::REVERSE),
            29 => attrs.remove(TextAttrs::STRIKETHROUGH),
            30..=37 => style.fg = Some(ConcreteColor::Basic((code - 30) as u8)),
            39 => style.fg = None,
            40..=47 => style.bg = Some(ConcreteColor::Basic((code - 40) as u8)),
            49 => style.bg = None,
            90..=97 => style.fg = Some(ConcreteColor::Basic((code - 90 + 8) as u8)),
            100..=107 => style.bg = Some(ConcreteColor::Basic((code - 100 + 8) as u8)),
            _ => {}
        }
    }

    pub fn is_plain(&self) -> bool {
        self.style.is_plain()
    }
}
