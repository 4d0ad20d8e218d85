//! Display-width measurement that ignores escape sequences.

use crate::ansi::{self, Token};

/// Visible width of a single line.
pub fn visible_width(line: &str) -> usize {
    ansi::tokens(line)
        .map(|t| match t {
            Token::Text(c) => ansi::char_width(c),
            Token::Control(_) => 0,
        })
        .sum()
}

/// Get the width of the widest line in a string.
///
/// ```rust
/// assert_eq!(gridgloss::width("Hello"), 5);
/// assert_eq!(gridgloss::width("\x1b[1m日本\x1b[0m\nab"), 4);
/// ```
pub fn width(s: &str) -> usize {
    s.split('\n').map(visible_width).max().unwrap_or(0)
}

/// Get the number of lines in a string; the empty string is one line.
///
/// ```rust
/// assert_eq!(gridgloss::height("a\nb\nc"), 3);
/// assert_eq!(gridgloss::height(""), 1);
/// ```
pub fn height(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count() + 1
}

/// `(width, height)` of a block of text.
pub fn size(s: &str) -> (usize, usize) {
    (width(s), height(s))
}
