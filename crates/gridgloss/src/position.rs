//! Position and alignment types, and block placement.

use serde::{Deserialize, Serialize};

use crate::ansi::{self, RESET, Token};
use crate::measure::{height, visible_width, width};
use crate::style::Style;
use crate::wrap::truncate;

/// A point along an axis: 0.0 is the start (top/left), 1.0 the end
/// (bottom/right), 0.5 the center.
///
/// Values are clamped to `[0, 1]` on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Position(f64);

#[allow(non_upper_case_globals)]
impl Position {
    /// Align to the top.
    pub const Top: Position = Position(0.0);
    /// Align to the bottom.
    pub const Bottom: Position = Position(1.0);
    /// Align to the center.
    pub const Center: Position = Position(0.5);
    /// Align to the left.
    pub const Left: Position = Position(0.0);
    /// Align to the right.
    pub const Right: Position = Position(1.0);
}

impl Position {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::Top;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Convert position to a factor in `[0, 1]`.
    pub fn factor(&self) -> f64 {
        self.0
    }

    /// Divide `gap` cells into `(before, after)` the content.
    ///
    /// The parts always sum to `gap` (or are both zero when `gap <= 0`). An odd
    /// cell at the center goes after the content.
    ///
    /// ```rust
    /// use gridgloss::Position;
    ///
    /// assert_eq!(Position::Center.split(5), (2, 3));
    /// assert_eq!(Position::Right.split(5), (5, 0));
    /// assert_eq!(Position::Left.split(-2), (0, 0));
    /// ```
    pub fn split(&self, gap: i64) -> (i64, i64) {
        if gap <= 0 {
            return (0, 0);
        }
        if self.0 <= 0.0 {
            return (0, gap);
        }
        if self.0 >= 1.0 {
            return (gap, 0);
        }
        let after = ((gap as f64) * (1.0 - self.0) + 0.5).floor() as i64;
        let after = after.clamp(0, gap);
        (gap - after, after)
    }

    /// [`split`](Self::split) for unsigned cell counts.
    pub fn split_cells(&self, gap: usize) -> (usize, usize) {
        let (before, after) = self.split(gap as i64);
        (before as usize, after as usize)
    }
}

impl From<f64> for Position {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<Position> for f64 {
    fn from(p: Position) -> Self {
        p.0
    }
}

/// CSS-like sides specification for padding, margin, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Sides<T> {
    /// Create sides with all values the same.
    pub const fn all(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create sides from individual values.
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// CSS shorthand from a slice of one to four values.
    ///
    /// Any other length yields `None`.
    pub fn from_slice(values: &[T]) -> Option<Self> {
        match *values {
            [all] => Some(Self::all(all)),
            [v, h] => Some(Self::new(v, h, v, h)),
            [t, h, b] => Some(Self::new(t, h, b, h)),
            [t, r, b, l] => Some(Self::new(t, r, b, l)),
            _ => None,
        }
    }
}

impl Sides<u16> {
    /// Left plus right.
    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

// From implementations for CSS-like shorthand

impl<T: Copy> From<T> for Sides<T> {
    /// Single value: all sides.
    fn from(all: T) -> Self {
        Self::all(all)
    }
}

impl<T: Copy> From<(T, T)> for Sides<T> {
    /// Two values: (vertical, horizontal).
    fn from((vertical, horizontal): (T, T)) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl<T: Copy> From<(T, T, T)> for Sides<T> {
    /// Three values: (top, horizontal, bottom).
    fn from((top, horizontal, bottom): (T, T, T)) -> Self {
        Self::new(top, horizontal, bottom, horizontal)
    }
}

impl<T: Copy> From<(T, T, T, T)> for Sides<T> {
    /// Four values: (top, right, bottom, left) - clockwise.
    fn from((top, right, bottom, left): (T, T, T, T)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// How gaps around placed text are filled.
#[derive(Debug, Clone, Default)]
pub struct Whitespace {
    /// Characters cycled through to fill a gap; empty means spaces.
    pub chars: String,
    /// Style the fill is rendered with.
    pub style: Style,
}

impl Whitespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chars(mut self, chars: impl Into<String>) -> Self {
        self.chars = chars.into();
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Render exactly `cols` columns of fill.
    pub fn render(&self, cols: usize) -> String {
        if cols == 0 {
            return String::new();
        }
        let runes: Vec<char> = self
            .chars
            .chars()
            .filter(|&c| ansi::char_width(c) > 0)
            .collect();
        let mut fill = String::with_capacity(cols);
        let mut used = 0;
        if !runes.is_empty() {
            for c in runes.iter().cycle() {
                let w = ansi::char_width(*c);
                if used + w > cols {
                    break;
                }
                fill.push(*c);
                used += w;
            }
        }
        // A wide rune that did not fit leaves a gap.
        fill.extend(std::iter::repeat(' ').take(cols - used));
        if self.style.is_plain() {
            fill
        } else {
            self.style.render(&fill)
        }
    }
}

/// Place a block horizontally in a box `width` columns wide.
///
/// Narrower blocks are padded line by line; when the block is already at least
/// `width` wide the input is returned unchanged.
///
/// ```rust
/// use gridgloss::{place_horizontal, Position};
///
/// assert_eq!(place_horizontal(10, Position::Right, "Hello"), "     Hello");
/// assert_eq!(place_horizontal(10, Position::Center, "Hello"), "  Hello   ");
/// ```
pub fn place_horizontal(width: usize, pos: Position, s: &str) -> String {
    place_horizontal_with(width, pos, s, &Whitespace::default())
}

/// [`place_horizontal`] with a custom fill.
pub fn place_horizontal_with(width: usize, pos: Position, s: &str, ws: &Whitespace) -> String {
    let content_width = self::width(s);
    if width <= content_width {
        return s.to_string();
    }
    let gap = width - content_width;
    let mut out = String::with_capacity(s.len() + gap * height(s));
    for (i, line) in s.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let short = content_width - visible_width(line);
        let (before, after) = pos.split_cells(gap + short);
        out.push_str(&ws.render(before));
        out.push_str(line);
        out.push_str(&ws.render(after));
    }
    out
}

/// Place a block vertically in a box `height` lines tall.
///
/// ```rust
/// use gridgloss::{place_vertical, Position};
///
/// assert_eq!(place_vertical(3, Position::Bottom, "ab"), "  \n  \nab");
/// ```
pub fn place_vertical(height: usize, pos: Position, s: &str) -> String {
    place_vertical_with(height, pos, s, &Whitespace::default())
}

/// [`place_vertical`] with a custom fill.
pub fn place_vertical_with(height: usize, pos: Position, s: &str, ws: &Whitespace) -> String {
    let content_height = self::height(s);
    if height <= content_height {
        return s.to_string();
    }
    let (top, bottom) = pos.split_cells(height - content_height);
    let blank = ws.render(width(s));
    let mut lines: Vec<&str> = Vec::with_capacity(height);
    lines.extend(std::iter::repeat(blank.as_str()).take(top));
    lines.push(s);
    lines.extend(std::iter::repeat(blank.as_str()).take(bottom));
    lines.join("\n")
}

/// Place a block in a `width × height` box.
pub fn place(width: usize, height: usize, h_pos: Position, v_pos: Position, s: &str) -> String {
    place_with(width, height, h_pos, v_pos, s, &Whitespace::default())
}

/// [`place`] with a custom fill.
pub fn place_with(
    width: usize,
    height: usize,
    h_pos: Position,
    v_pos: Position,
    s: &str,
    ws: &Whitespace,
) -> String {
    place_vertical_with(height, v_pos, &place_horizontal_with(width, h_pos, s, ws), ws)
}

/// Stamp `fg` over `bg` with its top-left corner at `(x, y)`.
///
/// The position is clamped so `fg` stays inside `bg` where possible. When `fg`
/// covers `bg` entirely, `fg` is returned.
pub fn place_overlay(x: usize, y: usize, fg: &str, bg: &str) -> String {
    let (fg_width, fg_height) = (width(fg), height(fg));
    let (bg_width, bg_height) = (width(bg), height(bg));
    if fg_width >= bg_width && fg_height >= bg_height {
        return fg.to_string();
    }
    let x = x.min(bg_width.saturating_sub(fg_width));
    let y = y.min(bg_height.saturating_sub(fg_height));
    let fg_lines: Vec<&str> = fg.split('\n').collect();

    let mut out = String::with_capacity(bg.len() + fg.len());
    for (i, bg_line) in bg.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let Some(fg_line) = i.checked_sub(y).and_then(|row| fg_lines.get(row)) else {
            out.push_str(bg_line);
            continue;
        };

        let left = truncate(bg_line, x, "");
        let mut pos = visible_width(&left);
        out.push_str(&left);
        if left.contains('\x1b') {
            out.push_str(RESET);
        }
        if pos < x {
            out.push_str(&" ".repeat(x - pos));
            pos = x;
        }

        let fg_line = truncate(fg_line, bg_width - pos, "");
        out.push_str(&fg_line);
        pos += visible_width(&fg_line);

        let right = skip_columns(bg_line, pos);
        let line_width = visible_width(bg_line);
        let right_width = visible_width(&right);
        if line_width > pos + right_width {
            out.push_str(&" ".repeat(line_width - pos - right_width));
        }
        out.push_str(&right);
    }
    out
}

/// Drop the first `cols` columns of `line`, keeping the styling in effect.
///
/// A wide character cut in half becomes a space.
fn skip_columns(line: &str, cols: usize) -> String {
    let mut out = String::new();
    let mut active: Vec<&str> = Vec::new();
    let mut pos = 0;
    let mut started = false;
    for token in ansi::tokens(line) {
        match token {
            Token::Control(seq) if started => out.push_str(seq),
            Token::Control(seq) => {
                if seq == RESET || seq == "\x1b[m" {
                    active.clear();
                } else {
                    active.push(seq);
                }
            }
            Token::Text(c) => {
                let w = ansi::char_width(c);
                if started {
                    out.push(c);
                } else if pos + w > cols {
                    started = true;
                    out.extend(active.drain(..));
                    if pos < cols {
                        out.push_str(&" ".repeat(pos + w - cols));
                    } else {
                        out.push(c);
                    }
                }
                pos += w;
            }
        }
    }
    out
}
