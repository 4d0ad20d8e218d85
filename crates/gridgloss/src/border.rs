//! Border styles for terminal boxes.
//!
//! Several preset border styles are provided, and you can create custom ones.
//!
//! # Preset Borders
//!
//! - [`Border::normal()`] - Standard border (┌─┐)
//! - [`Border::rounded()`] - Rounded corners (╭─╮)
//! - [`Border::block()`] - Full block (█)
//! - [`Border::thick()`] - Thick lines (┏━┓)
//! - [`Border::double()`] - Double lines (╔═╗)
//! - [`Border::hidden()`] - Invisible (spaces)
//! - [`Border::ascii()`] - ASCII characters (+-|)
//! - [`Border::markdown()`] - Pipes only (|-|)
//!
//! # Example
//!
//! ```rust
//! use gridgloss::Border;
//!
//! let border = Border::rounded();
//! assert_eq!(border.top_left, "╭");
//! ```

use serde::{Deserialize, Serialize};

use crate::ansi::char_width;
use crate::cell::{Cell, CellStyle};
use crate::position::Sides;

/// Border characters for all edges and corners.
///
/// Edge strings are repeated cyclically along their edge; corners use only
/// their first character. The middle connectors are not drawn by a style and
/// exist for widgets that split a box into cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Border {
    /// Top edge character(s).
    pub top: String,
    /// Bottom edge character(s).
    pub bottom: String,
    /// Left edge character(s).
    pub left: String,
    /// Right edge character(s).
    pub right: String,
    /// Top-left corner.
    pub top_left: String,
    /// Top-right corner.
    pub top_right: String,
    /// Bottom-left corner.
    pub bottom_left: String,
    /// Bottom-right corner.
    pub bottom_right: String,
    /// Middle-left connector (for tables).
    pub middle_left: String,
    /// Middle-right connector (for tables).
    pub middle_right: String,
    /// Middle cross (for tables).
    pub middle: String,
    /// Middle-top connector (for tables).
    pub middle_top: String,
    /// Middle-bottom connector (for tables).
    pub middle_bottom: String,
}

impl Border {
    /// Build from `[top, right, bottom, left]` edges, `[top_left, top_right,
    /// bottom_right, bottom_left]` corners, and `[left, right, cross, top,
    /// bottom]` middle connectors.
    fn preset(edges: [&str; 4], corners: [&str; 4], middles: [&str; 5]) -> Self {
        let [top, right, bottom, left] = edges.map(String::from);
        let [top_left, top_right, bottom_right, bottom_left] = corners.map(String::from);
        let [middle_left, middle_right, middle, middle_top, middle_bottom] =
            middles.map(String::from);
        Self {
            top,
            bottom,
            left,
            right,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            middle_left,
            middle_right,
            middle,
            middle_top,
            middle_bottom,
        }
    }

    /// Creates an empty border (no characters).
    pub fn none() -> Self {
        Self::default()
    }

    /// Standard border with 90-degree corners.
    ///
    /// ```text
    /// ┌───┐
    /// │   │
    /// └───┘
    /// ```
    pub fn normal() -> Self {
        Self::preset(
            ["─", "│", "─", "│"],
            ["┌", "┐", "┘", "└"],
            ["├", "┤", "┼", "┬", "┴"],
        )
    }

    /// Border with rounded corners.
    ///
    /// ```text
    /// ╭───╮
    /// │   │
    /// ╰───╯
    /// ```
    pub fn rounded() -> Self {
        Self::preset(
            ["─", "│", "─", "│"],
            ["╭", "╮", "╯", "╰"],
            ["├", "┤", "┼", "┬", "┴"],
        )
    }

    /// Full block border.
    pub fn block() -> Self {
        Self::preset(["█"; 4], ["█"; 4], ["█"; 5])
    }

    /// Half-block border hugging the outside of the box.
    pub fn outer_half_block() -> Self {
        Self::preset(["▀", "▐", "▄", "▌"], ["▛", "▜", "▟", "▙"], [""; 5])
    }

    /// Half-block border hugging the inside of the box.
    pub fn inner_half_block() -> Self {
        Self::preset(["▄", "▌", "▀", "▐"], ["▗", "▖", "▘", "▝"], [""; 5])
    }

    /// Thick border.
    ///
    /// ```text
    /// ┏━━━┓
    /// ┃   ┃
    /// ┗━━━┛
    /// ```
    pub fn thick() -> Self {
        Self::preset(
            ["━", "┃", "━", "┃"],
            ["┏", "┓", "┛", "┗"],
            ["┣", "┫", "╋", "┳", "┻"],
        )
    }

    /// Double-line border.
    ///
    /// ```text
    /// ╔═══╗
    /// ║   ║
    /// ╚═══╝
    /// ```
    pub fn double() -> Self {
        Self::preset(
            ["═", "║", "═", "║"],
            ["╔", "╗", "╝", "╚"],
            ["╠", "╣", "╬", "╦", "╩"],
        )
    }

    /// Hidden border: takes up space but draws spaces.
    pub fn hidden() -> Self {
        Self::preset([" "; 4], [" "; 4], [" "; 5])
    }

    /// ASCII-only border.
    ///
    /// ```text
    /// +---+
    /// |   |
    /// +---+
    /// ```
    pub fn ascii() -> Self {
        Self::preset(["-", "|", "-", "|"], ["+"; 4], ["+"; 5])
    }

    /// Markdown table border style.
    pub fn markdown() -> Self {
        Self::preset(["-", "|", "-", "|"], ["|"; 4], ["|"; 5])
    }

    /// Returns true if this border has no characters on its edges or corners.
    pub fn is_empty(&self) -> bool {
        [
            &self.top,
            &self.bottom,
            &self.left,
            &self.right,
            &self.top_left,
            &self.top_right,
            &self.bottom_left,
            &self.bottom_right,
        ]
        .iter()
        .all(|s| s.is_empty())
    }
}

/// Which border edges should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderEdges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl BorderEdges {
    /// All edges enabled.
    pub const fn all() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }

    /// No edges enabled.
    pub const fn none() -> Self {
        Self {
            top: false,
            right: false,
            bottom: false,
            left: false,
        }
    }

    /// Returns true if any edge is enabled.
    pub const fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }

    /// Returns true if all edges are enabled.
    pub const fn is_all(&self) -> bool {
        self.top && self.right && self.bottom && self.left
    }

    /// The edges actually drawn.
    ///
    /// Setting a border style without choosing any edge draws all four.
    pub const fn effective(self, border_set: bool, sides_set: bool) -> Self {
        if border_set && !sides_set {
            Self::all()
        } else {
            self
        }
    }
}

/// Printable runes of a glyph string; a visible edge never ends up empty.
fn edge_runes(glyph: &str) -> Vec<char> {
    let runes: Vec<char> = glyph.chars().filter(|&c| char_width(c) > 0).collect();
    if runes.is_empty() { vec![' '] } else { runes }
}

fn first_rune(glyph: &str) -> char {
    glyph.chars().find(|&c| char_width(c) > 0).unwrap_or(' ')
}

/// One rune padded with spaces to exactly `cols` columns.
///
/// A rune wider than `cols` is replaced by spaces.
fn fit_cells(rune: char, cols: usize, style: CellStyle, out: &mut Vec<Cell>) {
    let w = char_width(rune);
    let mut used = 0;
    if w <= cols {
        push_rune(rune, w, style, out);
        used = w;
    }
    for _ in used..cols {
        out.push(Cell::new(' ', 1, style));
    }
}

fn push_rune(rune: char, w: usize, style: CellStyle, out: &mut Vec<Cell>) {
    out.push(Cell::new(rune, w as u8, style));
    if w == 2 {
        out.push(Cell::continuation(style));
    }
}

/// Repeat `runes` cyclically across `cols` columns.
fn cycle_cells(runes: &[char], cols: usize, style: CellStyle, out: &mut Vec<Cell>) {
    let mut used = 0;
    for &rune in runes.iter().cycle() {
        if used >= cols {
            break;
        }
        let w = char_width(rune);
        if used + w > cols {
            break;
        }
        push_rune(rune, w, style, out);
        used += w;
    }
    for _ in used..cols {
        out.push(Cell::new(' ', 1, style));
    }
}

/// A border resolved for drawing: visible edges, glyph runes and edge styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderGlyphs {
    edges: BorderEdges,
    top: Vec<char>,
    right: Vec<char>,
    bottom: Vec<char>,
    left: Vec<char>,
    top_left: char,
    top_right: char,
    bottom_right: char,
    bottom_left: char,
    sizes: Sides<u16>,
    styles: Sides<CellStyle>,
}

impl BorderGlyphs {
    /// Resolve `border` for the given effective edges and per-edge styles.
    pub fn compose(border: &Border, edges: BorderEdges, styles: Sides<CellStyle>) -> Self {
        let top = edge_runes(&border.top);
        let right = edge_runes(&border.right);
        let bottom = edge_runes(&border.bottom);
        let left = edge_runes(&border.left);
        let widest = |runes: &[char]| runes.iter().map(|&c| char_width(c)).max().unwrap_or(1);
        let sizes = Sides {
            top: u16::from(edges.top),
            right: if edges.right { widest(&right[..]) as u16 } else { 0 },
            bottom: u16::from(edges.bottom),
            left: if edges.left { widest(&left[..]) as u16 } else { 0 },
        };
        Self {
            edges,
            top_left: first_rune(&border.top_left),
            top_right: first_rune(&border.top_right),
            bottom_right: first_rune(&border.bottom_right),
            bottom_left: first_rune(&border.bottom_left),
            top,
            right,
            bottom,
            left,
            sizes,
            styles,
        }
    }

    pub fn edges(&self) -> BorderEdges {
        self.edges
    }

    /// Thickness of each edge in cells (0 when not visible).
    pub fn sizes(&self) -> Sides<u16> {
        self.sizes
    }

    /// Corner runes `[top_left, top_right, bottom_right, bottom_left]`; a
    /// corner is `None` unless both of its edges are visible.
    pub fn corners(&self) -> [Option<char>; 4] {
        let e = self.edges;
        [
            (e.top && e.left).then_some(self.top_left),
            (e.top && e.right).then_some(self.top_right),
            (e.bottom && e.right).then_some(self.bottom_right),
            (e.bottom && e.left).then_some(self.bottom_left),
        ]
    }

    fn horizontal_row(
        &self,
        width: usize,
        edge: &[char],
        corners: (Option<char>, Option<char>),
        style: CellStyle,
    ) -> Vec<Cell> {
        let left = self.sizes.left as usize;
        let right = self.sizes.right as usize;
        let mut out = Vec::with_capacity(width);
        if let Some(c) = corners.0 {
            fit_cells(c, left.min(width), style, &mut out);
        }
        let inner = width.saturating_sub(out.len());
        let inner = match corners.1 {
            Some(_) => inner.saturating_sub(right),
            None => inner,
        };
        cycle_cells(edge, inner, style, &mut out);
        if let Some(c) = corners.1 {
            fit_cells(c, width.saturating_sub(out.len()).min(right), style, &mut out);
        }
        out
    }

    /// Cells of the top border row for a box `width` columns wide.
    pub fn top_row(&self, width: usize) -> Vec<Cell> {
        let [tl, tr, _, _] = self.corners();
        self.horizontal_row(width, &self.top, (tl, tr), self.styles.top)
    }

    /// Cells of the bottom border row for a box `width` columns wide.
    pub fn bottom_row(&self, width: usize) -> Vec<Cell> {
        let [_, _, br, bl] = self.corners();
        self.horizontal_row(width, &self.bottom, (bl, br), self.styles.bottom)
    }

    /// Left edge cells for the `row`-th row below the top border.
    pub fn left_cells(&self, row: usize) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.sizes.left as usize);
        let rune = self.left[row % self.left.len()];
        fit_cells(rune, self.sizes.left as usize, self.styles.left, &mut out);
        out
    }

    /// Right edge cells for the `row`-th row below the top border.
    pub fn right_cells(&self, row: usize) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.sizes.right as usize);
        let rune = self.right[row % self.right.len()];
        fit_cells(rune, self.sizes.right as usize, self.styles.right, &mut out);
        out
    }
}
