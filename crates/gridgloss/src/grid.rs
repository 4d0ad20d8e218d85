//! The cell grid a style is composited into, and its serialization.

use crate::ansi::{self, RESET, SgrState, Token};
use crate::cell::{Cell, CellStyle};
use crate::position::Sides;

/// An axis-aligned rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Shrink by `sides`, saturating so the result always stays inside `self`.
    pub fn inset(&self, sides: Sides<u16>) -> Rect {
        let left = sides.left.min(self.width);
        let right = sides.right.min(self.width - left);
        let top = sides.top.min(self.height);
        let bottom = sides.bottom.min(self.height - top);
        Rect {
            x: self.x + left,
            y: self.y + top,
            width: self.width - left - right,
            height: self.height - top - bottom,
        }
    }

    /// The overlapping part of two rectangles (empty when they are disjoint).
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::new(x, y, 0, 0);
        }
        Rect::new(x, y, right - x, bottom - y)
    }
}

/// A `width × height` array of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid filled with plain spaces.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::blank(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Replace one cell. Returns false when the position is outside the grid.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.cell_mut(x, y) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.cells[start..start + w])
    }

    /// Mutable rows, top to bottom.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, Cell> {
        let w = (self.width as usize).max(1);
        self.cells.chunks_mut(w)
    }

    /// Fill `rect` (clipped to the grid) with copies of `cell`.
    pub fn fill(&mut self, rect: Rect, cell: &Cell) {
        let rect = rect.intersect(&self.bounds());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, cell.clone());
            }
        }
    }

    /// Draw one line of text starting at `(x, y)`, clipped to the grid.
    ///
    /// Embedded SGR sequences style the cells. Returns the number of columns written.
    pub fn draw_text(&mut self, x: u16, y: u16, line: &str) -> usize {
        let width = self.width;
        let Some(row) = self.rows_mut().nth(y as usize) else {
            return 0;
        };
        if x >= width {
            return 0;
        }
        let cells = line_cells(line, &mut SgrState::new());
        lay_cells(&mut row[x as usize..], &cells)
    }

    /// Serialize the whole grid.
    pub fn render(&self) -> String {
        self.render_clipped(self.width as usize, self.height as usize)
    }

    /// Serialize at most `max_width` columns of at most `max_height` rows.
    ///
    /// Each row carries its own styling: style changes emit a reset followed by
    /// the full new style, and a styled row ends with a reset. A wide cell cut
    /// by the right edge is replaced with a space.
    pub fn render_clipped(&self, max_width: usize, max_height: usize) -> String {
        let rows = (self.height as usize).min(max_height);
        let mut out = String::with_capacity(rows * (self.width as usize + 1));
        for y in 0..rows {
            if y > 0 {
                out.push('\n');
            }
            let Some(row) = self.row(y as u16) else {
                break;
            };
            let mut current = CellStyle::PLAIN;
            let mut col = 0usize;
            for cell in row {
                if cell.is_continuation() {
                    continue;
                }
                if col >= max_width {
                    break;
                }
                let (content, w) = if col + cell.width as usize > max_width {
                    (" ", 1)
                } else {
                    (cell.content.as_str(), cell.width as usize)
                };
                if cell.style != current {
                    if !current.is_plain() {
                        out.push_str(RESET);
                    }
                    cell.style.write_sgr(&mut out);
                    current = cell.style;
                }
                out.push_str(content);
                col += w;
            }
            if !current.is_plain() {
                out.push_str(RESET);
            }
        }
        out
    }
}

/// Convert one line of text into cells, folding SGR sequences into `state`.
///
/// Non-SGR sequences and control characters are dropped. Zero-width characters
/// join the preceding cell; wide characters produce a lead and a continuation
/// cell.
pub fn line_cells(line: &str, state: &mut SgrState) -> Vec<Cell> {
    let mut cells: Vec<Cell> = Vec::with_capacity(line.len());
    for token in ansi::tokens(line) {
        match token {
            Token::Control(seq) => {
                state.apply(seq);
            }
            Token::Text(c) if c.is_control() => {}
            Token::Text(c) => match ansi::char_width(c) {
                0 => {
                    if let Some(prev) = cells.iter_mut().rev().find(|c| !c.is_continuation()) {
                        prev.content.push(c);
                    }
                }
                w => {
                    let w = w.min(2) as u8;
                    cells.push(Cell::new(c, w, state.style));
                    if w == 2 {
                        cells.push(Cell::continuation(state.style));
                    }
                }
            },
        }
    }
    cells
}

/// Copy `cells` into `dst`, stopping at its end.
///
/// A wide cell whose continuation would not fit becomes a styled space.
/// Returns the number of columns written.
pub(crate) fn lay_cells(dst: &mut [Cell], cells: &[Cell]) -> usize {
    let n = cells.len().min(dst.len());
    dst[..n].clone_from_slice(&cells[..n]);
    if n > 0 && n < cells.len() && dst[n - 1].width == 2 {
        let style = dst[n - 1].style;
        dst[n - 1] = Cell::new(' ', 1, style);
    }
    n
}
