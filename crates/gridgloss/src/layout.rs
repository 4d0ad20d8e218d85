//! Box-model layout.
//!
//! A styled block is laid out as four nested rectangles (margin, border,
//! padding, content). Each region paints "its rectangle minus the next one";
//! the grid rows are split into disjoint mutable spans per region so the four
//! painters can run in parallel inside a `rayon::scope`.

use tracing::trace;

use crate::ansi::{self, SgrState};
use crate::border::{Border, BorderEdges, BorderGlyphs};
use crate::cell::{Cell, CellStyle, TextAttrs};
use crate::grid::{Grid, Rect, lay_cells, line_cells};
use crate::measure;
use crate::position::{Position, Sides};
use crate::renderer::Renderer;
use crate::style::Style;
use crate::wrap::wrap;

/// One of the four painted parts of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Margin,
    Border,
    Padding,
    Content,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Margin, Region::Border, Region::Padding, Region::Content];

    const fn index(self) -> usize {
        match self {
            Region::Margin => 0,
            Region::Border => 1,
            Region::Padding => 2,
            Region::Content => 3,
        }
    }
}

/// The nested rectangles of a laid-out box.
///
/// `margin` is the whole box; every following rectangle lies inside the
/// previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxRegions {
    pub margin: Rect,
    pub border: Rect,
    pub padding: Rect,
    pub content: Rect,
}

impl BoxRegions {
    /// Shrink `area` by the margin, then the border thickness, then padding.
    ///
    /// Each step saturates, so an area too small for its frame yields empty
    /// inner rectangles rather than overlapping ones.
    pub fn compute(
        area: Rect,
        margin: Sides<u16>,
        border: Sides<u16>,
        padding: Sides<u16>,
    ) -> Self {
        let border_rect = area.inset(margin);
        let padding_rect = border_rect.inset(border);
        let regions = Self {
            margin: area,
            border: border_rect,
            padding: padding_rect,
            content: padding_rect.inset(padding),
        };
        debug_assert!(
            regions.is_partition(),
            "box regions overlap or leave gaps: {regions:?}"
        );
        regions
    }

    pub fn rect(&self, region: Region) -> Rect {
        match region {
            Region::Margin => self.margin,
            Region::Border => self.border,
            Region::Padding => self.padding,
            Region::Content => self.content,
        }
    }

    /// Cells painted by `region`: its rectangle minus the next inner one.
    pub fn painted_area(&self, region: Region) -> usize {
        let inner = match region {
            Region::Margin => self.border.area(),
            Region::Border => self.padding.area(),
            Region::Padding => self.content.area(),
            Region::Content => 0,
        };
        self.rect(region).area().saturating_sub(inner)
    }

    /// The region painting `(x, y)`, if the point is inside the box.
    pub fn region_at(&self, x: u16, y: u16) -> Option<Region> {
        Region::ALL
            .into_iter()
            .rev()
            .find(|&r| self.rect(r).contains(x, y))
    }

    /// True when the rectangles are nested, so the painted regions cover the
    /// box exactly once.
    pub fn is_partition(&self) -> bool {
        let nested = self.margin.contains_rect(&self.border)
            && self.border.contains_rect(&self.padding)
            && self.padding.contains_rect(&self.content);
        nested
            && Region::ALL
                .iter()
                .map(|&r| self.painted_area(r))
                .sum::<usize>()
                == self.margin.area()
    }
}

/// A horizontal run of cells on one grid row.
#[derive(Debug)]
pub struct Span<'a> {
    /// Grid column of the first cell.
    pub x: u16,
    pub y: u16,
    pub cells: &'a mut [Cell],
}

impl Span<'_> {
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Replace the cell at grid column `x`. Returns false outside the span.
    pub fn set(&mut self, x: u16, cell: Cell) -> bool {
        let Some(i) = x.checked_sub(self.x) else {
            return false;
        };
        match self.cells.get_mut(i as usize) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }
}

/// A grid borrowed as four disjoint sets of spans, one per region.
#[derive(Debug, Default)]
pub struct RegionCanvas<'a> {
    spans: [Vec<Span<'a>>; 4],
}

impl<'a> RegionCanvas<'a> {
    /// Split the rows of `grid` covered by `regions`.
    ///
    /// Cells outside the margin rectangle belong to no span.
    pub fn split(grid: &'a mut Grid, regions: &BoxRegions) -> Self {
        let bounds = grid.bounds();
        let nested = Region::ALL.map(|r| regions.rect(r).intersect(&bounds));
        let outer = nested[0];
        let mut canvas = Self::default();
        if outer.is_empty() {
            return canvas;
        }
        for (y, row) in grid.rows_mut().enumerate() {
            let y = y as u16;
            if y < outer.y || y >= outer.bottom() {
                continue;
            }
            let mut rest: &'a mut [Cell] = &mut row[outer.x as usize..outer.right() as usize];
            let mut rest_x = outer.x;
            for level in 0..4 {
                let inner = nested
                    .get(level + 1)
                    .filter(|r| !r.is_empty() && y >= r.y && y < r.bottom());
                let current = std::mem::take(&mut rest);
                let Some(inner) = inner else {
                    canvas.spans[level].push(Span {
                        x: rest_x,
                        y,
                        cells: current,
                    });
                    break;
                };
                let (left, tail) = current.split_at_mut((inner.x - rest_x) as usize);
                let (middle, right) = tail.split_at_mut(inner.width as usize);
                if !left.is_empty() {
                    canvas.spans[level].push(Span {
                        x: rest_x,
                        y,
                        cells: left,
                    });
                }
                if !right.is_empty() {
                    canvas.spans[level].push(Span {
                        x: inner.right(),
                        y,
                        cells: right,
                    });
                }
                rest = middle;
                rest_x = inner.x;
            }
        }
        canvas
    }

    pub fn spans(&self, region: Region) -> &[Span<'a>] {
        &self.spans[region.index()]
    }

    /// Number of cells handed to `region`.
    pub fn cell_count(&self, region: Region) -> usize {
        self.spans(region).iter().map(Span::width).sum()
    }

    /// Spans in margin, border, padding, content order.
    pub fn into_spans(self) -> [Vec<Span<'a>>; 4] {
        self.spans
    }
}

/// Margin, border and padding resolved for one render.
struct Frame {
    margin: Sides<u16>,
    border: BorderGlyphs,
    padding: Sides<u16>,
}

impl Frame {
    fn of(style: &Style, renderer: &Renderer) -> Self {
        if style.get_inline() {
            return Self {
                margin: Sides::default(),
                border: BorderGlyphs::compose(
                    &Border::none(),
                    BorderEdges::none(),
                    Sides::all(CellStyle::PLAIN),
                ),
                padding: Sides::default(),
            };
        }
        Self {
            margin: style.get_margin(),
            border: style.border_glyphs(renderer),
            padding: style.get_padding(),
        }
    }

    /// Border plus padding, the part of the frame inside the block.
    fn inner_width(&self) -> usize {
        (self.border.sizes().horizontal() as usize) + (self.padding.horizontal() as usize)
    }

    fn inner_height(&self) -> usize {
        (self.border.sizes().vertical() as usize) + (self.padding.vertical() as usize)
    }

    fn regions(&self, area: Rect) -> BoxRegions {
        BoxRegions::compute(area, self.margin, self.border.sizes(), self.padding)
    }
}

/// How content lines are placed and styled inside the content rectangle.
struct ContentPlan<'s> {
    body: &'s str,
    rect: Rect,
    align_h: Position,
    align_v: Position,
    base: CellStyle,
    underline_spaces: bool,
    strikethrough_spaces: bool,
}

impl ContentPlan<'_> {
    /// Merge the style's attributes and colors into a cell from the text.
    fn merge(&self, cell: &mut Cell) {
        let mut attrs = self.base.attrs;
        if cell.content.chars().all(char::is_whitespace) && !cell.is_continuation() {
            if !self.underline_spaces {
                attrs.remove(TextAttrs::UNDERLINE);
            }
            if !self.strikethrough_spaces {
                attrs.remove(TextAttrs::STRIKETHROUGH);
            }
        }
        cell.style.attrs |= attrs;
        if cell.style.fg.is_none() {
            cell.style.fg = self.base.fg;
        }
        if cell.style.bg.is_none() {
            cell.style.bg = self.base.bg;
        }
    }
}

/// Only single-column runes can fill margins and padding.
fn fill_rune(c: char) -> char {
    if ansi::char_width(c) == 1 { c } else { ' ' }
}

fn fill_spans(spans: Vec<Span<'_>>, cell: &Cell) {
    for span in spans {
        for slot in span.cells.iter_mut() {
            slot.clone_from(cell);
        }
    }
}

/// Full-width cells of the border rectangle's row `y`.
fn border_row(glyphs: &BorderGlyphs, rect: Rect, y: u16) -> Vec<Cell> {
    let width = rect.width as usize;
    let edges = glyphs.edges();
    if edges.top && y == rect.y {
        return glyphs.top_row(width);
    }
    if edges.bottom && y.saturating_add(1) == rect.bottom() {
        return glyphs.bottom_row(width);
    }
    let row = y.saturating_sub(rect.y.saturating_add(glyphs.sizes().top)) as usize;
    let mut out = glyphs.left_cells(row);
    out.truncate(width);
    let right = glyphs.right_cells(row);
    let gap = width.saturating_sub(out.len() + right.len());
    out.extend(std::iter::repeat_n(Cell::blank(), gap));
    out.extend(right);
    out.truncate(width);
    out
}

fn draw_border(spans: Vec<Span<'_>>, glyphs: &BorderGlyphs, rect: Rect) {
    for span in spans {
        let row = border_row(glyphs, rect, span.y);
        let offset = span.x.saturating_sub(rect.x) as usize;
        if let Some(src) = row.get(offset..) {
            lay_cells(span.cells, src);
        }
    }
}

fn draw_content(spans: Vec<Span<'_>>, plan: &ContentPlan<'_>) {
    let rect = plan.rect;
    let lines: Vec<&str> = plan.body.split('\n').collect();
    let (top, _) = plan
        .align_v
        .split_cells((rect.height as usize).saturating_sub(lines.len()));
    let filler = Cell::new(
        ' ',
        1,
        CellStyle {
            bg: plan.base.bg,
            ..CellStyle::PLAIN
        },
    );
    for span in spans {
        for slot in span.cells.iter_mut() {
            slot.clone_from(&filler);
        }
        let row = span.y.saturating_sub(rect.y) as usize;
        let Some(line) = row.checked_sub(top).and_then(|i| lines.get(i)) else {
            continue;
        };
        let mut cells = line_cells(line, &mut SgrState::new());
        for cell in &mut cells {
            plan.merge(cell);
        }
        let (before, _) = plan
            .align_h
            .split_cells(span.width().saturating_sub(cells.len()));
        lay_cells(&mut span.cells[before..], &cells);
    }
}

/// Paint `body` (already wrapped) into `grid` using precomputed regions.
fn paint(
    style: &Style,
    renderer: &Renderer,
    grid: &mut Grid,
    frame: &Frame,
    regions: &BoxRegions,
    body: &str,
) {
    let base = style.cell_style(renderer);
    let margin_cell = Cell::new(
        fill_rune(style.get_margin_char()),
        1,
        style.margin_cell_style(renderer),
    );
    let padding_cell = Cell::new(
        fill_rune(style.get_padding_char()),
        1,
        CellStyle {
            bg: base.bg,
            ..CellStyle::PLAIN
        },
    );
    let plan = ContentPlan {
        body,
        rect: regions.content,
        align_h: style.get_align_horizontal(),
        align_v: style.get_align_vertical(),
        base,
        underline_spaces: style.get_underline_spaces(),
        strikethrough_spaces: style.get_strikethrough_spaces(),
    };

    let [margin, border, padding, content] = RegionCanvas::split(grid, regions).into_spans();
    let (margin_cell, padding_cell, plan) = (&margin_cell, &padding_cell, &plan);
    let (glyphs, border_rect) = (&frame.border, regions.border);
    rayon::scope(|s| {
        s.spawn(move |_| fill_spans(margin, margin_cell));
        s.spawn(move |_| draw_border(border, glyphs, border_rect));
        s.spawn(move |_| fill_spans(padding, padding_cell));
        s.spawn(move |_| draw_content(content, plan));
    });
}

fn clamp_cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn compose_prepared(style: &Style, renderer: &Renderer, content: &str) -> Grid {
    let frame = Frame::of(style, renderer);
    let inline = style.get_inline();

    let explicit_width = style.get_width() as usize;
    let (block_width, content_width) = if explicit_width > 0 {
        (
            explicit_width,
            explicit_width.saturating_sub(frame.inner_width()),
        )
    } else {
        let w = measure::width(content);
        (w + frame.inner_width(), w)
    };

    let wrapped;
    let body = if explicit_width > 0 && !inline {
        wrapped = wrap(content, content_width);
        wrapped.as_str()
    } else {
        content
    };

    let explicit_height = style.get_height() as usize;
    let block_height = if explicit_height > 0 {
        explicit_height
    } else {
        measure::height(body) + frame.inner_height()
    };

    let total_width = block_width + frame.margin.horizontal() as usize;
    let total_height = block_height + frame.margin.vertical() as usize;
    trace!(
        width = total_width,
        height = total_height,
        "Composing styled box"
    );

    let mut grid = Grid::new(clamp_cells(total_width), clamp_cells(total_height));
    let regions = frame.regions(grid.bounds());
    paint(style, renderer, &mut grid, &frame, &regions, body);
    grid
}

/// Lay out `text` with `style` into a fresh grid sized to fit the box.
pub fn compose(style: &Style, renderer: &Renderer, text: &str) -> Grid {
    compose_prepared(style, renderer, &style.prepare(text))
}

/// Lay out and serialize; `max_width`/`max_height` crop the finished box.
pub(crate) fn render(style: &Style, renderer: &Renderer, text: &str) -> String {
    let content = style.prepare(text);
    if style.is_plain() {
        return content;
    }
    let grid = compose_prepared(style, renderer, &content);
    let limit = |n: u16| if n == 0 { usize::MAX } else { n as usize };
    grid.render_clipped(limit(style.get_max_width()), limit(style.get_max_height()))
}

/// Paint the style's stored string into `area` of an existing grid.
pub(crate) fn draw(style: &Style, grid: &mut Grid, area: Rect, renderer: &Renderer) {
    let area = area.intersect(&grid.bounds());
    if area.is_empty() {
        return;
    }
    let frame = Frame::of(style, renderer);
    let regions = frame.regions(area);
    let content = style.prepare("");
    let body = if style.get_inline() {
        content
    } else {
        wrap(&content, regions.content.width as usize)
    };
    paint(style, renderer, grid, &frame, &regions, &body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorProfile, ConcreteColor, RgbColor};

    fn ascii() -> Renderer {
        Renderer::new().with_color_profile(ColorProfile::Ascii)
    }

    fn render(style: &Style, text: &str) -> String {
        style.render_with(&ascii(), text)
    }

    #[test]
    fn regions_nest_and_partition() {
        let r = BoxRegions::compute(
            Rect::new(0, 0, 10, 6),
            Sides::all(1),
            Sides::all(1),
            Sides::new(0, 1, 0, 1),
        );
        assert_eq!(r.border, Rect::new(1, 1, 8, 4));
        assert_eq!(r.padding, Rect::new(2, 2, 6, 2));
        assert_eq!(r.content, Rect::new(3, 2, 4, 2));
        assert!(r.is_partition());
        assert_eq!(r.region_at(0, 0), Some(Region::Margin));
        assert_eq!(r.region_at(1, 3), Some(Region::Border));
        assert_eq!(r.region_at(2, 2), Some(Region::Padding));
        assert_eq!(r.region_at(3, 2), Some(Region::Content));
        assert_eq!(r.region_at(10, 0), None);
    }

    #[test]
    fn regions_saturate_when_frame_is_too_big() {
        let r = BoxRegions::compute(
            Rect::new(0, 0, 3, 2),
            Sides::all(2),
            Sides::all(1),
            Sides::all(1),
        );
        assert!(r.content.is_empty());
        assert!(r.is_partition());
    }

    #[test]
    fn canvas_spans_match_painted_areas() {
        let regions = BoxRegions::compute(
            Rect::new(1, 1, 9, 7),
            Sides::new(1, 2, 0, 1),
            Sides::all(1),
            Sides::new(1, 0, 0, 2),
        );
        let mut grid = Grid::new(12, 9);
        let canvas = RegionCanvas::split(&mut grid, &regions);
        for region in Region::ALL {
            assert_eq!(
                canvas.cell_count(region),
                regions.painted_area(region),
                "{region:?}"
            );
            for span in canvas.spans(region) {
                for dx in 0..span.width() as u16 {
                    assert_eq!(regions.region_at(span.x + dx, span.y), Some(region));
                }
            }
        }
    }

    #[test]
    fn span_set_is_checked() {
        let mut cells = vec![Cell::blank(); 3];
        let mut span = Span {
            x: 4,
            y: 0,
            cells: &mut cells,
        };
        assert!(span.set(5, Cell::new('x', 1, CellStyle::PLAIN)));
        assert!(!span.set(3, Cell::blank()));
        assert!(!span.set(7, Cell::blank()));
        assert_eq!(cells[1].content, "x");
    }

    #[test]
    fn normal_border_around_text() {
        let style = Style::new().border(Border::normal());
        assert_eq!(render(&style, "Hello"), "┌─────┐\n│Hello│\n└─────┘");
    }

    #[test]
    fn explicit_size_fills_area() {
        let style = Style::new().width(7).height(3);
        assert_eq!(render(&style, "Hello"), "Hello  \n       \n       ");
    }

    #[test]
    fn horizontal_and_vertical_alignment() {
        let style = Style::new().width(10).align(Position::Center);
        assert_eq!(render(&style, "Hello"), "  Hello   ");
        let style = Style::new()
            .width(3)
            .height(3)
            .align_values(&[Position::Right, Position::Bottom]);
        assert_eq!(render(&style, "x"), "   \n   \n  x");
    }

    #[test]
    fn short_lines_are_aligned_within_the_block() {
        let style = Style::new().align(Position::Right).bold().unset_bold().italic();
        let grid = compose(&style, &ascii(), "abc\nx");
        assert_eq!(grid.cell(2, 1).map(|c| c.content.as_str()), Some("x"));
    }

    #[test]
    fn content_wraps_to_width() {
        let style = Style::new().width(7).padding_left(1).padding_right(1);
        assert_eq!(render(&style, "hello world"), " hello \n world ");
    }

    #[test]
    fn explicit_height_clips_rows() {
        let style = Style::new().height(2);
        assert_eq!(render(&style, "a\nb\nc"), "a\nb");
    }

    #[test]
    fn margins_use_margin_char() {
        let style = Style::new().margin((0, 1)).margin_char('.');
        assert_eq!(render(&style, "x"), ".x.");
        let style = Style::new().margin(1);
        assert_eq!(render(&style, "x"), "   \n x \n   ");
    }

    #[test]
    fn wide_fill_chars_fall_back_to_space() {
        let style = Style::new().padding_left(1).padding_char('日');
        assert_eq!(render(&style, "x"), " x");
        let style = Style::new().padding_left(2).padding_char('~');
        assert_eq!(render(&style, "x"), "~~x");
    }

    #[test]
    fn partial_border_edges() {
        let style = Style::new()
            .border(Border::normal())
            .border_top(true)
            .border_bottom(true);
        assert_eq!(render(&style, "ab"), "──\nab\n──");
        let style = Style::new().border(Border::rounded()).border_sides(&[false, true]);
        assert_eq!(render(&style, "ab"), "│ab│");
    }

    #[test]
    fn inline_ignores_frame() {
        let style = Style::new()
            .inline()
            .border(Border::normal())
            .padding(2)
            .margin(1);
        assert_eq!(render(&style, "a\nb"), "ab");
    }

    #[test]
    fn max_size_crops_the_box() {
        let style = Style::new().border(Border::normal()).max_width(4);
        assert_eq!(render(&style, "Hello"), "┌───\n│Hel\n└───");
        let style = Style::new().border(Border::normal()).max_height(2);
        assert_eq!(render(&style, "Hi"), "┌──┐\n│Hi│");
    }

    #[test]
    fn max_width_wider_than_box_keeps_wrapped_text() {
        let style = Style::new().width(6).max_width(10);
        assert_eq!(
            render(&style, "aaaaa bbbbb ccccc"),
            "aaaaa \nbbbbb \nccccc "
        );
        let style = Style::new().width(6).max_width(10).max_height(2);
        assert_eq!(render(&style, "aaaaa bbbbb ccccc"), "aaaaa \nbbbbb ");
    }

    #[test]
    fn padding_takes_style_background() {
        let style = Style::new().background("#0000ff").padding_left(1);
        let grid = compose(&style, &Renderer::new(), "x");
        let blue = Some(ConcreteColor::Rgb(RgbColor::new(0, 0, 255)));
        assert_eq!(grid.cell(0, 0).and_then(|c| c.style.bg), blue);
        assert_eq!(grid.cell(1, 0).and_then(|c| c.style.bg), blue);
    }

    #[test]
    fn margin_background_and_border_colors() {
        let style = Style::new()
            .margin_left(1)
            .margin_background("1")
            .border(Border::normal())
            .border_foreground("2")
            .foreground("3");
        let grid = compose(&style, &Renderer::new(), "x");
        let cell = |x, y| grid.cell(x, y).map(|c| c.style).unwrap_or_default();
        assert_eq!(cell(0, 1).bg, Some(ConcreteColor::Basic(1)));
        assert_eq!(cell(1, 0).fg, Some(ConcreteColor::Basic(2)));
        assert_eq!(cell(2, 1).fg, Some(ConcreteColor::Basic(3)));
    }

    #[test]
    fn border_colors_default_to_style_colors() {
        let style = Style::new().border(Border::normal()).foreground("5");
        let grid = compose(&style, &Renderer::new(), "x");
        assert_eq!(
            grid.cell(0, 0).and_then(|c| c.style.fg),
            Some(ConcreteColor::Basic(5))
        );
    }

    #[test]
    fn embedded_colors_win_over_style() {
        let style = Style::new().foreground("2");
        let grid = compose(&style, &Renderer::new(), "\x1b[31ma\x1b[0mb");
        assert_eq!(grid.cell(0, 0).and_then(|c| c.style.fg), Some(ConcreteColor::Basic(1)));
        assert_eq!(grid.cell(1, 0).and_then(|c| c.style.fg), Some(ConcreteColor::Basic(2)));
    }

    #[test]
    fn underline_and_strikethrough_on_spaces() {
        let attrs_at = |style: &Style, x| {
            compose(style, &ascii(), "a b")
                .cell(x, 0)
                .map(|c| c.style.attrs)
                .unwrap_or_default()
        };
        let style = Style::new().underline();
        assert!(attrs_at(&style, 1).contains(TextAttrs::UNDERLINE));
        let style = Style::new().underline().underline_spaces(false);
        assert!(!attrs_at(&style, 1).contains(TextAttrs::UNDERLINE));
        assert!(attrs_at(&style, 0).contains(TextAttrs::UNDERLINE));

        let style = Style::new().strikethrough();
        assert!(!attrs_at(&style, 1).contains(TextAttrs::STRIKETHROUGH));
        let style = style.strikethrough_spaces(true);
        assert!(attrs_at(&style, 1).contains(TextAttrs::STRIKETHROUGH));
    }

    #[test]
    fn serialized_styles_reset_per_row() {
        let style = Style::new().bold().width(2);
        assert_eq!(
            render(&style, "a\nb"),
            "\x1b[1ma\x1b[0m \n\x1b[1mb\x1b[0m "
        );
    }

    #[test]
    fn wide_runes_in_content() {
        let style = Style::new().border(Border::normal());
        assert_eq!(render(&style, "日本"), "┌────┐\n│日本│\n└────┘");
        let style = Style::new().width(3);
        assert_eq!(render(&style, "日本"), "日 \n本 ");
    }

    #[test]
    fn draw_into_existing_grid() {
        let mut grid = Grid::new(6, 4);
        grid.fill(grid.bounds(), &Cell::new('.', 1, CellStyle::PLAIN));
        Style::new()
            .border(Border::ascii())
            .set_string("ok")
            .draw(&mut grid, Rect::new(1, 0, 4, 3), &ascii());
        assert_eq!(grid.render(), ".+--+.\n.|ok|.\n.+--+.\n......");
    }

    #[test]
    fn draw_clips_area_to_grid() {
        let mut grid = Grid::new(3, 1);
        Style::new()
            .set_string("abcdef")
            .bold()
            .draw(&mut grid, Rect::new(1, 0, 10, 5), &ascii());
        assert_eq!(grid.cell(0, 0).map(|c| c.style), Some(CellStyle::PLAIN));
        assert_eq!(grid.cell(1, 0).map(|c| c.content.as_str()), Some("a"));
    }
}
