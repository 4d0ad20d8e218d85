//! Style definition and builder.
//!
//! The [`Style`] struct describes a box: content, spacing, borders, colors and
//! text attributes. Builders take the style by value and return the modified
//! copy, so a base style can be cloned and specialized freely.
//!
//! # Example
//!
//! ```rust
//! use gridgloss::{Border, ColorProfile, Renderer, Style};
//!
//! let style = Style::new()
//!     .foreground("#ff0000")
//!     .border(Border::rounded())
//!     .padding((0, 1));
//!
//! let plain = Renderer::new().with_color_profile(ColorProfile::Ascii);
//! assert_eq!(style.render_with(&plain, "Hi"), "╭────╮\n│ Hi │\n╰────╯");
//! ```

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::border::{Border, BorderEdges, BorderGlyphs};
use crate::cell::{CellStyle, TextAttrs};
use crate::color::{Color, NoColor, TerminalColor};
use crate::grid::{Grid, Rect};
use crate::layout;
use crate::position::{Position, Sides};
use crate::renderer::{Renderer, default_renderer};

bitflags! {
    /// Flags indicating which style properties are explicitly set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Props: u64 {
        // Boolean attributes
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const REVERSE = 1 << 4;
        const BLINK = 1 << 5;
        const FAINT = 1 << 6;
        const UNDERLINE_SPACES = 1 << 7;
        const STRIKETHROUGH_SPACES = 1 << 8;

        // Value properties
        const FOREGROUND = 1 << 10;
        const BACKGROUND = 1 << 11;
        const WIDTH = 1 << 12;
        const HEIGHT = 1 << 13;
        const ALIGN_HORIZONTAL = 1 << 14;
        const ALIGN_VERTICAL = 1 << 15;

        // Padding
        const PADDING_TOP = 1 << 16;
        const PADDING_RIGHT = 1 << 17;
        const PADDING_BOTTOM = 1 << 18;
        const PADDING_LEFT = 1 << 19;
        const PADDING_CHAR = 1 << 20;

        // Margin
        const MARGIN_TOP = 1 << 21;
        const MARGIN_RIGHT = 1 << 22;
        const MARGIN_BOTTOM = 1 << 23;
        const MARGIN_LEFT = 1 << 24;
        const MARGIN_BACKGROUND = 1 << 25;
        const MARGIN_CHAR = 1 << 26;

        // Border
        const BORDER_STYLE = 1 << 27;
        const BORDER_TOP = 1 << 28;
        const BORDER_RIGHT = 1 << 29;
        const BORDER_BOTTOM = 1 << 30;
        const BORDER_LEFT = 1 << 31;

        const BORDER_TOP_FG = 1 << 32;
        const BORDER_RIGHT_FG = 1 << 33;
        const BORDER_BOTTOM_FG = 1 << 34;
        const BORDER_LEFT_FG = 1 << 35;

        const BORDER_TOP_BG = 1 << 36;
        const BORDER_RIGHT_BG = 1 << 37;
        const BORDER_BOTTOM_BG = 1 << 38;
        const BORDER_LEFT_BG = 1 << 39;

        // Other
        const INLINE = 1 << 40;
        const MAX_WIDTH = 1 << 41;
        const MAX_HEIGHT = 1 << 42;
        const TAB_WIDTH = 1 << 43;
        const TRANSFORM = 1 << 44;

        const PADDING = Self::PADDING_TOP.bits()
            | Self::PADDING_RIGHT.bits()
            | Self::PADDING_BOTTOM.bits()
            | Self::PADDING_LEFT.bits();
        const MARGIN = Self::MARGIN_TOP.bits()
            | Self::MARGIN_RIGHT.bits()
            | Self::MARGIN_BOTTOM.bits()
            | Self::MARGIN_LEFT.bits();
        const BORDER_SIDES = Self::BORDER_TOP.bits()
            | Self::BORDER_RIGHT.bits()
            | Self::BORDER_BOTTOM.bits()
            | Self::BORDER_LEFT.bits();
        const BORDER_FG = Self::BORDER_TOP_FG.bits()
            | Self::BORDER_RIGHT_FG.bits()
            | Self::BORDER_BOTTOM_FG.bits()
            | Self::BORDER_LEFT_FG.bits();
        const BORDER_BG = Self::BORDER_TOP_BG.bits()
            | Self::BORDER_RIGHT_BG.bits()
            | Self::BORDER_BOTTOM_BG.bits()
            | Self::BORDER_LEFT_BG.bits();
    }
}

bitflags! {
    /// Boolean attribute values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attrs: u16 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const REVERSE = 1 << 4;
        const BLINK = 1 << 5;
        const FAINT = 1 << 6;
        const UNDERLINE_SPACES = 1 << 7;
        const STRIKETHROUGH_SPACES = 1 << 8;
        const INLINE = 1 << 10;
    }
}

/// Type alias for transform functions.
pub type TransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

const DEFAULT_TAB_WIDTH: i8 = 4;

/// Border edge order used by the per-edge color arrays.
const TOP: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const LEFT: usize = 3;

const EDGE_FG: [Props; 4] = [
    Props::BORDER_TOP_FG,
    Props::BORDER_RIGHT_FG,
    Props::BORDER_BOTTOM_FG,
    Props::BORDER_LEFT_FG,
];
const EDGE_BG: [Props; 4] = [
    Props::BORDER_TOP_BG,
    Props::BORDER_RIGHT_BG,
    Props::BORDER_BOTTOM_BG,
    Props::BORDER_LEFT_BG,
];

/// Indices into a one-to-four element CSS shorthand, in top/right/bottom/left order.
fn shorthand(len: usize) -> Option<[usize; 4]> {
    match len {
        1 => Some([0, 0, 0, 0]),
        2 => Some([0, 1, 0, 1]),
        3 => Some([0, 1, 2, 1]),
        4 => Some([0, 1, 2, 3]),
        _ => None,
    }
}

/// A terminal style definition.
#[derive(Clone)]
pub struct Style {
    /// Which properties are set.
    props: Props,
    /// Boolean attribute values.
    attrs: Attrs,

    fg_color: Option<Box<dyn TerminalColor>>,
    bg_color: Option<Box<dyn TerminalColor>>,

    width: u16,
    height: u16,
    max_width: u16,
    max_height: u16,

    align_horizontal: Position,
    align_vertical: Position,

    /// Padding (inner spacing).
    padding: Sides<u16>,
    padding_char: char,
    /// Margin (outer spacing).
    margin: Sides<u16>,
    margin_char: char,
    margin_bg_color: Option<Box<dyn TerminalColor>>,

    border_style: Border,
    /// Explicitly chosen border edges.
    border_edges: BorderEdges,
    /// Border foreground colors, top/right/bottom/left.
    border_fg: [Option<Box<dyn TerminalColor>>; 4],
    /// Border background colors, top/right/bottom/left.
    border_bg: [Option<Box<dyn TerminalColor>>; 4],

    /// Tab width (-1 = no conversion, 0 = remove, >0 = spaces).
    tab_width: i8,

    transform: Option<TransformFn>,

    /// String rendered by `Display` and prepended to rendered text.
    value: String,

    renderer: Option<Arc<Renderer>>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            props: Props::empty(),
            attrs: Attrs::empty(),
            fg_color: None,
            bg_color: None,
            width: 0,
            height: 0,
            max_width: 0,
            max_height: 0,
            align_horizontal: Position::Left,
            align_vertical: Position::Top,
            padding: Sides::default(),
            padding_char: ' ',
            margin: Sides::default(),
            margin_char: ' ',
            margin_bg_color: None,
            border_style: Border::none(),
            border_edges: BorderEdges::none(),
            border_fg: Default::default(),
            border_bg: Default::default(),
            tab_width: DEFAULT_TAB_WIDTH,
            transform: None,
            value: String::new(),
            renderer: None,
        }
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("props", &self.props)
            .field("attrs", &self.attrs)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("padding", &self.padding)
            .field("margin", &self.margin)
            .field("border_edges", &self.border_edges)
            .field("value", &self.value)
            .finish()
    }
}

impl fmt::Display for Style {
    /// Renders the string stored with [`Style::set_string`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(""))
    }
}

impl Style {
    /// Creates a new empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the underlying string value for this style.
    pub fn set_string(mut self, s: impl Into<String>) -> Self {
        self.value = s.into();
        self
    }

    /// Get the underlying string value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Remove the stored string value.
    pub fn unset_string(mut self) -> Self {
        self.value.clear();
        self
    }

    fn set_attr(mut self, prop: Props, attr: Attrs, on: bool) -> Self {
        self.props |= prop;
        self.attrs.set(attr, on);
        self
    }

    fn unset_attr(mut self, prop: Props, attr: Attrs) -> Self {
        self.props.remove(prop);
        self.attrs.remove(attr);
        self
    }

    fn attr(&self, attr: Attrs) -> bool {
        self.attrs.contains(attr)
    }

    // ==================== Boolean Attributes ====================

    /// Enable bold text.
    pub fn bold(self) -> Self {
        self.set_attr(Props::BOLD, Attrs::BOLD, true)
    }

    /// Enable italic text.
    pub fn italic(self) -> Self {
        self.set_attr(Props::ITALIC, Attrs::ITALIC, true)
    }

    /// Enable underlined text.
    pub fn underline(self) -> Self {
        self.set_attr(Props::UNDERLINE, Attrs::UNDERLINE, true)
    }

    /// Enable strikethrough text.
    pub fn strikethrough(self) -> Self {
        self.set_attr(Props::STRIKETHROUGH, Attrs::STRIKETHROUGH, true)
    }

    /// Enable reverse video (swap fg/bg).
    pub fn reverse(self) -> Self {
        self.set_attr(Props::REVERSE, Attrs::REVERSE, true)
    }

    /// Enable blinking text.
    pub fn blink(self) -> Self {
        self.set_attr(Props::BLINK, Attrs::BLINK, true)
    }

    /// Enable faint/dim text.
    pub fn faint(self) -> Self {
        self.set_attr(Props::FAINT, Attrs::FAINT, true)
    }

    /// Set whether underlining extends to spaces. On by default.
    pub fn underline_spaces(self, v: bool) -> Self {
        self.set_attr(Props::UNDERLINE_SPACES, Attrs::UNDERLINE_SPACES, v)
    }

    /// Set whether strikethrough extends to spaces. Off by default.
    pub fn strikethrough_spaces(self, v: bool) -> Self {
        self.set_attr(Props::STRIKETHROUGH_SPACES, Attrs::STRIKETHROUGH_SPACES, v)
    }

    // ==================== Colors ====================

    /// Set the foreground color.
    pub fn foreground(self, color: impl Into<String>) -> Self {
        self.foreground_color(Color::new(color))
    }

    /// Set the foreground to a specific color type.
    pub fn foreground_color(mut self, color: impl TerminalColor + 'static) -> Self {
        self.props |= Props::FOREGROUND;
        self.fg_color = Some(Box::new(color));
        self
    }

    /// Remove the foreground color.
    pub fn no_foreground(self) -> Self {
        self.foreground_color(NoColor)
    }

    /// Set the background color.
    pub fn background(self, color: impl Into<String>) -> Self {
        self.background_color(Color::new(color))
    }

    /// Set the background to a specific color type.
    pub fn background_color(mut self, color: impl TerminalColor + 'static) -> Self {
        self.props |= Props::BACKGROUND;
        self.bg_color = Some(Box::new(color));
        self
    }

    /// Remove the background color.
    pub fn no_background(self) -> Self {
        self.background_color(NoColor)
    }

    // ==================== Dimensions ====================

    /// Set the block width, padding and border included. 0 means unconstrained.
    pub fn width(mut self, w: u16) -> Self {
        self.props |= Props::WIDTH;
        self.width = w;
        self
    }

    /// Set the block height, padding and border included. 0 means unconstrained.
    pub fn height(mut self, h: u16) -> Self {
        self.props |= Props::HEIGHT;
        self.height = h;
        self
    }

    /// Set the maximum width.
    pub fn max_width(mut self, w: u16) -> Self {
        self.props |= Props::MAX_WIDTH;
        self.max_width = w;
        self
    }

    /// Set the maximum height.
    pub fn max_height(mut self, h: u16) -> Self {
        self.props |= Props::MAX_HEIGHT;
        self.max_height = h;
        self
    }

    // ==================== Alignment ====================

    /// Set horizontal alignment.
    pub fn align(self, p: Position) -> Self {
        self.align_horizontal(p)
    }

    /// Set horizontal alignment.
    pub fn align_horizontal(mut self, p: Position) -> Self {
        self.props |= Props::ALIGN_HORIZONTAL;
        self.align_horizontal = p;
        self
    }

    /// Set vertical alignment.
    pub fn align_vertical(mut self, p: Position) -> Self {
        self.props |= Props::ALIGN_VERTICAL;
        self.align_vertical = p;
        self
    }

    /// Horizontal, then vertical alignment. Other lengths are ignored.
    pub fn align_values(self, positions: &[Position]) -> Self {
        match *positions {
            [h] => self.align_horizontal(h),
            [h, v] => self.align_horizontal(h).align_vertical(v),
            _ => self,
        }
    }

    // ==================== Padding ====================

    /// Set padding on all sides (CSS shorthand).
    pub fn padding(mut self, sides: impl Into<Sides<u16>>) -> Self {
        self.props |= Props::PADDING;
        self.padding = sides.into();
        self
    }

    /// CSS shorthand padding from one to four values. Other lengths are ignored.
    pub fn padding_values(self, values: &[u16]) -> Self {
        match Sides::from_slice(values) {
            Some(sides) => self.padding(sides),
            None => self,
        }
    }

    /// Set top padding.
    pub fn padding_top(mut self, n: u16) -> Self {
        self.props |= Props::PADDING_TOP;
        self.padding.top = n;
        self
    }

    /// Set right padding.
    pub fn padding_right(mut self, n: u16) -> Self {
        self.props |= Props::PADDING_RIGHT;
        self.padding.right = n;
        self
    }

    /// Set bottom padding.
    pub fn padding_bottom(mut self, n: u16) -> Self {
        self.props |= Props::PADDING_BOTTOM;
        self.padding.bottom = n;
        self
    }

    /// Set left padding.
    pub fn padding_left(mut self, n: u16) -> Self {
        self.props |= Props::PADDING_LEFT;
        self.padding.left = n;
        self
    }

    /// Set the rune padding is filled with. Wide runes fall back to a space.
    pub fn padding_char(mut self, c: char) -> Self {
        self.props |= Props::PADDING_CHAR;
        self.padding_char = c;
        self
    }

    // ==================== Margin ====================

    /// Set margin on all sides (CSS shorthand).
    pub fn margin(mut self, sides: impl Into<Sides<u16>>) -> Self {
        self.props |= Props::MARGIN;
        self.margin = sides.into();
        self
    }

    /// CSS shorthand margins from one to four values. Other lengths are ignored.
    pub fn margin_values(self, values: &[u16]) -> Self {
        match Sides::from_slice(values) {
            Some(sides) => self.margin(sides),
            None => self,
        }
    }

    /// Set top margin.
    pub fn margin_top(mut self, n: u16) -> Self {
        self.props |= Props::MARGIN_TOP;
        self.margin.top = n;
        self
    }

    /// Set right margin.
    pub fn margin_right(mut self, n: u16) -> Self {
        self.props |= Props::MARGIN_RIGHT;
        self.margin.right = n;
        self
    }

    /// Set bottom margin.
    pub fn margin_bottom(mut self, n: u16) -> Self {
        self.props |= Props::MARGIN_BOTTOM;
        self.margin.bottom = n;
        self
    }

    /// Set left margin.
    pub fn margin_left(mut self, n: u16) -> Self {
        self.props |= Props::MARGIN_LEFT;
        self.margin.left = n;
        self
    }

    /// Set the rune margins are filled with.
    pub fn margin_char(mut self, c: char) -> Self {
        self.props |= Props::MARGIN_CHAR;
        self.margin_char = c;
        self
    }

    /// Set margin background color.
    pub fn margin_background(self, color: impl Into<String>) -> Self {
        self.margin_background_color(Color::new(color))
    }

    /// Set margin background to a specific color type.
    pub fn margin_background_color(mut self, color: impl TerminalColor + 'static) -> Self {
        self.props |= Props::MARGIN_BACKGROUND;
        self.margin_bg_color = Some(Box::new(color));
        self
    }

    // ==================== Border ====================

    /// Set the border glyphs. Without explicit edges, all four are drawn.
    pub fn border(self, border: Border) -> Self {
        self.border_style(border)
    }

    /// Set the border glyphs.
    pub fn border_style(mut self, border: Border) -> Self {
        self.props |= Props::BORDER_STYLE;
        self.border_style = border;
        self
    }

    /// Enable or disable top border.
    pub fn border_top(mut self, v: bool) -> Self {
        self.props |= Props::BORDER_TOP;
        self.border_edges.top = v;
        self
    }

    /// Enable or disable right border.
    pub fn border_right(mut self, v: bool) -> Self {
        self.props |= Props::BORDER_RIGHT;
        self.border_edges.right = v;
        self
    }

    /// Enable or disable bottom border.
    pub fn border_bottom(mut self, v: bool) -> Self {
        self.props |= Props::BORDER_BOTTOM;
        self.border_edges.bottom = v;
        self
    }

    /// Enable or disable left border.
    pub fn border_left(mut self, v: bool) -> Self {
        self.props |= Props::BORDER_LEFT;
        self.border_edges.left = v;
        self
    }

    /// Choose edges with CSS shorthand. Other lengths are ignored.
    ///
    /// ```rust
    /// use gridgloss::{Border, Style};
    ///
    /// // top and bottom only
    /// let s = Style::new().border(Border::normal()).border_sides(&[true, false]);
    /// assert!(s.get_border_top() && !s.get_border_left());
    /// ```
    pub fn border_sides(mut self, sides: &[bool]) -> Self {
        let Some(sides) = Sides::from_slice(sides) else {
            return self;
        };
        self.props |= Props::BORDER_SIDES;
        self.border_edges = BorderEdges {
            top: sides.top,
            right: sides.right,
            bottom: sides.bottom,
            left: sides.left,
        };
        self
    }

    fn set_edge_color(mut self, fg: bool, edge: usize, color: Box<dyn TerminalColor>) -> Self {
        if fg {
            self.props |= EDGE_FG[edge];
            self.border_fg[edge] = Some(color);
        } else {
            self.props |= EDGE_BG[edge];
            self.border_bg[edge] = Some(color);
        }
        self
    }

    fn set_edge_colors(mut self, fg: bool, colors: &[Color]) -> Self {
        let Some(indices) = shorthand(colors.len()) else {
            return self;
        };
        for (edge, i) in indices.into_iter().enumerate() {
            self = self.set_edge_color(fg, edge, Box::new(colors[i].clone()));
        }
        self
    }

    /// Set border foreground color for all sides.
    pub fn border_foreground(self, color: impl Into<String>) -> Self {
        self.border_foregrounds(&[Color::new(color)])
    }

    /// Border foreground colors with CSS shorthand. Other lengths are ignored.
    pub fn border_foregrounds(self, colors: &[Color]) -> Self {
        self.set_edge_colors(true, colors)
    }

    /// Set the top border foreground.
    pub fn border_top_foreground(self, color: impl TerminalColor + 'static) -> Self {
        self.set_edge_color(true, TOP, Box::new(color))
    }

    /// Set the right border foreground.
    pub fn border_right_foreground(self, color: impl TerminalColor + 'static) -> Self {
        self.set_edge_color(true, RIGHT, Box::new(color))
    }

    /// Set the bottom border foreground.
    pub fn border_bottom_foreground(self, color: impl TerminalColor + 'static) -> Self {
        self.set_edge_color(true, BOTTOM, Box::new(color))
    }

    /// Set the left border foreground.
    pub fn border_left_foreground(self, color: impl TerminalColor + 'static) -> Self {
        self.set_edge_color(true, LEFT, Box::new(color))
    }

    /// Set border background color for all sides.
    pub fn border_background(self, color: impl Into<String>) -> Self {
        self.border_backgrounds(&[Color::new(color)])
    }

    /// Border background colors with CSS shorthand. Other lengths are ignored.
    pub fn border_backgrounds(self, colors: &[Color]) -> Self {
        self.set_edge_colors(false, colors)
    }

    /// Set the top border background.
    pub fn border_top_background(self, color: impl TerminalColor + 'static) -> Self {
        self.set_edge_color(false, TOP, Box::new(color))
    }

    /// Set the right border background.
    pub fn border_right_background(self, color: impl TerminalColor + 'static) -> Self {
        self.set_edge_color(false, RIGHT, Box::new(color))
    }

    /// Set the bottom border background.
    pub fn border_bottom_background(self, color: impl TerminalColor + 'static) -> Self {
        self.set_edge_color(false, BOTTOM, Box::new(color))
    }

    /// Set the left border background.
    pub fn border_left_background(self, color: impl TerminalColor + 'static) -> Self {
        self.set_edge_color(false, LEFT, Box::new(color))
    }

    // ==================== Other ====================

    /// Enable inline mode: newlines are removed and padding, border and
    /// margins are ignored.
    pub fn inline(self) -> Self {
        self.set_attr(Props::INLINE, Attrs::INLINE, true)
    }

    /// Set tab width (-1 = no conversion, 0 = remove tabs).
    pub fn tab_width(mut self, n: i8) -> Self {
        self.props |= Props::TAB_WIDTH;
        self.tab_width = n.max(-1);
        self
    }

    /// Set text transform function, applied before layout.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.props |= Props::TRANSFORM;
        self.transform = Some(Arc::new(f));
        self
    }

    /// Render against `r` instead of the default renderer.
    pub fn renderer(mut self, r: Arc<Renderer>) -> Self {
        self.renderer = Some(r);
        self
    }

    // ==================== Unset ====================

    pub fn unset_bold(self) -> Self {
        self.unset_attr(Props::BOLD, Attrs::BOLD)
    }

    pub fn unset_italic(self) -> Self {
        self.unset_attr(Props::ITALIC, Attrs::ITALIC)
    }

    pub fn unset_underline(self) -> Self {
        self.unset_attr(Props::UNDERLINE, Attrs::UNDERLINE)
    }

    pub fn unset_strikethrough(self) -> Self {
        self.unset_attr(Props::STRIKETHROUGH, Attrs::STRIKETHROUGH)
    }

    pub fn unset_reverse(self) -> Self {
        self.unset_attr(Props::REVERSE, Attrs::REVERSE)
    }

    pub fn unset_blink(self) -> Self {
        self.unset_attr(Props::BLINK, Attrs::BLINK)
    }

    pub fn unset_faint(self) -> Self {
        self.unset_attr(Props::FAINT, Attrs::FAINT)
    }

    pub fn unset_underline_spaces(self) -> Self {
        self.unset_attr(Props::UNDERLINE_SPACES, Attrs::UNDERLINE_SPACES)
    }

    pub fn unset_strikethrough_spaces(self) -> Self {
        self.unset_attr(Props::STRIKETHROUGH_SPACES, Attrs::STRIKETHROUGH_SPACES)
    }

    pub fn unset_inline(self) -> Self {
        self.unset_attr(Props::INLINE, Attrs::INLINE)
    }

    pub fn unset_foreground(mut self) -> Self {
        self.props.remove(Props::FOREGROUND);
        self.fg_color = None;
        self
    }

    pub fn unset_background(mut self) -> Self {
        self.props.remove(Props::BACKGROUND);
        self.bg_color = None;
        self
    }

    pub fn unset_width(mut self) -> Self {
        self.props.remove(Props::WIDTH);
        self.width = 0;
        self
    }

    pub fn unset_height(mut self) -> Self {
        self.props.remove(Props::HEIGHT);
        self.height = 0;
        self
    }

    pub fn unset_max_width(mut self) -> Self {
        self.props.remove(Props::MAX_WIDTH);
        self.max_width = 0;
        self
    }

    pub fn unset_max_height(mut self) -> Self {
        self.props.remove(Props::MAX_HEIGHT);
        self.max_height = 0;
        self
    }

    /// Reset both alignments.
    pub fn unset_align(self) -> Self {
        self.unset_align_horizontal().unset_align_vertical()
    }

    pub fn unset_align_horizontal(mut self) -> Self {
        self.props.remove(Props::ALIGN_HORIZONTAL);
        self.align_horizontal = Position::Left;
        self
    }

    pub fn unset_align_vertical(mut self) -> Self {
        self.props.remove(Props::ALIGN_VERTICAL);
        self.align_vertical = Position::Top;
        self
    }

    pub fn unset_padding(mut self) -> Self {
        self.props.remove(Props::PADDING);
        self.padding = Sides::default();
        self
    }

    pub fn unset_padding_top(mut self) -> Self {
        self.props.remove(Props::PADDING_TOP);
        self.padding.top = 0;
        self
    }

    pub fn unset_padding_right(mut self) -> Self {
        self.props.remove(Props::PADDING_RIGHT);
        self.padding.right = 0;
        self
    }

    pub fn unset_padding_bottom(mut self) -> Self {
        self.props.remove(Props::PADDING_BOTTOM);
        self.padding.bottom = 0;
        self
    }

    pub fn unset_padding_left(mut self) -> Self {
        self.props.remove(Props::PADDING_LEFT);
        self.padding.left = 0;
        self
    }

    pub fn unset_padding_char(mut self) -> Self {
        self.props.remove(Props::PADDING_CHAR);
        self.padding_char = ' ';
        self
    }

    pub fn unset_margins(mut self) -> Self {
        self.props.remove(Props::MARGIN);
        self.margin = Sides::default();
        self
    }

    pub fn unset_margin_top(mut self) -> Self {
        self.props.remove(Props::MARGIN_TOP);
        self.margin.top = 0;
        self
    }

    pub fn unset_margin_right(mut self) -> Self {
        self.props.remove(Props::MARGIN_RIGHT);
        self.margin.right = 0;
        self
    }

    pub fn unset_margin_bottom(mut self) -> Self {
        self.props.remove(Props::MARGIN_BOTTOM);
        self.margin.bottom = 0;
        self
    }

    pub fn unset_margin_left(mut self) -> Self {
        self.props.remove(Props::MARGIN_LEFT);
        self.margin.left = 0;
        self
    }

    pub fn unset_margin_char(mut self) -> Self {
        self.props.remove(Props::MARGIN_CHAR);
        self.margin_char = ' ';
        self
    }

    pub fn unset_margin_background(mut self) -> Self {
        self.props.remove(Props::MARGIN_BACKGROUND);
        self.margin_bg_color = None;
        self
    }

    pub fn unset_border_style(mut self) -> Self {
        self.props.remove(Props::BORDER_STYLE);
        self.border_style = Border::none();
        self
    }

    pub fn unset_border_top(mut self) -> Self {
        self.props.remove(Props::BORDER_TOP);
        self.border_edges.top = false;
        self
    }

    pub fn unset_border_right(mut self) -> Self {
        self.props.remove(Props::BORDER_RIGHT);
        self.border_edges.right = false;
        self
    }

    pub fn unset_border_bottom(mut self) -> Self {
        self.props.remove(Props::BORDER_BOTTOM);
        self.border_edges.bottom = false;
        self
    }

    pub fn unset_border_left(mut self) -> Self {
        self.props.remove(Props::BORDER_LEFT);
        self.border_edges.left = false;
        self
    }

    /// Remove every border foreground color.
    pub fn unset_border_foreground(mut self) -> Self {
        self.props.remove(Props::BORDER_FG);
        self.border_fg = Default::default();
        self
    }

    /// Remove every border background color.
    pub fn unset_border_background(mut self) -> Self {
        self.props.remove(Props::BORDER_BG);
        self.border_bg = Default::default();
        self
    }

    pub fn unset_tab_width(mut self) -> Self {
        self.props.remove(Props::TAB_WIDTH);
        self.tab_width = DEFAULT_TAB_WIDTH;
        self
    }

    pub fn unset_transform(mut self) -> Self {
        self.props.remove(Props::TRANSFORM);
        self.transform = None;
        self
    }

    pub fn unset_renderer(mut self) -> Self {
        self.renderer = None;
        self
    }

    // ==================== Queries ====================

    /// Check if a property is set.
    pub fn is_set(&self, prop: Props) -> bool {
        self.props.contains(prop)
    }

    /// True when no property is set; rendering only converts tabs.
    pub fn is_plain(&self) -> bool {
        self.props.is_empty()
    }

    pub fn get_bold(&self) -> bool {
        self.attr(Attrs::BOLD)
    }

    pub fn get_italic(&self) -> bool {
        self.attr(Attrs::ITALIC)
    }

    pub fn get_underline(&self) -> bool {
        self.attr(Attrs::UNDERLINE)
    }

    pub fn get_strikethrough(&self) -> bool {
        self.attr(Attrs::STRIKETHROUGH)
    }

    pub fn get_reverse(&self) -> bool {
        self.attr(Attrs::REVERSE)
    }

    pub fn get_blink(&self) -> bool {
        self.attr(Attrs::BLINK)
    }

    pub fn get_faint(&self) -> bool {
        self.attr(Attrs::FAINT)
    }

    /// Whether spaces are underlined; true unless disabled.
    pub fn get_underline_spaces(&self) -> bool {
        !self.props.contains(Props::UNDERLINE_SPACES) || self.attr(Attrs::UNDERLINE_SPACES)
    }

    /// Whether spaces are struck through; false unless enabled.
    pub fn get_strikethrough_spaces(&self) -> bool {
        self.attr(Attrs::STRIKETHROUGH_SPACES)
    }

    pub fn get_inline(&self) -> bool {
        self.attr(Attrs::INLINE)
    }

    pub fn get_foreground(&self) -> Option<&dyn TerminalColor> {
        self.fg_color.as_deref()
    }

    pub fn get_background(&self) -> Option<&dyn TerminalColor> {
        self.bg_color.as_deref()
    }

    pub fn get_width(&self) -> u16 {
        self.width
    }

    pub fn get_height(&self) -> u16 {
        self.height
    }

    pub fn get_max_width(&self) -> u16 {
        self.max_width
    }

    pub fn get_max_height(&self) -> u16 {
        self.max_height
    }

    pub fn get_align_horizontal(&self) -> Position {
        self.align_horizontal
    }

    pub fn get_align_vertical(&self) -> Position {
        self.align_vertical
    }

    pub fn get_padding(&self) -> Sides<u16> {
        self.padding
    }

    pub fn get_padding_top(&self) -> u16 {
        self.padding.top
    }

    pub fn get_padding_right(&self) -> u16 {
        self.padding.right
    }

    pub fn get_padding_bottom(&self) -> u16 {
        self.padding.bottom
    }

    pub fn get_padding_left(&self) -> u16 {
        self.padding.left
    }

    pub fn get_horizontal_padding(&self) -> u16 {
        self.padding.horizontal()
    }

    pub fn get_vertical_padding(&self) -> u16 {
        self.padding.vertical()
    }

    pub fn get_padding_char(&self) -> char {
        self.padding_char
    }

    pub fn get_margin(&self) -> Sides<u16> {
        self.margin
    }

    pub fn get_margin_top(&self) -> u16 {
        self.margin.top
    }

    pub fn get_margin_right(&self) -> u16 {
        self.margin.right
    }

    pub fn get_margin_bottom(&self) -> u16 {
        self.margin.bottom
    }

    pub fn get_margin_left(&self) -> u16 {
        self.margin.left
    }

    pub fn get_horizontal_margins(&self) -> u16 {
        self.margin.horizontal()
    }

    pub fn get_vertical_margins(&self) -> u16 {
        self.margin.vertical()
    }

    pub fn get_margin_char(&self) -> char {
        self.margin_char
    }

    pub fn get_margin_background(&self) -> Option<&dyn TerminalColor> {
        self.margin_bg_color.as_deref()
    }

    pub fn get_border_style(&self) -> &Border {
        &self.border_style
    }

    /// The edges that will be drawn. Nothing is drawn without a border style.
    pub fn get_border_edges(&self) -> BorderEdges {
        if !self.props.contains(Props::BORDER_STYLE) || self.border_style.is_empty() {
            return BorderEdges::none();
        }
        self.border_edges
            .effective(true, self.props.intersects(Props::BORDER_SIDES))
    }

    pub fn get_border_top(&self) -> bool {
        self.get_border_edges().top
    }

    pub fn get_border_right(&self) -> bool {
        self.get_border_edges().right
    }

    pub fn get_border_bottom(&self) -> bool {
        self.get_border_edges().bottom
    }

    pub fn get_border_left(&self) -> bool {
        self.get_border_edges().left
    }

    /// Border foreground colors, top/right/bottom/left.
    pub fn get_border_foregrounds(&self) -> Sides<Option<&dyn TerminalColor>> {
        let [t, r, b, l] = &self.border_fg;
        Sides {
            top: t.as_deref(),
            right: r.as_deref(),
            bottom: b.as_deref(),
            left: l.as_deref(),
        }
    }

    /// Border background colors, top/right/bottom/left.
    pub fn get_border_backgrounds(&self) -> Sides<Option<&dyn TerminalColor>> {
        let [t, r, b, l] = &self.border_bg;
        Sides {
            top: t.as_deref(),
            right: r.as_deref(),
            bottom: b.as_deref(),
            left: l.as_deref(),
        }
    }

    /// Thickness of each border edge in cells.
    pub fn get_border_sizes(&self) -> Sides<u16> {
        BorderGlyphs::compose(
            &self.border_style,
            self.get_border_edges(),
            Sides::all(CellStyle::PLAIN),
        )
        .sizes()
    }

    pub fn get_border_top_size(&self) -> u16 {
        self.get_border_sizes().top
    }

    pub fn get_border_right_size(&self) -> u16 {
        self.get_border_sizes().right
    }

    pub fn get_border_bottom_size(&self) -> u16 {
        self.get_border_sizes().bottom
    }

    pub fn get_border_left_size(&self) -> u16 {
        self.get_border_sizes().left
    }

    pub fn get_horizontal_border_size(&self) -> u16 {
        self.get_border_sizes().horizontal()
    }

    pub fn get_vertical_border_size(&self) -> u16 {
        self.get_border_sizes().vertical()
    }

    /// Columns taken by margins, border and padding.
    pub fn get_horizontal_frame_size(&self) -> u16 {
        self.get_horizontal_margins()
            .saturating_add(self.get_horizontal_border_size())
            .saturating_add(self.get_horizontal_padding())
    }

    /// Rows taken by margins, border and padding.
    pub fn get_vertical_frame_size(&self) -> u16 {
        self.get_vertical_margins()
            .saturating_add(self.get_vertical_border_size())
            .saturating_add(self.get_vertical_padding())
    }

    /// `(horizontal, vertical)` frame size.
    pub fn get_frame_size(&self) -> (u16, u16) {
        (self.get_horizontal_frame_size(), self.get_vertical_frame_size())
    }

    /// Tab width, 4 unless set.
    pub fn get_tab_width(&self) -> i8 {
        self.tab_width
    }

    pub fn get_transform(&self) -> Option<&TransformFn> {
        self.transform.as_ref()
    }

    pub fn get_renderer(&self) -> Option<&Arc<Renderer>> {
        self.renderer.as_ref()
    }

    // ==================== Resolution ====================

    /// Text attributes as applied to cells.
    pub(crate) fn text_attrs(&self) -> TextAttrs {
        let mut out = TextAttrs::empty();
        for (attr, text) in [
            (Attrs::BOLD, TextAttrs::BOLD),
            (Attrs::FAINT, TextAttrs::FAINT),
            (Attrs::ITALIC, TextAttrs::ITALIC),
            (Attrs::UNDERLINE, TextAttrs::UNDERLINE),
            (Attrs::BLINK, TextAttrs::BLINK),
            (Attrs::REVERSE, TextAttrs::REVERSE),
            (Attrs::STRIKETHROUGH, TextAttrs::STRIKETHROUGH),
        ] {
            out.set(text, self.attrs.contains(attr));
        }
        out
    }

    /// Foreground, background and attributes resolved for `r`.
    pub(crate) fn cell_style(&self, r: &Renderer) -> CellStyle {
        CellStyle {
            fg: self.fg_color.as_deref().and_then(|c| r.resolve(c)),
            bg: self.bg_color.as_deref().and_then(|c| r.resolve(c)),
            attrs: self.text_attrs(),
        }
    }

    /// Margin fill style resolved for `r`.
    pub(crate) fn margin_cell_style(&self, r: &Renderer) -> CellStyle {
        CellStyle {
            bg: self.margin_bg_color.as_deref().and_then(|c| r.resolve(c)),
            ..CellStyle::PLAIN
        }
    }

    /// Border resolved for `r`; unset edge colors fall back to the style's colors.
    pub(crate) fn border_glyphs(&self, r: &Renderer) -> BorderGlyphs {
        let base = self.cell_style(r);
        let edge = |i: usize| CellStyle {
            fg: match &self.border_fg[i] {
                Some(c) => r.resolve(c.as_ref()),
                None => base.fg,
            },
            bg: match &self.border_bg[i] {
                Some(c) => r.resolve(c.as_ref()),
                None => base.bg,
            },
            attrs: TextAttrs::empty(),
        };
        let styles = Sides::new(edge(TOP), edge(RIGHT), edge(BOTTOM), edge(LEFT));
        BorderGlyphs::compose(&self.border_style, self.get_border_edges(), styles)
    }

    fn convert_tabs(&self, s: &str) -> String {
        match self.tab_width {
            -1 => s.to_string(),
            0 => s.replace('\t', ""),
            n => s.replace('\t', &" ".repeat(n as usize)),
        }
    }

    /// Content as it enters layout: stored string joined in front, transform
    /// applied, tabs converted and line endings normalized.
    ///
    /// `max_width`/`max_height` are not applied here; they crop the finished box.
    pub(crate) fn prepare(&self, text: &str) -> String {
        let mut s = match (self.value.is_empty(), text.is_empty()) {
            (true, _) => text.to_string(),
            (false, true) => self.value.clone(),
            (false, false) => format!("{} {}", self.value, text),
        };
        if let Some(transform) = &self.transform {
            s = transform(&s);
        }
        s = self.convert_tabs(&s);
        if self.props.is_empty() {
            return s;
        }
        s = s.replace("\r\n", "\n");
        if self.get_inline() {
            s = s.replace('\n', "");
        }
        s
    }

    // ==================== Rendering ====================

    /// Render the given text with this style applied.
    ///
    /// Uses the attached renderer, or the process default.
    pub fn render(&self, text: &str) -> String {
        match &self.renderer {
            Some(r) => layout::render(self, r, text),
            None => layout::render(self, &default_renderer(), text),
        }
    }

    /// Render against an explicit renderer.
    pub fn render_with(&self, renderer: &Renderer, text: &str) -> String {
        layout::render(self, renderer, text)
    }

    /// Paint the stored string into `area` of a caller-owned grid.
    ///
    /// The area acts as the total box size; content wraps to the space left
    /// inside margins, border and padding. Cells outside `area` are untouched.
    pub fn draw(&self, grid: &mut Grid, area: Rect, renderer: &Renderer) {
        layout::draw(self, grid, area, renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorProfile, RgbColor};

    fn ascii() -> Renderer {
        Renderer::new().with_color_profile(ColorProfile::Ascii)
    }

    #[test]
    fn test_style_builder() {
        let s = Style::new().bold().italic().foreground("#ff0000");
        assert!(s.is_set(Props::BOLD));
        assert!(s.is_set(Props::ITALIC));
        assert!(s.is_set(Props::FOREGROUND));
        assert!(s.get_bold() && s.get_italic() && !s.get_faint());
    }

    #[test]
    fn test_builders_copy_on_write() {
        let base = Style::new().padding(1);
        let derived = base.clone().padding_left(4).bold();
        assert_eq!(base.get_padding_left(), 1);
        assert!(!base.get_bold());
        assert_eq!(derived.get_padding_left(), 4);
        assert_eq!(derived.get_padding_top(), 1);
    }

    #[test]
    fn test_padding() {
        let s = Style::new().padding((1, 2));
        assert_eq!(s.get_padding(), Sides::new(1, 2, 1, 2));
        assert_eq!(s.get_horizontal_padding(), 4);
        assert_eq!(s.get_vertical_padding(), 2);
    }

    #[test]
    fn test_slice_shorthands_ignore_bad_lengths() {
        let s = Style::new().padding_values(&[1, 2, 3, 4, 5]);
        assert!(!s.is_set(Props::PADDING_TOP));
        let s = Style::new().margin_values(&[]);
        assert!(!s.is_set(Props::MARGIN_TOP));
        let s = Style::new().align_values(&[Position::Center; 3]);
        assert!(!s.is_set(Props::ALIGN_HORIZONTAL));
        let s = Style::new().border_sides(&[true; 5]);
        assert_eq!(s.get_border_edges(), BorderEdges::none());
        let s = Style::new().border_foregrounds(&[]);
        assert!(s.get_border_foregrounds().top.is_none());
    }

    #[test]
    fn test_slice_shorthands() {
        let s = Style::new().margin_values(&[1, 2, 3]);
        assert_eq!(s.get_margin(), Sides::new(1, 2, 3, 2));
        let s = Style::new().align_values(&[Position::Right, Position::Bottom]);
        assert_eq!(s.get_align_horizontal(), Position::Right);
        assert_eq!(s.get_align_vertical(), Position::Bottom);
        let s = Style::new().border_foregrounds(&[Color::from("1"), Color::from("2")]);
        let fg = s.get_border_foregrounds();
        let r = Renderer::new();
        assert_eq!(fg.top.and_then(|c| r.resolve(c)), fg.bottom.and_then(|c| r.resolve(c)));
        assert_ne!(fg.top.and_then(|c| r.resolve(c)), fg.left.and_then(|c| r.resolve(c)));
    }

    #[test]
    fn test_border_edges_act_as_all() {
        let s = Style::new().border(Border::normal());
        assert!(s.get_border_edges().is_all());
        let s = Style::new().border(Border::normal()).border_top(true);
        assert_eq!(
            s.get_border_edges(),
            BorderEdges {
                top: true,
                ..BorderEdges::none()
            }
        );
        assert_eq!(Style::new().get_border_edges(), BorderEdges::none());
    }

    #[test]
    fn test_frame_sizes() {
        let s = Style::new()
            .border(Border::normal())
            .padding((1, 2))
            .margin(1);
        assert_eq!(s.get_border_sizes(), Sides::all(1));
        assert_eq!(s.get_horizontal_frame_size(), 2 + 2 + 4);
        assert_eq!(s.get_frame_size(), (8, 6));
    }

    #[test]
    fn test_unset() {
        let s = Style::new()
            .bold()
            .width(10)
            .padding(2)
            .foreground("#fff")
            .unset_bold()
            .unset_width()
            .unset_padding()
            .unset_foreground();
        assert!(s.is_plain());
        assert!(!s.get_bold());
        assert_eq!(s.get_width(), 0);
        assert!(s.get_foreground().is_none());
    }

    #[test]
    fn test_spaces_defaults() {
        let s = Style::new();
        assert!(s.get_underline_spaces());
        assert!(!s.get_strikethrough_spaces());
        let s = s.underline_spaces(false).strikethrough_spaces(true);
        assert!(!s.get_underline_spaces());
        assert!(s.get_strikethrough_spaces());
        assert!(s.unset_underline_spaces().get_underline_spaces());
    }

    #[test]
    fn test_tab_width() {
        let text = "a\tb";
        assert_eq!(Style::new().bold().prepare(text), "a    b");
        assert_eq!(Style::new().tab_width(2).prepare(text), "a  b");
        assert_eq!(Style::new().tab_width(0).prepare(text), "ab");
        assert_eq!(Style::new().tab_width(-1).prepare(text), text);
        assert_eq!(Style::new().tab_width(-9).get_tab_width(), -1);
    }

    #[test]
    fn test_prepare_joins_value_and_transform() {
        let s = Style::new()
            .set_string("hello")
            .transform(|s: &str| s.to_uppercase());
        assert_eq!(s.prepare("world"), "HELLO WORLD");
        assert_eq!(s.prepare(""), "HELLO");
    }

    #[test]
    fn test_prepare_inline_and_limits() {
        let s = Style::new().inline();
        assert_eq!(s.prepare("a\r\nb\nc"), "abc");
        let s = Style::new().max_width(3).max_height(2);
        assert_eq!(s.prepare("abcdef\nxy\nzzz"), "abcdef\nxy\nzzz");
    }

    #[test]
    fn test_cell_style_resolution() {
        let s = Style::new().bold().foreground("#ff0000").background("4");
        let cs = s.cell_style(&Renderer::new());
        assert!(cs.attrs.contains(TextAttrs::BOLD));
        assert_eq!(cs.fg, Some(crate::color::ConcreteColor::Rgb(RgbColor::new(255, 0, 0))));
        assert_eq!(cs.bg, Some(crate::color::ConcreteColor::Basic(4)));
        assert!(s.cell_style(&ascii()).fg.is_none());
    }

    #[test]
    fn test_render_basic() {
        let s = Style::new().bold();
        let out = s.render_with(&ascii(), "Hello");
        assert_eq!(out, "\x1b[1mHello\x1b[0m");
    }

    #[test]
    fn test_render_keeps_text_after_stray_escape() {
        let out = Style::new().bold().render_with(&ascii(), "ok \x1b\x01visible");
        assert!(out.contains("visible"), "{out:?}");
    }

    #[test]
    fn test_plain_style_passthrough() {
        assert_eq!(Style::new().render_with(&ascii(), "a\tb"), "a    b");
    }

    #[test]
    fn test_display_renders_value() {
        let r = Arc::new(ascii());
        let s = Style::new().renderer(r).width(6).set_string("hi");
        assert_eq!(s.to_string(), "hi    ");
    }
}
