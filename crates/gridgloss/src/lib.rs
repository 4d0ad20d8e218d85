#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics and terminal UI code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::enum_glob_use)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::redundant_closure)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::single_match_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::new_without_default)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::manual_repeat_n)]
#![allow(clippy::if_not_else)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::same_item_push)]
#![allow(clippy::bool_to_int_with_if)]
#![allow(clippy::if_same_then_else)]
#![allow(clippy::branches_sharing_code)]
#![allow(clippy::items_after_test_module)]

//! # gridgloss
//!
//! Terminal styling and layout on a cell grid.
//!
//! A [`Style`] describes how a block of text should look: colors and text
//! attributes, explicit or maximum dimensions, alignment, padding, a border
//! and a margin. Rendering lays the text out as a [`Grid`] of styled cells and
//! serializes it back to a string with the smallest SGR transitions needed:
//! - **Colors**: ANSI, 256-color, true color and adaptive colors, downgraded
//!   to whatever the terminal's [`ColorProfile`] can show
//! - **Layout**: box regions (margin, border, padding, content) filled in parallel
//! - **Text**: word wrapping, truncation and width measurement that skips escapes
//!
//! ## Quick Start
//!
//! ```rust
//! use gridgloss::{Border, ColorProfile, Position, Renderer, Style};
//!
//! let ascii = Renderer::new().with_color_profile(ColorProfile::Ascii);
//! let style = Style::new()
//!     .width(8)
//!     .align(Position::Center)
//!     .border(Border::normal());
//!
//! assert_eq!(
//!     style.render_with(&ascii, "Hi"),
//!     "┌────────┐\n│   Hi   │\n└────────┘"
//! );
//! ```
//!
//! ## Style Builder
//!
//! Builders take the style by value and return it, so a base style is cloned
//! and extended:
//!
//! ```rust
//! use gridgloss::Style;
//!
//! let base = Style::new().bold();
//! let red = base.clone().foreground("#ff0000");
//! let blue = base.foreground("#0000ff");
//! assert!(red.get_bold() && blue.get_bold());
//! ```
//!
//! ## Colors
//!
//! ```rust
//! use gridgloss::{AdaptiveColor, Color, Style};
//!
//! // Hex and ANSI 256 colors
//! let style = Style::new().foreground("#ff00ff").background("236");
//!
//! // Chosen by the terminal's background
//! let adaptive = AdaptiveColor {
//!     light: Color::from("#000000"),
//!     dark: Color::from("#ffffff"),
//! };
//! let style = style.foreground_color(adaptive);
//! ```
//!
//! ## Layout
//!
//! Padding and margin take CSS shorthand:
//!
//! ```rust
//! use gridgloss::Style;
//!
//! let style = Style::new().padding(2);            // all sides
//! let style = style.padding((1, 2));              // vertical, horizontal
//! let style = style.padding((1, 2, 3));           // top, horizontal, bottom
//! let style = style.margin((1, 2, 3, 4));         // top, right, bottom, left
//! assert_eq!(style.get_horizontal_frame_size(), 4 + 6);
//! ```

pub mod ansi;
pub mod border;
pub mod cell;
pub mod color;
pub mod grid;
pub mod layout;
pub mod measure;
pub mod position;
pub mod profile;
pub mod query;
pub mod renderer;
pub mod style;
pub mod wrap;
pub mod writer;

// Re-exports
pub use border::{Border, BorderEdges, BorderGlyphs};
pub use cell::{Cell, CellStyle, TextAttrs};
pub use color::{
    AdaptiveColor, AnsiColor, Color, ColorTarget, CompleteAdaptiveColor, CompleteColor,
    ConcreteColor, NoColor, RgbColor, TerminalColor,
};
pub use grid::{Grid, Rect};
pub use layout::{BoxRegions, Region, RegionCanvas, compose};
pub use measure::{height, size, visible_width, width};
pub use position::{
    Position, Sides, Whitespace, place, place_horizontal, place_horizontal_with, place_overlay,
    place_vertical, place_vertical_with, place_with,
};
pub use profile::{ColorProfile, Environ};
pub use query::ProbeError;
pub use renderer::{
    Renderer, color_profile, default_renderer, has_dark_background, set_color_profile,
    set_default_renderer, set_has_dark_background,
};
pub use style::Style;
pub use wrap::{hard_wrap, truncate, word_wrap, wrap};
pub use writer::ColorWriter;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::border::Border;
    pub use crate::color::{AdaptiveColor, Color, NoColor};
    pub use crate::grid::{Grid, Rect};
    pub use crate::position::{Position, Sides};
    pub use crate::profile::ColorProfile;
    pub use crate::renderer::Renderer;
    pub use crate::style::Style;
    pub use crate::writer::ColorWriter;
    pub use crate::{join_horizontal, join_vertical};
}

// Convenience constructors

/// Create a new empty style.
///
/// This is equivalent to `Style::new()`.
pub fn new_style() -> Style {
    Style::new()
}

// Join utilities

/// Horizontally joins multi-line strings along a vertical axis.
///
/// Shorter blocks are padded with blank lines; `pos` decides where the blank
/// lines go, using the same split as alignment inside a box. Every block is
/// padded to its own widest line.
///
/// # Example
///
/// ```rust
/// use gridgloss::{join_horizontal, Position};
///
/// let joined = join_horizontal(Position::Bottom, &["a\nb\nc", "X"]);
/// assert_eq!(joined, "a \nb \ncX");
/// ```
pub fn join_horizontal(pos: Position, strs: &[&str]) -> String {
    match strs {
        [] => return String::new(),
        [only] => return (*only).to_string(),
        _ => {}
    }

    let blocks: Vec<Vec<&str>> = strs.iter().map(|s| s.split('\n').collect()).collect();
    let widths: Vec<usize> = blocks
        .iter()
        .map(|lines| lines.iter().map(|l| visible_width(l)).max().unwrap_or(0))
        .collect();
    let max_height = blocks.iter().map(Vec::len).max().unwrap_or(0);

    let offsets: Vec<usize> = blocks
        .iter()
        .map(|block| pos.split_cells(max_height - block.len()).0)
        .collect();

    let total_width: usize = widths.iter().sum();
    let mut result = String::with_capacity(max_height * (total_width + 1));

    for row in 0..max_height {
        if row > 0 {
            result.push('\n');
        }
        for ((block, &width), &top) in blocks.iter().zip(&widths).zip(&offsets) {
            let line = row
                .checked_sub(top)
                .and_then(|i| block.get(i))
                .copied()
                .unwrap_or("");
            result.push_str(line);
            let pad = width.saturating_sub(visible_width(line));
            result.extend(std::iter::repeat(' ').take(pad));
        }
    }
    result
}

/// Vertically joins multi-line strings along a horizontal axis.
///
/// Every line is padded to the widest line of all blocks; `pos` decides how
/// the padding is divided between the two sides.
///
/// # Example
///
/// ```rust
/// use gridgloss::{join_vertical, Position};
///
/// let joined = join_vertical(Position::Center, &["ab", "abcde"]);
/// assert_eq!(joined, " ab  \nabcde");
/// ```
pub fn join_vertical(pos: Position, strs: &[&str]) -> String {
    match strs {
        [] => return String::new(),
        [only] => return (*only).to_string(),
        _ => {}
    }

    let lines: Vec<&str> = strs.iter().flat_map(|s| s.split('\n')).collect();
    let max_width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);

    let mut result = String::with_capacity(lines.len() * (max_width + 1));
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        let (left, right) = pos.split_cells(max_width - visible_width(line));
        result.extend(std::iter::repeat(' ').take(left));
        result.push_str(line);
        result.extend(std::iter::repeat(' ').take(right));
    }
    result
}
