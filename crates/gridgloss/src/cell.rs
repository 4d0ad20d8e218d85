//! Styled cells, the unit of the render grid.

use bitflags::bitflags;

use crate::color::{ColorTarget, ConcreteColor};

bitflags! {
    /// Text attributes a cell can carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextAttrs: u8 {
        const BOLD = 1 << 0;
        const FAINT = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const REVERSE = 1 << 5;
        const STRIKETHROUGH = 1 << 6;
    }
}

/// SGR parameter for each attribute, in emission order.
const ATTR_CODES: [(TextAttrs, &str); 7] = [
    (TextAttrs::BOLD, "1"),
    (TextAttrs::FAINT, "2"),
    (TextAttrs::ITALIC, "3"),
    (TextAttrs::UNDERLINE, "4"),
    (TextAttrs::BLINK, "5"),
    (TextAttrs::REVERSE, "7"),
    (TextAttrs::STRIKETHROUGH, "9"),
];

/// Resolved visual style of a single cell.
///
/// Colors are already concrete for the target profile; `None` keeps the
/// terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub fg: Option<ConcreteColor>,
    pub bg: Option<ConcreteColor>,
    pub attrs: TextAttrs,
}

impl CellStyle {
    /// The style with no colors and no attributes.
    pub const PLAIN: CellStyle = CellStyle {
        fg: None,
        bg: None,
        attrs: TextAttrs::empty(),
    };

    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Append the SGR sequence establishing this style from a reset state.
    ///
    /// Writes nothing for the plain style.
    pub fn write_sgr(&self, out: &mut String) {
        if self.is_plain() {
            return;
        }
        out.push_str("\x1b[");
        let mut first = true;
        let mut sep = |out: &mut String| {
            if !first {
                out.push(';');
            }
            first = false;
        };
        for (flag, code) in ATTR_CODES {
            if self.attrs.contains(flag) {
                sep(out);
                out.push_str(code);
            }
        }
        if let Some(fg) = self.fg {
            sep(out);
            fg.push_params(ColorTarget::Foreground, out);
        }
        if let Some(bg) = self.bg {
            sep(out);
            bg.push_params(ColorTarget::Background, out);
        }
        out.push('m');
    }

    pub fn sgr(&self) -> String {
        let mut s = String::new();
        self.write_sgr(&mut s);
        s
    }
}

/// One terminal column of the grid.
///
/// A wide grapheme occupies a lead cell of width 2 followed by a
/// continuation cell with empty content and width 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub content: String,
    pub width: u8,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(ch: char, width: u8, style: CellStyle) -> Self {
        Self {
            content: ch.to_string(),
            width,
            style,
        }
    }

    /// A plain space.
    pub fn blank() -> Self {
        Self::new(' ', 1, CellStyle::PLAIN)
    }

    /// The trailing half of a wide cell.
    pub fn continuation(style: CellStyle) -> Self {
        Self {
            content: String::new(),
            width: 0,
            style,
        }
    }

    pub fn is_continuation(&self) -> bool {
        self.width == 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}
