//! Terminal color types and capability-aware resolution.
//!
//! Every color a [`Style`](crate::Style) can hold implements [`TerminalColor`], whose
//! [`resolve`](TerminalColor::resolve) method always ends in a [`ConcreteColor`] that the
//! given [`ColorProfile`] can display (or `None`, meaning "leave the terminal default").
//!
//! - [`NoColor`] - Absence of color
//! - [`Color`] - Hex (`"#ff8800"`, `"#f80"`) or ANSI index (`"203"`) string
//! - [`AnsiColor`] / [`RgbColor`] - Typed shorthands for the two forms above
//! - [`AdaptiveColor`] - Picks a color by background darkness
//! - [`CompleteColor`] - Explicit values per profile, no numeric conversion
//! - [`CompleteAdaptiveColor`] - Both of the above
//!
//! # Example
//!
//! ```rust
//! use gridgloss::{Color, ColorProfile, ConcreteColor, TerminalColor};
//!
//! let red = Color::from("#ff0000");
//! assert_eq!(red.resolve(ColorProfile::Ansi, true), Some(ConcreteColor::Basic(9)));
//! assert_eq!(red.resolve(ColorProfile::Ascii, true), None);
//! ```

use std::fmt;
use std::fmt::Write as _;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

pub use crate::profile::ColorProfile;

/// Which SGR slot a color is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTarget {
    Foreground,
    Background,
    Underline,
}

/// A color value a terminal can display directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcreteColor {
    /// One of the 16 basic colors (0-15).
    Basic(u8),
    /// An entry of the extended 256-color palette (16-255).
    Indexed(u8),
    /// A 24-bit color.
    Rgb(RgbColor),
}

impl ConcreteColor {
    /// Build from a palette index, keeping 0-15 as basic colors.
    pub const fn from_index(n: u8) -> Self {
        if n < 16 { Self::Basic(n) } else { Self::Indexed(n) }
    }

    /// The lowest profile able to display this color without conversion.
    pub const fn native_profile(&self) -> ColorProfile {
        match self {
            Self::Basic(_) => ColorProfile::Ansi,
            Self::Indexed(_) => ColorProfile::Ansi256,
            Self::Rgb(_) => ColorProfile::TrueColor,
        }
    }

    /// Approximate RGB value (basic colors use the xterm defaults).
    pub fn to_rgb(&self) -> RgbColor {
        match *self {
            Self::Basic(n) | Self::Indexed(n) => ansi256_to_rgb(n),
            Self::Rgb(c) => c,
        }
    }

    /// Append the SGR parameters selecting this color, without the `ESC[` prefix or `m`.
    pub fn push_params(&self, target: ColorTarget, out: &mut String) {
        let _ = match (*self, target) {
            (Self::Basic(n), ColorTarget::Foreground) if n < 8 => write!(out, "{}", 30 + n),
            (Self::Basic(n), ColorTarget::Foreground) => write!(out, "{}", 90 + n - 8),
            (Self::Basic(n), ColorTarget::Background) if n < 8 => write!(out, "{}", 40 + n),
            (Self::Basic(n), ColorTarget::Background) => write!(out, "{}", 100 + n - 8),
            // There is no basic underline color; the 256-color form is used instead.
            (Self::Basic(n) | Self::Indexed(n), ColorTarget::Underline) => write!(out, "58;5;{n}"),
            (Self::Indexed(n), ColorTarget::Foreground) => write!(out, "38;5;{n}"),
            (Self::Indexed(n), ColorTarget::Background) => write!(out, "48;5;{n}"),
            (Self::Rgb(c), target) => {
                let sel = match target {
                    ColorTarget::Foreground => 38,
                    ColorTarget::Background => 48,
                    ColorTarget::Underline => 58,
                };
                write!(out, "{sel};2;{};{};{}", c.r, c.g, c.b)
            }
        };
    }

    /// Full SGR sequence selecting this color.
    pub fn sgr(&self, target: ColorTarget) -> String {
        let mut s = String::from("\x1b[");
        self.push_params(target, &mut s);
        s.push('m');
        s
    }
}

/// Trait for types that can be rendered as terminal colors.
pub trait TerminalColor: fmt::Debug + Send + Sync {
    /// Resolve to a color displayable under `profile`.
    ///
    /// `dark_bg` selects between light and dark variants of adaptive colors.
    fn resolve(&self, profile: ColorProfile, dark_bg: bool) -> Option<ConcreteColor>;

    /// Clone this color into a boxed trait object.
    fn clone_box(&self) -> Box<dyn TerminalColor>;

    /// SGR sequence setting this color as the foreground, empty when unresolved.
    fn to_ansi_fg(&self, profile: ColorProfile, dark_bg: bool) -> String {
        self.resolve(profile, dark_bg)
            .map(|c| c.sgr(ColorTarget::Foreground))
            .unwrap_or_default()
    }

    /// SGR sequence setting this color as the background, empty when unresolved.
    fn to_ansi_bg(&self, profile: ColorProfile, dark_bg: bool) -> String {
        self.resolve(profile, dark_bg)
            .map(|c| c.sgr(ColorTarget::Background))
            .unwrap_or_default()
    }
}

impl Clone for Box<dyn TerminalColor> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// No color - uses terminal's default colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoColor;

impl TerminalColor for NoColor {
    fn resolve(&self, _profile: ColorProfile, _dark_bg: bool) -> Option<ConcreteColor> {
        None
    }

    fn clone_box(&self) -> Box<dyn TerminalColor> {
        Box::new(*self)
    }
}

/// A color specified by hex string or ANSI number.
///
/// Invalid values never fail: an empty string renders as black and anything
/// unparseable renders as no color.
///
/// ```rust
/// use gridgloss::Color;
///
/// let hex = Color::from("#ff0000");
/// let ansi = Color::from("196");
/// assert!(hex.is_valid() && ansi.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(pub String);

impl Color {
    /// Create a new color from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Parse as RGB if this is a hex color.
    pub fn as_rgb(&self) -> Option<(u8, u8, u8)> {
        let raw = self.0.trim();
        let hex = raw.strip_prefix('#')?;
        RgbColor::from_hex(hex).map(|c| (c.r, c.g, c.b))
    }

    /// Parse as ANSI color number.
    pub fn as_ansi(&self) -> Option<u8> {
        self.0.trim().parse::<u8>().ok()
    }

    /// Returns true if this color is a valid ANSI or hex value.
    pub fn is_valid(&self) -> bool {
        self.as_rgb().is_some() || self.as_ansi().is_some()
    }

    /// The color in its own native tier, before any profile conversion.
    pub fn native(&self) -> Option<ConcreteColor> {
        if self.0.is_empty() {
            return Some(ConcreteColor::Basic(0));
        }
        if let Some((r, g, b)) = self.as_rgb() {
            return Some(ConcreteColor::Rgb(RgbColor::new(r, g, b)));
        }
        if let Some(n) = self.as_ansi() {
            return Some(ConcreteColor::from_index(n));
        }
        trace!(color = %self.0, "Unparseable color, rendering without color");
        None
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl TerminalColor for Color {
    fn resolve(&self, profile: ColorProfile, _dark_bg: bool) -> Option<ConcreteColor> {
        self.native().and_then(|c| profile.convert(c))
    }

    fn clone_box(&self) -> Box<dyn TerminalColor> {
        Box::new(self.clone())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a hex string, ANSI number, or RGB map")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        normalize_color_str(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u8::try_from(v)
            .map(|n| Color::new(n.to_string()))
            .map_err(|_| E::custom(format!("ANSI color must be 0-255, got {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u8::try_from(v)
            .map(|n| Color::new(n.to_string()))
            .map_err(|_| E::custom(format!("ANSI color must be 0-255, got {v}")))
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let (mut r, mut g, mut b) = (None, None, None);
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "r" | "red" => r = Some(map.next_value::<u8>()?),
                "g" | "green" => g = Some(map.next_value::<u8>()?),
                "b" | "blue" => b = Some(map.next_value::<u8>()?),
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }
        match (r, g, b) {
            (Some(r), Some(g), Some(b)) => Ok(Color::new(RgbColor::new(r, g, b).hex())),
            _ => Err(de::Error::custom("RGB color requires r, g, b fields")),
        }
    }
}

// Config files may omit the leading '#'; strings are normalized so that the
// runtime parser, which requires it, sees a canonical form.
fn normalize_color_str(s: &str) -> Result<Color, String> {
    let raw = s.trim();
    if raw.is_empty() {
        return Err("color string is empty".to_string());
    }
    if raw.chars().all(|c| c.is_ascii_digit()) {
        return raw
            .parse::<u8>()
            .map(|n| Color::new(n.to_string()))
            .map_err(|_| format!("ANSI color must be 0-255, got {raw}"));
    }
    let hex = raw.trim_start_matches('#');
    match RgbColor::from_hex(hex) {
        Some(_) => Ok(Color::new(format!("#{hex}"))),
        None => Err(format!("invalid color '{raw}'")),
    }
}

/// An ANSI color by number (0-255).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiColor(pub u8);

impl From<u8> for AnsiColor {
    fn from(n: u8) -> Self {
        Self(n)
    }
}

impl TerminalColor for AnsiColor {
    fn resolve(&self, profile: ColorProfile, _dark_bg: bool) -> Option<ConcreteColor> {
        profile.convert(ConcreteColor::from_index(self.0))
    }

    fn clone_box(&self) -> Box<dyn TerminalColor> {
        Box::new(*self)
    }
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rrggbb` or `rgb` hex digits (no leading `#`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some(Self::new(
                u8::from_str_radix(&hex[0..2], 16).ok()?,
                u8::from_str_radix(&hex[2..4], 16).ok()?,
                u8::from_str_radix(&hex[4..6], 16).ok()?,
            )),
            3 => Some(Self::new(
                u8::from_str_radix(&hex[0..1], 16).ok()? * 17,
                u8::from_str_radix(&hex[1..2], 16).ok()? * 17,
                u8::from_str_radix(&hex[2..3], 16).ok()? * 17,
            )),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// HSL lightness in `[0, 1]`.
    pub fn lightness(&self) -> f64 {
        let max = self.r.max(self.g).max(self.b) as f64;
        let min = self.r.min(self.g).min(self.b) as f64;
        (max + min) / 2.0 / 255.0
    }

    /// True when the HSL lightness is at most one half.
    pub fn is_dark(&self) -> bool {
        self.lightness() <= 0.5
    }

    fn distance_sq(&self, other: Self) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl TerminalColor for RgbColor {
    fn resolve(&self, profile: ColorProfile, _dark_bg: bool) -> Option<ConcreteColor> {
        profile.convert(ConcreteColor::Rgb(*self))
    }

    fn clone_box(&self) -> Box<dyn TerminalColor> {
        Box::new(*self)
    }
}

/// A color that adapts based on terminal background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptiveColor {
    /// Color to use on light backgrounds.
    pub light: Color,
    /// Color to use on dark backgrounds.
    pub dark: Color,
}

impl TerminalColor for AdaptiveColor {
    fn resolve(&self, profile: ColorProfile, dark_bg: bool) -> Option<ConcreteColor> {
        if dark_bg {
            self.dark.resolve(profile, dark_bg)
        } else {
            self.light.resolve(profile, dark_bg)
        }
    }

    fn clone_box(&self) -> Box<dyn TerminalColor> {
        Box::new(self.clone())
    }
}

/// A color with explicit values for each color profile.
///
/// No nearest-match search happens here: the value supplied for the active
/// profile is used, or the closest lower tier that was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompleteColor {
    /// True color (24-bit) value.
    pub truecolor: Option<Color>,
    /// ANSI 256 (8-bit) value.
    pub ansi256: Option<Color>,
    /// ANSI 16 (4-bit) value.
    pub ansi: Option<Color>,
}

impl CompleteColor {
    fn pick(&self, profile: ColorProfile) -> Option<&Color> {
        match profile {
            ColorProfile::Ascii => None,
            ColorProfile::Ansi => self.ansi.as_ref(),
            ColorProfile::Ansi256 => self.ansi256.as_ref().or(self.ansi.as_ref()),
            ColorProfile::TrueColor => self
                .truecolor
                .as_ref()
                .or(self.ansi256.as_ref())
                .or(self.ansi.as_ref()),
        }
    }
}

impl TerminalColor for CompleteColor {
    fn resolve(&self, profile: ColorProfile, dark_bg: bool) -> Option<ConcreteColor> {
        self.pick(profile).and_then(|c| c.resolve(profile, dark_bg))
    }

    fn clone_box(&self) -> Box<dyn TerminalColor> {
        Box::new(self.clone())
    }
}

/// A complete color with adaptive light/dark variants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompleteAdaptiveColor {
    /// Color for light backgrounds.
    pub light: CompleteColor,
    /// Color for dark backgrounds.
    pub dark: CompleteColor,
}

impl TerminalColor for CompleteAdaptiveColor {
    fn resolve(&self, profile: ColorProfile, dark_bg: bool) -> Option<ConcreteColor> {
        if dark_bg {
            self.dark.resolve(profile, dark_bg)
        } else {
            self.light.resolve(profile, dark_bg)
        }
    }

    fn clone_box(&self) -> Box<dyn TerminalColor> {
        Box::new(self.clone())
    }
}

// Palette

/// Levels of the 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Standard ANSI 16 colors as RGB.
pub const ANSI16_PALETTE: [RgbColor; 16] = [
    RgbColor::new(0, 0, 0),       // Black
    RgbColor::new(128, 0, 0),     // Red
    RgbColor::new(0, 128, 0),     // Green
    RgbColor::new(128, 128, 0),   // Yellow
    RgbColor::new(0, 0, 128),     // Blue
    RgbColor::new(128, 0, 128),   // Magenta
    RgbColor::new(0, 128, 128),   // Cyan
    RgbColor::new(192, 192, 192), // White
    RgbColor::new(128, 128, 128), // Bright Black
    RgbColor::new(255, 0, 0),     // Bright Red
    RgbColor::new(0, 255, 0),     // Bright Green
    RgbColor::new(255, 255, 0),   // Bright Yellow
    RgbColor::new(0, 0, 255),     // Bright Blue
    RgbColor::new(255, 0, 255),   // Bright Magenta
    RgbColor::new(0, 255, 255),   // Bright Cyan
    RgbColor::new(255, 255, 255), // Bright White
];

/// Nearest basic color for every 256-palette index.
#[rustfmt::skip]
pub const ANSI256_TO_16: [u8; 256] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    0, 4, 4, 4, 12, 12, 2, 6, 6, 6, 6, 12, 2, 6, 6, 6,
    6, 14, 2, 6, 6, 6, 14, 14, 10, 6, 6, 14, 14, 14, 10, 10,
    14, 14, 14, 14, 1, 5, 5, 5, 5, 12, 3, 8, 8, 8, 8, 12,
    3, 8, 8, 8, 8, 7, 3, 8, 8, 8, 7, 7, 3, 8, 8, 7,
    7, 14, 10, 10, 7, 7, 14, 14, 1, 5, 5, 5, 5, 13, 3, 8,
    8, 8, 8, 7, 3, 8, 8, 8, 7, 7, 3, 8, 8, 7, 7, 7,
    3, 8, 7, 7, 7, 7, 11, 7, 7, 7, 7, 7, 1, 5, 5, 5,
    13, 13, 3, 8, 8, 8, 7, 7, 3, 8, 8, 7, 7, 7, 3, 8,
    7, 7, 7, 7, 11, 7, 7, 7, 7, 7, 11, 7, 7, 7, 7, 15,
    9, 5, 5, 13, 13, 13, 3, 8, 8, 7, 7, 13, 3, 8, 7, 7,
    7, 7, 11, 7, 7, 7, 7, 7, 11, 7, 7, 7, 7, 15, 11, 11,
    7, 7, 15, 15, 9, 9, 13, 13, 13, 13, 9, 9, 7, 7, 13, 13,
    11, 7, 7, 7, 7, 7, 11, 7, 7, 7, 7, 15, 11, 11, 7, 7,
    15, 15, 11, 11, 7, 15, 15, 15, 0, 0, 0, 0, 0, 0, 8, 8,
    8, 8, 8, 8, 8, 8, 8, 8, 7, 7, 7, 7, 7, 7, 15, 15,
];

/// Convert ANSI 256 to RGB.
pub fn ansi256_to_rgb(n: u8) -> RgbColor {
    match n {
        0..=15 => ANSI16_PALETTE[n as usize],
        16..=231 => {
            let i = n - 16;
            RgbColor::new(
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[((i % 36) / 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            )
        }
        _ => {
            let gray = 8 + (n - 232) * 10;
            RgbColor::new(gray, gray, gray)
        }
    }
}

/// Nearest palette index by Euclidean RGB distance.
///
/// The fixed cube and grayscale entries win ties against the 16 basic colors,
/// whose actual appearance depends on the terminal theme.
pub fn rgb_to_ansi256(c: RgbColor) -> u8 {
    let mut best = 16u8;
    let mut best_dist = u32::MAX;
    for n in (16..=255u8).chain(0..16) {
        let dist = c.distance_sq(ansi256_to_rgb(n));
        if dist < best_dist {
            best_dist = dist;
            best = n;
            if dist == 0 {
                break;
            }
        }
    }
    best
}

/// Map a 256-palette index to the basic palette through [`ANSI256_TO_16`].
pub fn ansi256_to_ansi16(n: u8) -> u8 {
    ANSI256_TO_16[n as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from("#ff0000");
        assert_eq!(c.as_rgb(), Some((255, 0, 0)));

        let c = Color::from("#0f0");
        assert_eq!(c.as_rgb(), Some((0, 255, 0)));
    }

    #[test]
    fn test_color_from_ansi() {
        let c = Color::from("196");
        assert_eq!(c.as_ansi(), Some(196));
        assert_eq!(c.native(), Some(ConcreteColor::Indexed(196)));
        assert_eq!(Color::from("3").native(), Some(ConcreteColor::Basic(3)));
    }

    #[test]
    fn test_invalid_colors_fall_back() {
        assert_eq!(Color::from("").native(), Some(ConcreteColor::Basic(0)));
        assert_eq!(Color::from("#zzzzzz").native(), None);
        assert_eq!(Color::from("256").native(), None);
        assert_eq!(Color::from("chartreuse").to_ansi_fg(ColorProfile::TrueColor, true), "");
    }

    #[test]
    fn test_red_downgrades_to_basic_red() {
        let red = Color::from("#FF0000");
        assert_eq!(
            red.resolve(ColorProfile::Ansi256, true),
            Some(ConcreteColor::Indexed(196))
        );
        assert_eq!(red.resolve(ColorProfile::Ansi, true), Some(ConcreteColor::Basic(9)));
        assert_eq!(red.to_ansi_fg(ColorProfile::Ansi, true), "\x1b[91m");
    }

    #[test]
    fn test_ascii_drops_color() {
        assert_eq!(Color::from("#123456").resolve(ColorProfile::Ascii, true), None);
        assert_eq!(AnsiColor(4).to_ansi_bg(ColorProfile::Ascii, false), "");
    }

    #[test]
    fn test_rgb_to_ansi256() {
        assert_eq!(rgb_to_ansi256(RgbColor::new(255, 0, 0)), 196);
        assert_eq!(rgb_to_ansi256(RgbColor::new(0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256(RgbColor::new(128, 128, 128)), 244);
        let n = rgb_to_ansi256(RgbColor::new(100, 100, 100));
        assert!(n >= 232);
    }

    #[test]
    fn test_ansi256_to_rgb() {
        assert_eq!(ansi256_to_rgb(0), RgbColor::new(0, 0, 0));
        assert_eq!(ansi256_to_rgb(15), RgbColor::new(255, 255, 255));
        assert_eq!(ansi256_to_rgb(16), RgbColor::new(0, 0, 0));
        assert_eq!(ansi256_to_rgb(196), RgbColor::new(255, 0, 0));
        assert_eq!(ansi256_to_rgb(232), RgbColor::new(8, 8, 8));
        assert_eq!(ansi256_to_rgb(255), RgbColor::new(238, 238, 238));
    }

    #[test]
    fn test_ansi256_table_is_identity_on_basic() {
        for n in 0..16u8 {
            assert_eq!(ansi256_to_ansi16(n), n);
        }
        assert_eq!(ansi256_to_ansi16(196), 9);
        assert_eq!(ansi256_to_ansi16(231), 15);
    }

    #[test]
    fn test_params_for_each_tier() {
        let mut s = String::new();
        ConcreteColor::Basic(2).push_params(ColorTarget::Foreground, &mut s);
        assert_eq!(s, "32");
        assert_eq!(ConcreteColor::Basic(12).sgr(ColorTarget::Background), "\x1b[104m");
        assert_eq!(ConcreteColor::Indexed(99).sgr(ColorTarget::Foreground), "\x1b[38;5;99m");
        assert_eq!(
            ConcreteColor::Rgb(RgbColor::new(1, 2, 3)).sgr(ColorTarget::Underline),
            "\x1b[58;2;1;2;3m"
        );
        assert_eq!(ConcreteColor::Basic(1).sgr(ColorTarget::Underline), "\x1b[58;5;1m");
    }

    #[test]
    fn test_adaptive_picks_by_background() {
        let c = AdaptiveColor {
            light: Color::from("#000000"),
            dark: Color::from("#ffffff"),
        };
        assert_eq!(
            c.resolve(ColorProfile::TrueColor, true),
            Some(ConcreteColor::Rgb(RgbColor::new(255, 255, 255)))
        );
        assert_eq!(
            c.resolve(ColorProfile::TrueColor, false),
            Some(ConcreteColor::Rgb(RgbColor::new(0, 0, 0)))
        );
    }

    #[test]
    fn test_complete_color_picks_tier_without_search() {
        let c = CompleteColor {
            truecolor: Some(Color::from("#0000ff")),
            ansi256: Some(Color::from("86")),
            ansi: Some(Color::from("5")),
        };
        assert_eq!(c.resolve(ColorProfile::Ansi256, true), Some(ConcreteColor::Indexed(86)));
        assert_eq!(c.resolve(ColorProfile::Ansi, true), Some(ConcreteColor::Basic(5)));
        assert_eq!(c.resolve(ColorProfile::Ascii, true), None);

        let partial = CompleteColor {
            ansi: Some(Color::from("4")),
            ..CompleteColor::default()
        };
        assert_eq!(
            partial.resolve(ColorProfile::TrueColor, true),
            Some(ConcreteColor::Basic(4))
        );
    }

    #[test]
    fn test_rgb_lightness() {
        assert!(RgbColor::new(0, 0, 0).is_dark());
        assert!(!RgbColor::new(255, 255, 255).is_dark());
        assert!(RgbColor::new(40, 42, 54).is_dark());
    }

    #[test]
    fn test_half_lightness_is_dark() {
        let red = RgbColor::new(255, 0, 0);
        assert_eq!(red.lightness(), 0.5);
        assert!(red.is_dark());
        assert!(!RgbColor::new(255, 2, 2).is_dark());
    }

    #[test]
    fn test_color_serde_number() {
        let c: Color = serde_json::from_str("196").expect("parse ANSI number");
        assert_eq!(c.as_ansi(), Some(196));
        assert!(c.as_rgb().is_none());
    }

    #[test]
    fn test_color_serde_hex_without_hash() {
        let c: Color = serde_json::from_str("\"ff00ff\"").expect("parse hex string");
        assert_eq!(c.0, "#ff00ff");
        assert_eq!(c.as_rgb(), Some((255, 0, 255)));
    }

    #[test]
    fn test_color_serde_rgb_map() {
        let c: Color =
            serde_json::from_str("{\"r\":255,\"g\":0,\"b\":128}").expect("parse rgb map");
        assert_eq!(c.0, "#ff0080");
    }
}
