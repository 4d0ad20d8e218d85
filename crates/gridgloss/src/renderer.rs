//! Terminal renderer context: color profile and background darkness.

use std::sync::{OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::color::{ColorProfile, ConcreteColor, TerminalColor};
use crate::profile::Environ;
use crate::query;

/// Global default renderer, detected on first use.
static DEFAULT_RENDERER: OnceLock<RwLock<Renderer>> = OnceLock::new();

/// The output properties styles are rendered against.
///
/// A renderer is a plain value: styles that need a specific one hold it in an
/// `Arc`, everything else uses [`default_renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    color_profile: ColorProfile,
    has_dark_background: bool,
}

impl Renderer {
    /// Default renderer instance.
    pub const DEFAULT: Renderer = Renderer {
        color_profile: ColorProfile::TrueColor,
        has_dark_background: true,
    };

    /// Create a new renderer with default settings.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Detect the process terminal's capabilities.
    ///
    /// The background is taken from `COLORFGBG` when present, otherwise the
    /// terminal is asked. Any probe failure assumes a dark background.
    pub fn detect() -> Self {
        let env = Environ::from_os();
        let color_profile = ColorProfile::detect();
        let has_dark_background = match dark_background_hint(&env) {
            Some(dark) => dark,
            None => match query::has_dark_background() {
                Ok(dark) => dark,
                Err(err) => {
                    debug!(error = %err, "Background probe failed, assuming dark");
                    true
                }
            },
        };
        debug!(?color_profile, has_dark_background, "Detected renderer");
        Self {
            color_profile,
            has_dark_background,
        }
    }

    /// Builder form of [`set_color_profile`](Self::set_color_profile).
    pub fn with_color_profile(mut self, profile: ColorProfile) -> Self {
        self.color_profile = profile;
        self
    }

    /// Builder form of [`set_has_dark_background`](Self::set_has_dark_background).
    pub fn with_dark_background(mut self, dark: bool) -> Self {
        self.has_dark_background = dark;
        self
    }

    /// Get the color profile.
    pub fn color_profile(&self) -> ColorProfile {
        self.color_profile
    }

    /// Set the color profile.
    pub fn set_color_profile(&mut self, profile: ColorProfile) {
        self.color_profile = profile;
    }

    /// Check if the terminal has a dark background.
    pub fn has_dark_background(&self) -> bool {
        self.has_dark_background
    }

    /// Set the dark background flag.
    pub fn set_has_dark_background(&mut self, dark: bool) {
        self.has_dark_background = dark;
    }

    /// Pick `light` or `dark` according to the background.
    pub fn light_dark<T>(&self, light: T, dark: T) -> T {
        if self.has_dark_background { dark } else { light }
    }

    /// Resolve any color against this renderer.
    pub fn resolve(&self, color: &dyn TerminalColor) -> Option<ConcreteColor> {
        color.resolve(self.color_profile, self.has_dark_background)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `COLORFGBG` is `"fg;bg"` (sometimes `"fg;default;bg"`); backgrounds 0-6 and 8 are dark.
fn dark_background_hint(env: &Environ) -> Option<bool> {
    let value = env.get("COLORFGBG");
    let bg = value.rsplit(';').next()?.parse::<u8>().ok()?;
    if !value.contains(';') {
        return None;
    }
    Some(bg < 7 || bg == 8)
}

fn global() -> &'static RwLock<Renderer> {
    DEFAULT_RENDERER.get_or_init(|| RwLock::new(Renderer::detect()))
}

/// Get the default renderer, detecting it on first use.
pub fn default_renderer() -> Renderer {
    *global().read().unwrap_or_else(PoisonError::into_inner)
}

/// Replace the default renderer.
pub fn set_default_renderer(renderer: Renderer) {
    if DEFAULT_RENDERER.set(RwLock::new(renderer)).is_err() {
        *global().write().unwrap_or_else(PoisonError::into_inner) = renderer;
    }
}

/// Override the default renderer's color profile.
pub fn set_color_profile(profile: ColorProfile) {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .set_color_profile(profile);
}

/// Override the default renderer's background flag.
pub fn set_has_dark_background(dark: bool) {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .set_has_dark_background(dark);
}

/// Get the default renderer's color profile.
pub fn color_profile() -> ColorProfile {
    default_renderer().color_profile()
}

/// Check if the default renderer has a dark background.
pub fn has_dark_background() -> bool {
    default_renderer().has_dark_background()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{AdaptiveColor, Color, RgbColor};

    #[test]
    fn test_renderer_default() {
        let r = Renderer::new();
        assert_eq!(r.color_profile(), ColorProfile::TrueColor);
        assert!(r.has_dark_background());
    }

    #[test]
    fn test_renderer_setters() {
        let mut r = Renderer::new();
        r.set_color_profile(ColorProfile::Ansi256);
        assert_eq!(r.color_profile(), ColorProfile::Ansi256);

        r.set_has_dark_background(false);
        assert!(!r.has_dark_background());
    }

    #[test]
    fn test_builders_and_light_dark() {
        let r = Renderer::new()
            .with_color_profile(ColorProfile::Ansi)
            .with_dark_background(false);
        assert_eq!(r.light_dark("light", "dark"), "light");
        assert_eq!(r.with_dark_background(true).light_dark(1, 2), 2);
    }

    #[test]
    fn test_resolve_uses_context() {
        let adaptive = AdaptiveColor {
            light: Color::from("#000000"),
            dark: Color::from("#ffffff"),
        };
        let light = Renderer::new().with_dark_background(false);
        assert_eq!(
            light.resolve(&adaptive),
            Some(ConcreteColor::Rgb(RgbColor::new(0, 0, 0)))
        );
        let ascii = Renderer::new().with_color_profile(ColorProfile::Ascii);
        assert_eq!(ascii.resolve(&adaptive), None);
    }

    #[test]
    fn test_colorfgbg_hint() {
        let hint = |v: &str| dark_background_hint(&Environ::from_pairs([format!("COLORFGBG={v}")]));
        assert_eq!(hint("15;0"), Some(true));
        assert_eq!(hint("0;15"), Some(false));
        assert_eq!(hint("0;default;8"), Some(true));
        assert_eq!(hint("0;7"), Some(false));
        assert_eq!(hint("garbage"), None);
        assert_eq!(dark_background_hint(&Environ::new()), None);
    }
}
