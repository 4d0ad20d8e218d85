//! Color profiles and their detection from the environment.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::IsTerminal;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{ConcreteColor, ansi256_to_ansi16, rgb_to_ansi256};

/// Color profile indicating terminal color capabilities.
///
/// Profiles are ordered by capability, so `max`/`min` and comparisons work.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorProfile {
    /// No color support (1-bit).
    Ascii,
    /// 16 ANSI colors (4-bit).
    Ansi,
    /// 256 colors (8-bit).
    Ansi256,
    /// True color / 16 million colors (24-bit).
    #[default]
    TrueColor,
}

impl ColorProfile {
    /// Returns true if this profile supports the given color depth.
    pub fn supports(&self, other: ColorProfile) -> bool {
        *self >= other
    }

    /// Convert `color` to something this profile can display.
    ///
    /// Colors at or below the profile's tier pass through unchanged. `Ascii`
    /// displays no color at all.
    pub fn convert(&self, color: ConcreteColor) -> Option<ConcreteColor> {
        if *self == ColorProfile::Ascii {
            return None;
        }
        if self.supports(color.native_profile()) {
            return Some(color);
        }
        let indexed = match color {
            ConcreteColor::Rgb(rgb) => rgb_to_ansi256(rgb),
            ConcreteColor::Basic(n) | ConcreteColor::Indexed(n) => n,
        };
        match self {
            ColorProfile::Ansi => Some(ConcreteColor::Basic(ansi256_to_ansi16(indexed))),
            _ => Some(ConcreteColor::from_index(indexed)),
        }
    }

    /// Infer the profile from `env`, treating the output as a terminal when
    /// `is_tty` is set.
    ///
    /// ```rust
    /// use gridgloss::{ColorProfile, Environ};
    ///
    /// let env = Environ::from_pairs(["TERM=xterm-256color"]);
    /// assert_eq!(ColorProfile::from_env(&env, true), ColorProfile::Ansi256);
    /// assert_eq!(ColorProfile::from_env(&env, false), ColorProfile::Ascii);
    /// ```
    pub fn from_env(env: &Environ, is_tty: bool) -> ColorProfile {
        if !env.get("NO_COLOR").is_empty() {
            return ColorProfile::Ascii;
        }
        let force = env.get("CLICOLOR_FORCE");
        let forced = !force.is_empty() && force != "0";
        if env.get("CLICOLOR") == "0" && !forced {
            return ColorProfile::Ascii;
        }
        if forced {
            return infer_from_env(env).max(ColorProfile::Ansi);
        }
        if !is_tty {
            return ColorProfile::Ascii;
        }
        infer_from_env(env)
    }

    /// Detect the profile of the process's standard output.
    pub fn detect() -> ColorProfile {
        let is_tty = std::io::stdout().is_terminal();
        let profile = ColorProfile::from_env(&Environ::from_os(), is_tty);
        debug!(?profile, is_tty, "Detected color profile");
        profile
    }
}

fn infer_from_env(env: &Environ) -> ColorProfile {
    if is_true(env.get("GOOGLE_CLOUD_SHELL")) {
        return ColorProfile::TrueColor;
    }

    let term = env.get("TERM");
    match env.get("COLORTERM").to_ascii_lowercase().as_str() {
        "24bit" | "truecolor" => {
            // GNU screen advertises truecolor it cannot pass through unless tmux sits on top.
            if term.starts_with("screen") && env.get("TERM_PROGRAM") != "tmux" {
                return ColorProfile::Ansi256;
            }
            return ColorProfile::TrueColor;
        }
        "yes" | "true" => return ColorProfile::TrueColor,
        _ => {}
    }

    match term {
        "xterm-kitty" | "wezterm" | "xterm-ghostty" => return ColorProfile::TrueColor,
        "linux" => return ColorProfile::Ansi,
        _ => {}
    }
    if term.contains("256color") {
        ColorProfile::Ansi256
    } else if term.contains("color") || term.contains("ansi") {
        ColorProfile::Ansi
    } else {
        ColorProfile::Ascii
    }
}

/// Boolean environment flag: `1`, `t` or `true` in any case.
fn is_true(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "t" | "true")
}

/// A snapshot of environment variables.
///
/// Missing variables read as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environ {
    vars: HashMap<String, String>,
}

impl Environ {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the process environment, skipping entries that are not valid UTF-8.
    pub fn from_os() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v): (OsString, OsString)| {
                Some((k.into_string().ok()?, v.into_string().ok()?))
            })
            .collect()
    }

    /// Build from `KEY=VALUE` strings; entries without `=` are ignored.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        pairs
            .into_iter()
            .filter_map(|p| {
                let (k, v) = p.as_ref().split_once('=')?;
                Some((k.to_string(), v.to_string()))
            })
            .collect()
    }

    pub fn get(&self, key: &str) -> &str {
        self.vars.get(key).map_or("", String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

impl FromIterator<(String, String)> for Environ {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RgbColor;

    fn profile(pairs: &[&str], tty: bool) -> ColorProfile {
        ColorProfile::from_env(&Environ::from_pairs(pairs), tty)
    }

    #[test]
    fn profiles_are_ordered() {
        assert!(ColorProfile::Ascii < ColorProfile::Ansi);
        assert!(ColorProfile::Ansi256 < ColorProfile::TrueColor);
        assert!(ColorProfile::TrueColor.supports(ColorProfile::Ansi));
        assert!(!ColorProfile::Ansi.supports(ColorProfile::Ansi256));
    }

    #[test]
    fn no_color_wins() {
        assert_eq!(
            profile(&["NO_COLOR=1", "CLICOLOR_FORCE=1", "COLORTERM=truecolor"], true),
            ColorProfile::Ascii
        );
        // An empty NO_COLOR does not count.
        assert_eq!(profile(&["NO_COLOR=", "TERM=xterm-256color"], true), ColorProfile::Ansi256);
    }

    #[test]
    fn clicolor_zero_disables_unless_forced() {
        assert_eq!(profile(&["CLICOLOR=0", "TERM=xterm-256color"], true), ColorProfile::Ascii);
        assert_eq!(
            profile(&["CLICOLOR=0", "CLICOLOR_FORCE=1", "TERM=xterm-256color"], true),
            ColorProfile::Ansi256
        );
    }

    #[test]
    fn force_beats_missing_tty() {
        assert_eq!(profile(&["CLICOLOR_FORCE=1"], false), ColorProfile::Ansi);
        assert_eq!(
            profile(&["CLICOLOR_FORCE=1", "COLORTERM=24bit"], false),
            ColorProfile::TrueColor
        );
        assert_eq!(profile(&["CLICOLOR_FORCE=0", "TERM=xterm-256color"], false), ColorProfile::Ascii);
    }

    #[test]
    fn colorterm_and_screen() {
        assert_eq!(profile(&["COLORTERM=TrueColor"], true), ColorProfile::TrueColor);
        assert_eq!(
            profile(&["COLORTERM=truecolor", "TERM=screen-256color"], true),
            ColorProfile::Ansi256
        );
        assert_eq!(
            profile(&["COLORTERM=truecolor", "TERM=screen", "TERM_PROGRAM=tmux"], true),
            ColorProfile::TrueColor
        );
        assert_eq!(profile(&["COLORTERM=yes"], true), ColorProfile::TrueColor);
        assert_eq!(profile(&["COLORTERM=True"], true), ColorProfile::TrueColor);
    }

    #[test]
    fn term_names() {
        assert_eq!(profile(&["TERM=xterm-kitty"], true), ColorProfile::TrueColor);
        assert_eq!(profile(&["TERM=wezterm"], true), ColorProfile::TrueColor);
        assert_eq!(profile(&["TERM=linux"], true), ColorProfile::Ansi);
        assert_eq!(profile(&["TERM=xterm-color"], true), ColorProfile::Ansi);
        assert_eq!(profile(&["TERM=ansi"], true), ColorProfile::Ansi);
        assert_eq!(profile(&["TERM=dumb"], true), ColorProfile::Ascii);
        assert_eq!(profile(&["GOOGLE_CLOUD_SHELL=true"], true), ColorProfile::TrueColor);
    }

    #[test]
    fn cloud_shell_flag_parses_like_a_bool() {
        for value in ["1", "t", "T", "TRUE", "True", "true"] {
            let var = format!("GOOGLE_CLOUD_SHELL={value}");
            assert_eq!(profile(&[var.as_str()], true), ColorProfile::TrueColor, "{value}");
        }
        for value in ["0", "false", "yes", ""] {
            let var = format!("GOOGLE_CLOUD_SHELL={value}");
            assert_eq!(profile(&[var.as_str()], true), ColorProfile::Ascii, "{value}");
        }
    }

    #[test]
    fn convert_is_identity_at_native_tier() {
        let rgb = ConcreteColor::Rgb(RgbColor::new(10, 20, 30));
        assert_eq!(ColorProfile::TrueColor.convert(rgb), Some(rgb));
        assert_eq!(
            ColorProfile::TrueColor.convert(ConcreteColor::Indexed(200)),
            Some(ConcreteColor::Indexed(200))
        );
        assert_eq!(
            ColorProfile::Ansi.convert(ConcreteColor::Basic(12)),
            Some(ConcreteColor::Basic(12))
        );
    }

    #[test]
    fn convert_downgrades() {
        let red = ConcreteColor::Rgb(RgbColor::new(255, 0, 0));
        assert_eq!(ColorProfile::Ansi256.convert(red), Some(ConcreteColor::Indexed(196)));
        assert_eq!(ColorProfile::Ansi.convert(red), Some(ConcreteColor::Basic(9)));
        assert_eq!(
            ColorProfile::Ansi.convert(ConcreteColor::Indexed(196)),
            Some(ConcreteColor::Basic(9))
        );
        assert_eq!(ColorProfile::Ascii.convert(ConcreteColor::Basic(1)), None);
    }

    #[test]
    fn serde_lowercase_names() {
        let json = serde_json::to_string(&ColorProfile::Ansi256).expect("serialize profile");
        assert_eq!(json, "\"ansi256\"");
        let back: ColorProfile = serde_json::from_str("\"truecolor\"").expect("parse profile");
        assert_eq!(back, ColorProfile::TrueColor);
    }
}
