//! An `io::Write` adapter that downgrades colors for the destination.
//!
//! Text and non-SGR escape sequences are forwarded untouched. SGR sequences
//! have their color parameters converted to what the profile can display;
//! everything else in them is kept.

use std::io::{self, Write};

use tracing::trace;

use crate::ansi::{self, SgrParam};
use crate::color::ColorProfile;

const ESC: u8 = 0x1b;

/// Longest incomplete escape sequence held back between writes.
const MAX_PENDING: usize = 4096;

/// Writes through to `W`, rewriting SGR colors for `profile`.
///
/// ```rust
/// use std::io::Write;
/// use gridgloss::{ColorProfile, ColorWriter};
///
/// let mut w = ColorWriter::new(Vec::new(), ColorProfile::Ansi);
/// w.write_all(b"\x1b[38;2;255;0;0mred\x1b[0m").unwrap();
/// assert_eq!(w.get_ref().as_slice(), b"\x1b[91mred\x1b[0m");
/// ```
#[derive(Debug)]
pub struct ColorWriter<W: Write> {
    inner: W,
    profile: ColorProfile,
    pending: Vec<u8>,
}

impl<W: Write> ColorWriter<W> {
    pub fn new(inner: W, profile: ColorProfile) -> Self {
        Self {
            inner,
            profile,
            pending: Vec::new(),
        }
    }

    /// Use the profile detected for the process's standard output.
    pub fn detect(inner: W) -> Self {
        Self::new(inner, ColorProfile::detect())
    }

    pub fn profile(&self) -> ColorProfile {
        self.profile
    }

    pub fn set_profile(&mut self, profile: ColorProfile) {
        self.profile = profile;
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Forward any held-back bytes and return the wrapped writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.write_pending()?;
        Ok(self.inner)
    }

    fn write_pending(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);
        self.inner.write_all(&pending)
    }

    /// Convert `data`, holding back a trailing incomplete sequence.
    fn convert(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        let mut i = 0;
        while i < data.len() {
            let Some(offset) = data[i..].iter().position(|&b| b == ESC) else {
                out.extend_from_slice(&data[i..]);
                break;
            };
            let start = i + offset;
            out.extend_from_slice(&data[i..start]);
            match ansi::scan_sequence(&data[start..]) {
                ansi::Scan::Complete(n) => {
                    let seq = &data[start..start + n];
                    match std::str::from_utf8(seq) {
                        Ok(s) if ansi::is_sgr(s) => self.rewrite_sgr(s, &mut out),
                        _ => out.extend_from_slice(seq),
                    }
                    i = start + n;
                }
                ansi::Scan::Incomplete if data.len() - start <= MAX_PENDING => {
                    self.pending.extend_from_slice(&data[start..]);
                    break;
                }
                ansi::Scan::Incomplete => {
                    trace!(len = data.len() - start, "Forwarding oversized escape sequence");
                    out.extend_from_slice(&data[start..]);
                    break;
                }
                ansi::Scan::Malformed(n) => {
                    out.extend_from_slice(&data[start..start + n]);
                    i = start + n;
                }
            }
        }
        out
    }

    fn rewrite_sgr(&self, seq: &str, out: &mut Vec<u8>) {
        match rewrite_sgr(seq, self.profile) {
            Rewrite::Keep => out.extend_from_slice(seq.as_bytes()),
            Rewrite::Drop => {}
            Rewrite::Replace(s) => out.extend_from_slice(s.as_bytes()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Rewrite {
    Keep,
    Drop,
    Replace(String),
}

fn is_basic_color(code: u16) -> bool {
    matches!(code, 30..=37 | 39 | 40..=47 | 49 | 59 | 90..=97 | 100..=107)
}

fn rewrite_sgr(seq: &str, profile: ColorProfile) -> Rewrite {
    if profile == ColorProfile::TrueColor || seq.len() <= 3 {
        return Rewrite::Keep;
    }
    let mut kept: Vec<String> = Vec::new();
    let mut changed = false;
    for param in ansi::sgr_params(seq) {
        match param {
            SgrParam::Plain {
                code: Some(code), ..
            } if profile == ColorProfile::Ascii && is_basic_color(code) => changed = true,
            SgrParam::Plain { raw, .. } => kept.push(raw.to_string()),
            SgrParam::Extended { target, color, raw } => {
                match color.and_then(|c| profile.convert(c)) {
                    Some(c) => {
                        let mut params = String::new();
                        c.push_params(target, &mut params);
                        changed |= params != raw;
                        kept.push(params);
                    }
                    None => changed = true,
                }
            }
        }
    }
    if !changed {
        Rewrite::Keep
    } else if kept.is_empty() {
        Rewrite::Drop
    } else {
        Rewrite::Replace(format!("\x1b[{}m", kept.join(";")))
    }
}

impl<W: Write> Write for ColorWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.profile == ColorProfile::TrueColor && self.pending.is_empty() {
            self.inner.write_all(buf)?;
            return Ok(buf.len());
        }
        let out = if self.pending.is_empty() {
            self.convert(buf)
        } else {
            let mut data = std::mem::take(&mut self.pending);
            data.extend_from_slice(buf);
            self.convert(&data)
        };
        self.inner.write_all(&out)?;
        Ok(buf.len())
    }

    /// Forwards any incomplete trailing sequence verbatim, then flushes.
    fn flush(&mut self) -> io::Result<()> {
        self.write_pending()?;
        self.inner.flush()
    }
}
