//! Asking the terminal for its background color.
//!
//! The terminal is sent an OSC 11 query followed by a Primary Device
//! Attributes request. Terminals answer DA1 in order, so its reply marks the
//! end of anything the terminal was going to say about the background.

use std::io::{self, Read, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace};

use crate::ansi::{self, Token};
use crate::color::RgbColor;

/// How long to wait for the terminal to answer.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(2);

/// OSC 11 background query, then DA1.
const QUERY: &str = "\x1b]11;?\x07\x1b[c";

/// Error probing the terminal.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Standard input or output is not a terminal.
    #[error("not attached to a terminal")]
    NotATerminal,

    /// The terminal did not answer in time.
    #[error("terminal did not answer within {0:?}")]
    Timeout(Duration),

    /// The terminal answered without reporting a background color.
    #[error("terminal did not report a background color")]
    NoResponse,

    /// The reported color could not be parsed.
    #[error("malformed color response: {0:?}")]
    Malformed(String),

    /// Reading from or writing to the terminal failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// This build cannot switch the terminal to raw mode.
    #[error("terminal probing is not supported in this build")]
    Unsupported,
}

/// Parse an X11 color specification as sent in OSC responses.
///
/// Accepts `rgb:R/G/B` and `rgba:R/G/B/A` with 1-4 hex digits per
/// component; 16-bit components are scaled down to 8 bits.
///
/// ```rust
/// use gridgloss::query::parse_x_color;
/// use gridgloss::RgbColor;
///
/// let c = parse_x_color("rgb:1e1e/1e1e/2e2e").unwrap();
/// assert_eq!(c, RgbColor::new(0x1e, 0x1e, 0x2e));
/// ```
pub fn parse_x_color(spec: &str) -> Result<RgbColor, ProbeError> {
    let malformed = || ProbeError::Malformed(spec.to_string());
    let (body, count) = if let Some(body) = spec.strip_prefix("rgb:") {
        (body, 3)
    } else if let Some(body) = spec.strip_prefix("rgba:") {
        (body, 4)
    } else {
        return Err(malformed());
    };

    let parts: Vec<&str> = body.split('/').collect();
    if parts.len() != count {
        return Err(malformed());
    }
    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        let mut value = u32::from_str_radix(part, 16).map_err(|_| malformed())?;
        if value > 0xff {
            value >>= 8;
        }
        *slot = u8::try_from(value).map_err(|_| malformed())?;
    }
    let [r, g, b] = channels;
    Ok(RgbColor::new(r, g, b))
}

/// True when `color` has an HSL lightness of at most one half.
pub fn is_dark(color: RgbColor) -> bool {
    color.is_dark()
}

/// What has been understood from the bytes received so far.
#[derive(Debug, Default)]
struct Reply {
    color: Option<Result<RgbColor, ProbeError>>,
    finished: bool,
}

fn scan_reply(buf: &[u8]) -> Reply {
    let text = String::from_utf8_lossy(buf);
    let mut reply = Reply::default();
    for token in ansi::tokens(&text) {
        let Token::Control(seq) = token else {
            continue;
        };
        if let Some(rest) = seq.strip_prefix("\x1b]11;") {
            let payload = rest
                .strip_suffix('\x07')
                .or_else(|| rest.strip_suffix("\x1b\\"));
            if let Some(payload) = payload {
                reply.color = Some(parse_x_color(payload));
            }
        } else if seq.starts_with("\x1b[?") && seq.ends_with('c') {
            reply.finished = true;
        }
    }
    reply
}

/// Query a terminal through an arbitrary input/output pair.
///
/// `input` is read on a helper thread so the wait can be bounded by
/// `timeout`. When the deadline passes that thread stays blocked in `read`
/// until the input produces data or closes. The terminal should already be
/// in raw mode, or its echo will show up on screen.
pub fn query_background_color<R, W>(
    input: R,
    output: &mut W,
    timeout: Duration,
) -> Result<RgbColor, ProbeError>
where
    R: Read + Send + 'static,
    W: Write,
{
    output.write_all(QUERY.as_bytes())?;
    output.flush()?;

    let (tx, rx) = mpsc::channel::<io::Result<Vec<u8>>>();
    thread::Builder::new()
        .name("gridgloss-probe".into())
        .spawn(move || {
            let mut input = input;
            let mut buf = [0u8; 256];
            loop {
                match input.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(Ok(buf[..n].to_vec())).is_err() {
                            break;
                        }
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => {
                        let _ = tx.send(Err(err));
                        break;
                    }
                }
            }
        })?;

    let deadline = Instant::now() + timeout;
    let mut received = Vec::new();
    let mut reply = Reply::default();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(Ok(chunk)) => {
                received.extend_from_slice(&chunk);
                reply = scan_reply(&received);
                if reply.finished {
                    trace!(bytes = received.len(), "Terminal finished answering");
                    return reply.color.unwrap_or(Err(ProbeError::NoResponse));
                }
            }
            Ok(Err(err)) => return Err(err.into()),
            Err(RecvTimeoutError::Timeout) => {
                return reply.color.unwrap_or(Err(ProbeError::Timeout(timeout)));
            }
            Err(RecvTimeoutError::Disconnected) => {
                return reply.color.unwrap_or(Err(ProbeError::NoResponse));
            }
        }
    }
}

#[cfg(feature = "native")]
struct RawModeGuard;

#[cfg(feature = "native")]
impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

#[cfg(feature = "native")]
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

/// Query the background color of the terminal on stdin/stdout.
#[cfg(feature = "native")]
pub fn background_color() -> Result<RgbColor, ProbeError> {
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(ProbeError::NotATerminal);
    }
    let _raw = RawModeGuard::enable()?;
    let result = query_background_color(io::stdin(), &mut io::stdout(), DEFAULT_QUERY_TIMEOUT);
    debug!(?result, "Background color probe finished");
    result
}

/// Query the background color of the terminal on stdin/stdout.
#[cfg(not(feature = "native"))]
pub fn background_color() -> Result<RgbColor, ProbeError> {
    Err(ProbeError::Unsupported)
}

/// Whether the terminal on stdin/stdout has a dark background.
pub fn has_dark_background() -> Result<bool, ProbeError> {
    background_color().map(is_dark)
}
