//! Escape-aware wrapping and truncation.
//!
//! All widths are display columns. Escape sequences are carried through
//! untouched and never count toward a limit.

use crate::ansi::{self, RESET, SgrParam, Token};
use crate::measure::visible_width;

fn is_breakable_space(c: char) -> bool {
    c != '\u{a0}' && c != '\n' && c.is_whitespace()
}

/// Greedy line filler shared by the wrapping functions.
struct WordWrapper {
    limit: usize,
    out: String,
    line_width: usize,
    word: String,
    word_width: usize,
    space: String,
    space_width: usize,
    /// Per line break: whether whitespace separated the two lines.
    spaced: Vec<bool>,
}

impl WordWrapper {
    fn new(limit: usize, capacity: usize) -> Self {
        Self {
            limit,
            out: String::with_capacity(capacity),
            line_width: 0,
            word: String::new(),
            word_width: 0,
            space: String::new(),
            space_width: 0,
            spaced: Vec::new(),
        }
    }

    /// Start a new line, dropping pending whitespace.
    fn break_line(&mut self) {
        self.spaced.push(self.space_width > 0);
        self.out.push('\n');
        self.line_width = 0;
        self.drop_space();
    }

    fn drop_space(&mut self) {
        self.space.clear();
        self.space_width = 0;
    }

    fn take_space(&mut self) {
        self.out.push_str(&self.space);
        self.line_width += self.space_width;
        self.space.clear();
        self.space_width = 0;
    }

    fn flush_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        if self.word_width > 0 {
            let needed = self.line_width + self.space_width + self.word_width;
            if self.line_width > 0 && needed > self.limit {
                self.break_line();
            } else {
                self.take_space();
            }
        }
        self.out.push_str(&self.word);
        self.line_width += self.word_width;
        self.word.clear();
        self.word_width = 0;
    }

    /// Trailing whitespace survives only when it fits.
    fn flush_space(&mut self) {
        if self.line_width + self.space_width <= self.limit {
            self.take_space();
        } else {
            self.drop_space();
        }
    }

    fn push_token(&mut self, token: Token<'_>) {
        match token {
            // Escapes travel with the following word, so they survive dropped whitespace.
            Token::Control(seq) => self.word.push_str(seq),
            Token::Text('\n') => {
                self.flush_word();
                self.flush_space();
                self.spaced.push(true);
                self.out.push('\n');
                self.line_width = 0;
            }
            Token::Text(c) if is_breakable_space(c) => {
                self.flush_word();
                self.space.push(c);
                self.space_width += ansi::char_width(c);
            }
            Token::Text('-') => {
                self.word.push('-');
                self.word_width += 1;
                self.flush_word();
            }
            Token::Text(c) => {
                self.word.push(c);
                self.word_width += ansi::char_width(c);
            }
        }
    }

    fn finish(mut self) -> (String, Vec<bool>) {
        self.flush_word();
        self.flush_space();
        (self.out, self.spaced)
    }
}

/// Wrap at spaces and after hyphens. Words wider than `limit` are left intact.
///
/// ```rust
/// use gridgloss::wrap::word_wrap;
///
/// assert_eq!(word_wrap("the quick brown fox", 10), "the quick\nbrown fox");
/// assert_eq!(word_wrap("self-contained", 6), "self-\ncontained");
/// ```
pub fn word_wrap(s: &str, limit: usize) -> String {
    if limit == 0 {
        return s.to_string();
    }
    word_wrap_breaks(s, limit).0
}

/// Word wrap, also reporting for each line break whether it replaced
/// whitespace (`true`) or fell right after a hyphen (`false`).
fn word_wrap_breaks(s: &str, limit: usize) -> (String, Vec<bool>) {
    let mut wrapper = WordWrapper::new(limit, s.len() + s.len() / limit.max(1));
    for token in ansi::tokens(s) {
        wrapper.push_token(token);
    }
    wrapper.finish()
}

/// Split a single line into pieces no wider than `limit`, at any column.
fn chop(line: &str, limit: usize) -> Vec<String> {
    let mut pieces = vec![String::new()];
    let mut width = 0;
    for token in ansi::tokens(line) {
        match token {
            Token::Control(seq) => {
                if let Some(cur) = pieces.last_mut() {
                    cur.push_str(seq);
                }
            }
            Token::Text(c) => {
                let w = ansi::char_width(c);
                if width > 0 && width + w > limit {
                    pieces.push(String::new());
                    width = 0;
                }
                if let Some(cur) = pieces.last_mut() {
                    cur.push(c);
                }
                width += w;
            }
        }
    }
    pieces
}

/// Word wrap, then break any word still wider than `limit` at rune level.
///
/// ```rust
/// use gridgloss::wrap::hard_wrap;
///
/// assert_eq!(hard_wrap("Hello", 3), "Hel\nlo");
/// ```
pub fn hard_wrap(s: &str, limit: usize) -> String {
    if limit == 0 {
        return s.to_string();
    }
    let wrapped = word_wrap(s, limit);
    let mut out = String::with_capacity(wrapped.len());
    for (i, line) in wrapped.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if visible_width(line) <= limit {
            out.push_str(line);
        } else {
            out.push_str(&chop(line, limit).join("\n"));
        }
    }
    out
}

/// Wrap text to `limit` columns so every line can be styled on its own.
///
/// Lines are word wrapped; overlong words are broken and their remainder
/// flows into the following line of the same paragraph. SGR styling open at
/// the end of a line is closed there and reopened on the next line.
///
/// `limit == 0` returns the input unchanged.
pub fn wrap(s: &str, limit: usize) -> String {
    if limit == 0 {
        return s.to_string();
    }
    let mut lines: Vec<String> = Vec::new();
    for paragraph in s.split('\n') {
        lines.extend(wrap_paragraph(paragraph, limit));
    }
    carry_styles(&mut lines);
    lines.join("\n")
}

fn wrap_paragraph(paragraph: &str, limit: usize) -> Vec<String> {
    let (wrapped, mut spaced) = word_wrap_breaks(paragraph, limit);
    let mut lines: Vec<String> = wrapped.split('\n').map(str::to_string).collect();
    // `spaced[j]` describes the break after `lines[j]`.
    let mut i = 0;
    while i < lines.len() {
        if visible_width(&lines[i]) <= limit {
            i += 1;
            continue;
        }
        let mut pieces = hard_wrap(&lines[i], limit)
            .split('\n')
            .map(str::to_string)
            .collect::<Vec<_>>();
        if pieces.len() < 2 {
            i += 1;
            continue;
        }
        let Some(last) = pieces.pop() else {
            break;
        };
        let middle = pieces.len() - 1;
        let mut rest = pieces.into_iter();
        if let Some(first) = rest.next() {
            lines[i] = first;
        }
        let next = i + 1 + middle;
        lines.splice(i + 1..i + 1, rest);
        // The break after `lines[i]` now follows `last`; the new breaks are hard.
        let separated = if i < spaced.len() { spaced.remove(i) } else { true };
        spaced.splice(i..i, std::iter::repeat(false).take(middle + 1));
        match lines.get_mut(next) {
            Some(following) => {
                if separated {
                    following.insert(0, ' ');
                }
                following.insert_str(0, &last);
            }
            None => lines.push(last),
        }
        i += 1;
    }
    lines
}

fn is_full_reset(seq: &str) -> bool {
    ansi::sgr_params(seq).all(|p| matches!(p, SgrParam::Plain { code: Some(0), .. }))
}

fn starts_with_reset(seq: &str) -> bool {
    matches!(
        ansi::sgr_params(seq).next(),
        Some(SgrParam::Plain { code: Some(0), .. })
    )
}

/// Close SGR styling still open at each line end and replay it on the next line.
fn carry_styles(lines: &mut [String]) {
    let mut active: Vec<String> = Vec::new();
    let count = lines.len();
    for (i, line) in lines.iter_mut().enumerate() {
        let prefix = active.concat();
        for token in ansi::tokens(line) {
            let Token::Control(seq) = token else {
                continue;
            };
            if !ansi::is_sgr(seq) {
                continue;
            }
            if starts_with_reset(seq) {
                active.clear();
            }
            if !is_full_reset(seq) {
                active.push(seq.to_string());
            }
        }
        if !prefix.is_empty() {
            line.insert_str(0, &prefix);
        }
        if !active.is_empty() && i + 1 < count {
            line.push_str(RESET);
        }
    }
}

/// Shorten a single line to at most `limit` columns, ending it with `tail`.
///
/// Escape sequences after the cut are kept so trailing resets still apply.
/// A wide character that would straddle the limit is dropped.
///
/// ```rust
/// use gridgloss::wrap::truncate;
///
/// assert_eq!(truncate("Hello, World", 8, "…"), "Hello, …");
/// assert_eq!(truncate("\x1b[1mbold\x1b[0m", 2, ""), "\x1b[1mbo\x1b[0m");
/// ```
pub fn truncate(s: &str, limit: usize, tail: &str) -> String {
    if visible_width(s) <= limit {
        return s.to_string();
    }
    let budget = limit.saturating_sub(visible_width(tail));
    let mut out = String::with_capacity(s.len().min(limit * 4) + tail.len());
    let mut width = 0;
    let mut cut = false;
    for token in ansi::tokens(s) {
        match token {
            Token::Control(seq) => out.push_str(seq),
            Token::Text(_) if cut => {}
            Token::Text(c) => {
                let w = ansi::char_width(c);
                if width + w > budget {
                    cut = true;
                    out.push_str(tail);
                    continue;
                }
                out.push(c);
                width += w;
            }
        }
    }
    out
}

/// Truncate every line to `max_width` columns and keep at most `max_height`
/// lines. Zero disables either limit.
pub fn truncate_lines(s: &str, max_width: usize, max_height: usize) -> String {
    let lines = s.split('\n');
    let kept: Vec<String> = if max_height > 0 {
        lines.take(max_height).map(|l| cut_line(l, max_width)).collect()
    } else {
        lines.map(|l| cut_line(l, max_width)).collect()
    };
    kept.join("\n")
}

fn cut_line(line: &str, max_width: usize) -> String {
    if max_width == 0 {
        line.to_string()
    } else {
        truncate(line, max_width, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_wrap_keeps_long_words() {
        assert_eq!(word_wrap("a verylongword b", 4), "a\nverylongword\nb");
    }

    #[test]
    fn word_wrap_drops_space_at_break() {
        assert_eq!(word_wrap("aaa     bbb", 3), "aaa\nbbb");
    }

    #[test]
    fn word_wrap_keeps_leading_space() {
        assert_eq!(word_wrap("  ab cd", 5), "  ab\ncd");
    }

    #[test]
    fn word_wrap_keeps_escapes_across_breaks() {
        assert_eq!(word_wrap("aa \x1b[1mbb", 2), "aa\n\x1b[1mbb");
        assert_eq!(word_wrap("aa\x1b[31m \x1b[0mbb", 2), "aa\x1b[31m\n\x1b[0mbb");
    }

    #[test]
    fn word_wrap_preserves_newlines() {
        assert_eq!(word_wrap("one two\nthree", 3), "one\ntwo\nthree");
    }

    #[test]
    fn hard_wrap_breaks_long_words() {
        assert_eq!(hard_wrap("ab cdefgh", 4), "ab\ncdef\ngh");
        assert_eq!(hard_wrap("世界世", 4), "世界\n世");
    }

    #[test]
    fn wrap_reflows_fragments() {
        assert_eq!(wrap("aaaaaaa bb", 3), "aaa\naaa\na\nbb");
        assert_eq!(wrap("abcde fg", 4), "abcd\ne fg");
    }

    #[test]
    fn wrap_fragment_after_hyphen_joins_directly() {
        assert_eq!(wrap("abcde-f", 4), "abcd\ne-f");
    }

    #[test]
    fn wrap_keeps_space_after_hyphenated_word() {
        assert_eq!(wrap("abcde- f", 4), "abcd\ne- f");
        assert_eq!(wrap("abcdefg x- yy", 4), "abcd\nefg\nx-\nyy");
    }

    #[test]
    fn wrap_loses_no_text() {
        let input = "supercalifragilistic is a word";
        let out = wrap(input, 5);
        let words: Vec<&str> = out.split_whitespace().collect();
        assert_eq!(
            words,
            ["super", "calif", "ragil", "istic", "is", "a", "word"]
        );
        assert!(out.split('\n').all(|l| visible_width(l) <= 5));
    }

    #[test]
    fn wrap_zero_limit_is_identity() {
        assert_eq!(wrap("a b c", 0), "a b c");
    }

    #[test]
    fn wrap_reopens_styles_per_line() {
        let out = wrap("\x1b[1mhello world\x1b[0m", 5);
        assert_eq!(out, "\x1b[1mhello\x1b[0m\n\x1b[1mworld\x1b[0m");
    }

    #[test]
    fn truncate_with_tail() {
        assert_eq!(truncate("abcdef", 4, "."), "abc.");
        assert_eq!(truncate("abc", 4, "."), "abc");
    }

    #[test]
    fn truncate_drops_straddling_wide_char() {
        assert_eq!(truncate("a世界", 2, ""), "a");
    }

    #[test]
    fn truncate_lines_limits_both_axes() {
        assert_eq!(truncate_lines("abcd\nefgh\nijkl", 2, 2), "ab\nef");
        assert_eq!(truncate_lines("abcd\nefgh", 0, 0), "abcd\nefgh");
    }
}
