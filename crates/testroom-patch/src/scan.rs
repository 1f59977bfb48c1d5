//! Balanced-bracket scanning over JavaScript-like source text.
//!
//! A depth stack is pushed at every opening bracket and popped at every
//! closing one. Brackets inside string literals and comments are skipped, so
//! nested object literals never end a span early.
//!
//! The same literal and comment rules decide which regex matches sit in live
//! code: an anchor inside `// checks: { ... }` must never be patched.

use std::ops::Range;

use regex::{Match, Regex};

/// Find the index of the bracket closing the one at `open`.
///
/// `open` must index a `{`, `(` or `[`. Returns `None` when `open` is not an
/// opening bracket, when brackets are mismatched, or when the text ends first.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let first = *bytes.get(open)?;
    let mut stack = vec![closer_for(first)?];
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => {
                i = skip_string(bytes, i, quote)?;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = bytes[i..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |offset| i + offset);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let offset = text[i + 2..].find("*/")?;
                i += 2 + offset + 1;
            }
            b @ (b'{' | b'(' | b'[') => {
                stack.push(closer_for(b)?);
            }
            b @ (b'}' | b')' | b']') => {
                if stack.pop()? != b {
                    return None;
                }
                if stack.is_empty() {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'{' => Some(b'}'),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        _ => None,
    }
}

/// Returns the index of the closing quote of the literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            // Plain string literals cannot span lines; treat a bare newline
            // as the end so one stray quote does not swallow the document.
            b'\n' if quote != b'`' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Find the closing quote of a string literal whose opening quote is at
/// `open`. Escaped quotes are skipped.
pub fn string_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let quote = *bytes.get(open)?;
    if !matches!(quote, b'\'' | b'"' | b'`') {
        return None;
    }
    let end = skip_string(bytes, open, quote)?;
    (bytes.get(end) == Some(&quote)).then_some(end)
}

/// Byte ranges of string literals and comments in `text`, in order.
///
/// Literal ranges include both quotes. An unterminated literal or block
/// comment runs to the end of the text.
pub fn inert_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let end = match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => {
                skip_string(bytes, i, quote).map_or(bytes.len(), |close| close + 1)
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |offset| i + offset),
            b'/' if bytes.get(i + 1) == Some(&b'*') => text[i + 2..]
                .find("*/")
                .map_or(bytes.len(), |offset| i + 2 + offset + 2),
            _ => {
                i += 1;
                continue;
            }
        };
        spans.push(i..end);
        i = end;
    }

    spans
}

fn in_spans(spans: &[Range<usize>], pos: usize) -> bool {
    let idx = spans.partition_point(|span| span.end <= pos);
    spans.get(idx).is_some_and(|span| span.start <= pos)
}

/// Matches of `re` in `text` that start in live code.
///
/// Matches starting inside a string literal or comment are skipped and the
/// search resumes one character later, so a commented-out anchor never hides
/// a live one that overlaps it.
pub fn code_matches<'t>(text: &'t str, re: &Regex) -> impl Iterator<Item = Match<'t>> {
    let inert = inert_spans(text);
    let mut at = 0;

    std::iter::from_fn(move || {
        while at <= text.len() {
            let found = re.find_at(text, at)?;
            if in_spans(&inert, found.start()) {
                at = next_char(text, found.start());
                continue;
            }
            at = if found.is_empty() {
                next_char(text, found.end())
            } else {
                found.end()
            };
            return Some(found);
        }
        None
    })
}

/// First match of `re` in `text` that starts in live code.
pub fn find_in_code<'t>(text: &'t str, re: &Regex) -> Option<Match<'t>> {
    code_matches(text, re).next()
}

fn next_char(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}
