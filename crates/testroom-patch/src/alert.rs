//! Email alert-channel wiring for the Checkly document.
//!
//! The wiring has two parts that are always added and removed together:
//!
//! 1. a declaration block at the top of the document (import + constructor
//!    call bound to [`ALERT_CHANNEL_BINDING`])
//! 2. an `alertChannels: [emailChannel],` entry as the first member of the
//!    `checks` object
//!
//! Upsert is idempotent and removal restores the document exactly, as long as
//! the inserted text was not edited by hand in between.

use std::ops::Range;

use crate::anchors::{
    self, ADDRESS_FIELD, ALERT_CHANNEL_BINDING, ALERT_CHANNELS_KEY, ALERT_REFERENCE, CHECKS_OPEN,
    CONSTRUCT_IMPORTED, DECLARATION_START, IMPORT_LINE,
};
use crate::error::{Error, Result};
use crate::scan;

/// Alert-channel lifecycle state of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertChannelState {
    Absent,
    Present {
        /// Raw address literal of the declaration, if one could be read.
        address: Option<String>,
        /// Whether `checks` references the channel.
        referenced: bool,
    },
}

/// Byte span of a `checks` object, braces included.
fn checks_span(doc: &str) -> Option<Range<usize>> {
    let found = scan::find_in_code(doc, &CHECKS_OPEN)?;
    let open = found.end() - 1;
    let close = scan::matching_close(doc, open)?;
    Some(open..close + 1)
}

/// Byte span of the declaration statement, from the start of its line through
/// the closing paren and an optional `;`.
fn declaration_span(doc: &str) -> Option<Range<usize>> {
    let found = scan::find_in_code(doc, &DECLARATION_START)?;
    let close = scan::matching_close(doc, found.end() - 1)?;
    let mut end = close + 1;
    if doc[end..].starts_with(';') {
        end += 1;
    }
    Some(found.start()..end)
}

fn declared_address(doc: &str, span: &Range<usize>) -> Option<String> {
    let declaration = &doc[span.clone()];
    let found = scan::find_in_code(declaration, &ADDRESS_FIELD)?;
    let caps = ADDRESS_FIELD.captures(&declaration[found.start()..])?;
    (1..=3)
        .find_map(|group| caps.get(group))
        .map(|m| m.as_str().to_string())
}

fn reference_in(doc: &str, checks: &Range<usize>) -> Option<Range<usize>> {
    scan::find_in_code(&doc[checks.clone()], &ALERT_REFERENCE)
        .map(|m| checks.start + m.start()..checks.start + m.end())
}

fn newline_of(doc: &str) -> &'static str {
    if doc.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Report whether `doc` declares the alert channel and whether `checks`
/// references it.
pub fn alert_channel_state(doc: &str) -> AlertChannelState {
    let Some(span) = declaration_span(doc) else {
        return AlertChannelState::Absent;
    };
    let referenced = checks_span(doc).is_some_and(|checks| reference_in(doc, &checks).is_some());
    AlertChannelState::Present {
        address: declared_address(doc, &span),
        referenced,
    }
}

/// Wire an email alert channel into a Checkly document.
///
/// - Prepends the declaration block when none exists.
/// - Injects the `checks` reference when it is missing.
/// - Leaves both untouched when they are already present.
///
/// # Errors
///
/// - [`Error::ChecksBlockNotFound`] when the document has no balanced
///   `checks: { ... }` object.
/// - [`Error::AlertChannelConflict`] when a declaration for a different
///   address already exists.
/// - [`Error::UnmanagedAlertChannels`] when `checks` holds some other
///   `alertChannels` list.
///
/// The document is never partially rewritten on error.
pub fn upsert_alert_channel(doc: &str, email: &str) -> Result<String> {
    let checks = checks_span(doc).ok_or(Error::ChecksBlockNotFound)?;
    let declaration = declaration_span(doc);

    if let Some(span) = &declaration
        && let Some(existing) = declared_address(doc, span)
        && existing != anchors::escape_single_quoted(email)
    {
        return Err(Error::AlertChannelConflict {
            existing,
            requested: email.to_string(),
        });
    }

    let needs_reference = reference_in(doc, &checks).is_none();
    let unmanaged = scan::find_in_code(&doc[checks.clone()], &ALERT_CHANNELS_KEY).is_some();
    if needs_reference && unmanaged {
        return Err(Error::UnmanagedAlertChannels);
    }

    let newline = newline_of(doc);
    let mut out = String::with_capacity(doc.len() + 160);

    if declaration.is_none() {
        if scan::find_in_code(doc, &CONSTRUCT_IMPORTED).is_none() {
            out.push_str(&anchors::import_line());
            out.push_str(newline);
        }
        out.push_str(&anchors::declaration(email, newline));
        out.push_str(newline);
        out.push_str(newline);
    }

    if needs_reference {
        let insert_at = checks.start + 1;
        out.push_str(&doc[..insert_at]);
        out.push_str(&reference_prefix(&doc[insert_at..]));
        out.push_str(&anchors::alert_reference_entry());
        out.push_str(&doc[insert_at..]);
    } else {
        out.push_str(doc);
    }

    tracing::debug!(
        binding = ALERT_CHANNEL_BINDING,
        declared = declaration.is_none(),
        referenced = needs_reference,
        "Upserted alert channel"
    );
    Ok(out)
}

/// Whitespace placed before the injected entry: the line break and
/// indentation of the object's first member for multi-line objects, a single
/// space otherwise.
fn reference_prefix(after_brace: &str) -> String {
    let leading = &after_brace[..after_brace.len() - after_brace.trim_start().len()];
    match leading.rfind('\n') {
        Some(idx) => {
            let newline = if leading[..idx].ends_with('\r') { "\r\n" } else { "\n" };
            format!("{}{}", newline, &leading[idx + 1..])
        }
        None => " ".to_string(),
    }
}

/// Remove the alert-channel declaration and its `checks` reference.
///
/// A document without either is returned unchanged.
pub fn remove_alert_channel(doc: &str) -> String {
    let mut out = doc.to_string();

    if let Some(checks) = checks_span(&out)
        && let Some(reference) = reference_in(&out, &checks)
    {
        let start = out[..reference.start].trim_end().len().max(checks.start + 1);
        out.replace_range(start..reference.end, "");
    }

    if let Some(span) = declaration_span(&out) {
        let mut end = span.end;
        end += out[end..].len() - out[end..].trim_start_matches([' ', '\t']).len();
        for _ in 0..2 {
            end += line_break_len(&out[end..]);
        }

        let start = scan::code_matches(&out[..span.start], &IMPORT_LINE)
            .find(|m| m.end() == span.start)
            .map_or(span.start, |m| m.start());

        out.replace_range(start..end, "");
    }

    if out != doc {
        tracing::debug!(binding = ALERT_CHANNEL_BINDING, "Removed alert channel");
    }
    out
}

fn line_break_len(text: &str) -> usize {
    if text.starts_with("\r\n") {
        2
    } else if text.starts_with('\n') {
        1
    } else {
        0
    }
}
