//! Path-field rewriting for the Checkly and Playwright documents.

use testroom_fs::NormalizedPath;

use crate::anchors::PathField;
use crate::error::{Error, Result};
use crate::scan;

/// `<mirror>/**/*.check.<ext>`
pub fn check_match_glob(mirror: &NormalizedPath, extension: &str) -> String {
    format!("{}/**/*.check.{}", mirror, extension)
}

/// `<mirror>/**/*.spec.<ext>`
pub fn test_match_glob(mirror: &NormalizedPath, extension: &str) -> String {
    format!("{}/**/*.spec.{}", mirror, extension)
}

/// Replace the string value of the first live `field: '<value>'` in `doc`.
///
/// Occurrences inside comments or other string literals are ignored. The
/// original quote character is kept and escaped inside `value`; in template
/// literals `$` is escaped too so the value is never interpolated.
///
/// # Errors
///
/// Returns [`Error::FieldNotFound`] when no quoted value follows the anchor.
pub fn replace_field(doc: &str, field: PathField, value: &str) -> Result<String> {
    let not_found = || Error::FieldNotFound {
        field: field.name().to_string(),
    };

    let found = scan::find_in_code(doc, field.anchor()).ok_or_else(not_found)?;
    let open = found.end() - 1;
    let close = scan::string_end(doc, open).ok_or_else(not_found)?;

    let escaped = escape_for_quote(value, doc.as_bytes()[open]);

    let mut out = String::with_capacity(doc.len() + escaped.len());
    out.push_str(&doc[..=open]);
    out.push_str(&escaped);
    out.push_str(&doc[close..]);
    Ok(out)
}

fn escape_for_quote(value: &str, quote: u8) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        let needs_escape = c == '\\'
            || c == char::from(quote)
            || (quote == b'`' && c == '$');
        if needs_escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Point `checkMatch` and `testMatch` of a Checkly document at `mirror`.
///
/// Both fields must exist; if either is missing nothing is rewritten.
pub fn update_path_fields(doc: &str, mirror: &NormalizedPath, extension: &str) -> Result<String> {
    let doc = replace_field(doc, PathField::CheckMatch, &check_match_glob(mirror, extension))?;
    let doc = replace_field(&doc, PathField::TestMatch, &test_match_glob(mirror, extension))?;
    tracing::debug!(mirror = %mirror, "Rewrote checkMatch and testMatch");
    Ok(doc)
}

/// Point `testDir` of a Playwright document at `mirror`.
pub fn update_test_dir(doc: &str, mirror: &NormalizedPath) -> Result<String> {
    let doc = replace_field(doc, PathField::TestDir, mirror.as_str())?;
    tracing::debug!(mirror = %mirror, "Rewrote testDir");
    Ok(doc)
}
