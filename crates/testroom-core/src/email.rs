//! Email shape check for alert-channel addresses.

use regex::Regex;
use std::sync::LazyLock;

use crate::{Error, Result};

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Check that `address` looks like `local@domain.tld` with no whitespace.
///
/// Returns the address unchanged on success.
pub fn validate_email(address: &str) -> Result<&str> {
    if EMAIL_SHAPE.is_match(address) {
        Ok(address)
    } else {
        Err(Error::InvalidEmail {
            address: address.to_string(),
        })
    }
}
