//! Textual anchors used to locate fields and blocks.
//!
//! Every pattern the patch engine matches against lives here. Bump
//! [`ANCHOR_VERSION`] whenever an anchor changes shape so documents written
//! by an older layout can be told apart in bug reports.

use regex::Regex;
use std::sync::LazyLock;

/// Revision of the anchor set below.
pub const ANCHOR_VERSION: u32 = 1;

pub const CHECK_MATCH_FIELD: &str = "checkMatch";
pub const TEST_MATCH_FIELD: &str = "testMatch";
pub const TEST_DIR_FIELD: &str = "testDir";

/// Construct class imported for the alert channel.
pub const ALERT_CHANNEL_CLASS: &str = "EmailAlertChannel";
/// Module the construct is imported from.
pub const CONSTRUCTS_MODULE: &str = "checkly/constructs";
/// Identifier the declaration binds and `checks.alertChannels` references.
pub const ALERT_CHANNEL_BINDING: &str = "emailChannel";
/// Logical id passed as the first constructor argument.
pub const ALERT_CHANNEL_LOGICAL_ID: &str = "email-channel-1";

/// `checks: {` up to and including the opening brace.
pub static CHECKS_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bchecks\s*:\s*\{").expect("Invalid checks anchor"));

/// Any import that already brings `EmailAlertChannel` into scope.
pub static CONSTRUCT_IMPORTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*\{[^}]*\bEmailAlertChannel\b[^}]*\}\s*from\s*['"]checkly/constructs['"]"#)
        .expect("Invalid import anchor")
});

/// The exact single-line import written by [`crate::upsert_alert_channel`],
/// including its line break.
pub static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*import\s*\{\s*EmailAlertChannel\s*\}\s*from\s*['"]checkly/constructs['"][ \t]*;?[ \t]*(?:\r?\n)?"#,
    )
    .expect("Invalid import line anchor")
});

/// Start of the declaration statement, up to and including the `(` of the
/// constructor call.
pub static DECLARATION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:const|let|var)\s+emailChannel\s*=\s*new\s+EmailAlertChannel\s*\(")
        .expect("Invalid declaration anchor")
});

/// The address literal inside a declaration. Group 1 holds the raw literal
/// body for whichever quote style matched.
pub static ADDRESS_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\baddress\s*:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|`((?:[^`\\]|\\.)*)`)"#)
        .expect("Invalid address anchor")
});

/// The managed reference inside `checks`, with its optional trailing comma.
pub static ALERT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\balertChannels\s*:\s*\[\s*emailChannel\s*\](?:\s*,)?")
        .expect("Invalid alert reference anchor")
});

/// Any `alertChannels:` key.
pub static ALERT_CHANNELS_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\balertChannels\s*:").expect("Invalid alertChannels anchor"));

/// `<field>: ` followed by an opening quote. The quote is matched separately
/// because the regex crate has no backreferences.
fn field_pattern(field: &str) -> String {
    format!(r#"\b{}\s*:\s*['"`]"#, regex::escape(field))
}

static CHECK_MATCH_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&field_pattern(CHECK_MATCH_FIELD)).expect("Invalid checkMatch anchor")
});

static TEST_MATCH_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&field_pattern(TEST_MATCH_FIELD)).expect("Invalid testMatch anchor")
});

static TEST_DIR_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&field_pattern(TEST_DIR_FIELD)).expect("Invalid testDir anchor")
});

/// A path-valued field rewritten to point at the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathField {
    /// Checkly `checkMatch`
    CheckMatch,
    /// Checkly `testMatch`
    TestMatch,
    /// Playwright `testDir`
    TestDir,
}

impl PathField {
    pub fn name(self) -> &'static str {
        match self {
            Self::CheckMatch => CHECK_MATCH_FIELD,
            Self::TestMatch => TEST_MATCH_FIELD,
            Self::TestDir => TEST_DIR_FIELD,
        }
    }

    pub fn anchor(self) -> &'static Regex {
        match self {
            Self::CheckMatch => &CHECK_MATCH_ANCHOR,
            Self::TestMatch => &TEST_MATCH_ANCHOR,
            Self::TestDir => &TEST_DIR_ANCHOR,
        }
    }
}

impl std::fmt::Display for PathField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry injected as the first member of `checks`.
pub fn alert_reference_entry() -> String {
    format!("alertChannels: [{}],", ALERT_CHANNEL_BINDING)
}

/// Import line prepended when the construct is not yet imported.
pub fn import_line() -> String {
    format!("import {{ {} }} from '{}'", ALERT_CHANNEL_CLASS, CONSTRUCTS_MODULE)
}

/// Declaration statement binding [`ALERT_CHANNEL_BINDING`] to `address`.
pub fn declaration(address: &str, newline: &str) -> String {
    format!(
        "const {binding} = new {class}('{id}', {{{nl}  address: '{address}',{nl}}})",
        binding = ALERT_CHANNEL_BINDING,
        class = ALERT_CHANNEL_CLASS,
        id = ALERT_CHANNEL_LOGICAL_ID,
        address = escape_single_quoted(address),
        nl = newline,
    )
}

/// Escape a value for a single-quoted JS string literal.
pub fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
