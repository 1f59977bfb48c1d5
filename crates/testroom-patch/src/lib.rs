//! Anchor-based patching of test-runner configuration documents.
//!
//! Documents are treated as opaque text. Every operation locates a field or
//! block through a fixed anchor (see [`anchors`]), rewrites that span only and
//! returns the new document; everything else stays byte-identical.
//!
//! Two documents are supported:
//!
//! - the Checkly config (`checkMatch`, `testMatch` and the `checks: { ... }`
//!   object, optionally wired to an email alert channel)
//! - the Playwright config (`testDir`)
//!
//! Anchors only match in live code: a commented-out `// testDir: './old'` or
//! `// checks: { ... }` line is never patched.
//!
//! All functions are pure. A failing operation returns an error and never a
//! partially rewritten document.
//!
//! ```
//! use testroom_patch::{remove_alert_channel, upsert_alert_channel};
//!
//! let doc = "export default defineConfig({\n  checks: { activated: true },\n})\n";
//! let wired = upsert_alert_channel(doc, "ops@example.com").unwrap();
//! assert!(wired.contains("alertChannels: [emailChannel]"));
//! assert_eq!(remove_alert_channel(&wired), doc);
//! ```

pub mod alert;
pub mod anchors;
pub mod error;
pub mod fields;
pub mod scan;

pub use alert::{AlertChannelState, alert_channel_state, remove_alert_channel, upsert_alert_channel};
pub use anchors::PathField;
pub use error::{Error, Result};
pub use fields::{check_match_glob, replace_field, test_match_glob, update_path_fields, update_test_dir};
