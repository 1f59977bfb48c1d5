//! Scenario tests
//!
//! Each module drives one user-visible scenario across the fs, patch and
//! core crates together.

use testroom_core::Workspace;
use testroom_test_utils::workspace::{TestWorkspace, epoch};

// =============================================================================
// Scenario 1: Mirror staleness
// =============================================================================

mod staleness {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_newer_origin_files_are_recopied() {
        let ws = TestWorkspace::new();
        ws.write_origin_file("a.spec.ts", "a v1", 100);
        ws.write_origin_file("b.check.ts", "b v1", 50);

        let workspace = Workspace::open(ws.root()).unwrap();
        let (state, _) = workspace.select_origin(ws.origin()).unwrap();
        assert_eq!(ws.mirror_mtime("a.spec.ts"), epoch(100));
        assert_eq!(ws.mirror_mtime("b.check.ts"), epoch(50));

        let report = workspace.sync(&state).unwrap();
        assert!(report.copied.is_empty());
        assert_eq!(report.up_to_date, 2);

        ws.write_origin_file("a.spec.ts", "a v2", 200);
        let report = workspace.sync_stored().unwrap();
        let copied: Vec<&str> = report.copied.iter().map(|p| p.as_str()).collect();
        assert_eq!(copied, vec!["a.spec.ts"]);
        assert_eq!(ws.read_mirror_file("a.spec.ts"), "a v2");
        assert_eq!(ws.mirror_mtime("a.spec.ts"), epoch(200));
        assert_eq!(ws.read_mirror_file("b.check.ts"), "b v1");
    }

    #[test]
    fn mirror_only_files_survive_sync() {
        let ws = TestWorkspace::new();
        ws.write_origin_file("a.spec.ts", "a", 100);

        let workspace = Workspace::open(ws.root()).unwrap();
        workspace.select_origin(ws.origin()).unwrap();
        ws.write_mirror_file("local-only.spec.ts", "mine", 100);

        workspace.sync_stored().unwrap();
        assert_eq!(ws.read_mirror_file("local-only.spec.ts"), "mine");
    }
}

// =============================================================================
// Scenario 2: Alert channel on an inline checks object
// =============================================================================

mod alert_inline {
    use super::*;
    use pretty_assertions::assert_eq;
    use testroom_test_utils::fixtures::CHECKLY_INLINE;

    #[test]
    fn wiring_and_removal_restore_document() {
        let ws = TestWorkspace::new();
        ws.write_root_file("checkly.config.ts", CHECKLY_INLINE);
        let workspace = Workspace::open(ws.root()).unwrap();

        assert!(workspace.upsert_alert_channel("x@y.com").unwrap());
        let wired = ws.read_root_file("checkly.config.ts");
        assert_eq!(wired.matches("new EmailAlertChannel(").count(), 1);
        assert!(wired.contains("address: 'x@y.com'"));
        assert!(wired.contains("alertChannels: [emailChannel]"));

        // Idempotent for the same address
        assert!(!workspace.upsert_alert_channel("x@y.com").unwrap());

        assert!(workspace.remove_alert_channel().unwrap());
        let restored = ws.read_root_file("checkly.config.ts");
        assert!(!restored.contains("emailChannel"));
        assert!(restored.contains("checks: { activated: true }"));
        assert_eq!(restored, CHECKLY_INLINE);
    }

    #[test]
    fn different_address_is_rejected() {
        let ws = TestWorkspace::new();
        ws.write_root_file("checkly.config.ts", CHECKLY_INLINE);
        let workspace = Workspace::open(ws.root()).unwrap();
        workspace.upsert_alert_channel("x@y.com").unwrap();
        let wired = ws.read_root_file("checkly.config.ts");

        let result = workspace.upsert_alert_channel("other@y.com");

        assert!(matches!(
            result,
            Err(testroom_core::Error::Patch {
                source: testroom_patch::Error::AlertChannelConflict { .. },
                ..
            })
        ));
        assert_eq!(ws.read_root_file("checkly.config.ts"), wired);
        assert_eq!(
            workspace.stored_email().unwrap().as_deref(),
            Some("x@y.com")
        );
    }
}

// =============================================================================
// Scenario 3: Fail-closed path rewrite
// =============================================================================

mod fail_closed {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_anchor_leaves_document_untouched() {
        let ws = TestWorkspace::new();
        let document = "export default defineConfig({\n  checks: {},\n})\n";
        ws.write_root_file("checkly.config.ts", document);
        ws.write_origin_file("a.spec.ts", "a", 100);

        let workspace = Workspace::open(ws.root()).unwrap();
        let (state, _) = workspace.select_origin(ws.origin()).unwrap();

        let result = workspace.update_path_fields(&state.mirror_path);

        assert!(matches!(
            result,
            Err(testroom_core::Error::Patch {
                source: testroom_patch::Error::FieldNotFound { .. },
                ..
            })
        ));
        assert_eq!(ws.read_root_file("checkly.config.ts"), document);
    }
}
