//! End-to-end integration test for the full workflow
//!
//! This test exercises the complete flow: select origin -> rewrite path
//! fields -> wire the alert channel -> remove it again.

use pretty_assertions::assert_eq;
use testroom_core::{StepOutcome, Workspace};
use testroom_fs::{NormalizedPath, WorkspacePath};
use testroom_test_utils::fixtures::{CHECKLY_CONFIG, PLAYWRIGHT_CONFIG};
use testroom_test_utils::workspace::TestWorkspace;

#[test]
fn test_full_workflow() {
    let ws = TestWorkspace::new().with_config_documents();
    ws.write_origin_file("login.spec.ts", "test('login')", 100);
    ws.write_origin_file("api/health.check.ts", "new ApiCheck('health')", 100);

    let workspace = Workspace::open(ws.root()).unwrap();

    // Select the origin: the mirror is bootstrapped and the mapping stored
    let (state, report) = workspace.select_origin(ws.origin()).unwrap();
    assert_eq!(report.copied.len(), 2);
    assert!(report.is_clean());
    assert_eq!(state.mirror_path.file_name(), Some("e2e"));
    ws.assert_exists("e2e/api/health.check.ts");
    ws.assert_exists(WorkspacePath::MirrorRecord.as_str());

    // Point both configs at the mirror
    assert!(workspace.update_path_fields(&state.mirror_path).unwrap());
    assert!(workspace.update_test_dir(&state.mirror_path).unwrap());

    let checkly = ws.read_root_file("checkly.config.ts");
    let check_glob = format!("checkMatch: '{}/**/*.check.ts'", state.mirror_path);
    let spec_glob = format!("testMatch: '{}/**/*.spec.ts'", state.mirror_path);
    assert!(checkly.contains(&check_glob), "got: {}", checkly);
    assert!(checkly.contains(&spec_glob), "got: {}", checkly);

    let playwright = ws.read_root_file("playwright.config.ts");
    assert_eq!(
        playwright,
        PLAYWRIGHT_CONFIG.replace("'./tests'", &format!("'{}'", state.mirror_path))
    );

    // Wire and unwire the alert channel on top of the rewritten document
    assert!(workspace.upsert_alert_channel("qa@example.com").unwrap());
    assert_eq!(
        workspace.stored_email().unwrap().as_deref(),
        Some("qa@example.com")
    );
    assert!(workspace.remove_alert_channel().unwrap());
    assert_eq!(ws.read_root_file("checkly.config.ts"), checkly);
    assert_eq!(workspace.stored_email().unwrap(), None);

    // Nothing left to apply
    let report = workspace.reconcile().unwrap();
    assert!(report.is_success());
    let outcomes: Vec<_> = report.steps.iter().map(|s| s.outcome.clone()).collect();
    assert_eq!(
        outcomes,
        vec![
            StepOutcome::Unchanged,
            StepOutcome::Unchanged,
            StepOutcome::Skipped,
        ]
    );
}

#[test]
fn test_reopened_workspace_sees_stored_state() {
    let ws = TestWorkspace::new().with_config_documents();
    ws.write_origin_file("a.spec.ts", "a", 100);

    {
        let workspace = Workspace::open(ws.root()).unwrap();
        workspace.select_origin(ws.origin()).unwrap();
        workspace.upsert_alert_channel("qa@example.com").unwrap();
    }

    // A fresh handle, as a later process would open it
    let workspace = Workspace::open(ws.root()).unwrap();
    let state = workspace.mirror_state().unwrap().unwrap();
    assert_eq!(
        state.origin_path,
        NormalizedPath::canonicalize(ws.origin()).unwrap()
    );
    assert_eq!(
        workspace.stored_email().unwrap().as_deref(),
        Some("qa@example.com")
    );

    // Reverting the document by hand is healed on reconcile
    ws.write_root_file("checkly.config.ts", CHECKLY_CONFIG);
    let report = workspace.reconcile().unwrap();
    assert!(report.is_success());
    let checkly = ws.read_root_file("checkly.config.ts");
    assert!(checkly.contains("address: 'qa@example.com'"));
    assert!(checkly.contains(&format!("{}/**/*.spec.ts", state.mirror_path)));
}
