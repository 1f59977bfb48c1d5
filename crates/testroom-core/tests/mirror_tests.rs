//! Tests for the mirror sync engine

use pretty_assertions::assert_eq;
use std::fs;
use testroom_core::{Error, MirrorState, MirrorSync, Workspace};
use testroom_fs::NormalizedPath;
use testroom_test_utils::workspace::{TestWorkspace, epoch};

/// State for the sandbox origin without running the bootstrap copy.
fn plan_only(workspace: &Workspace, ws: &TestWorkspace) -> MirrorState {
    MirrorSync::new(workspace.root().clone())
        .plan(ws.origin())
        .unwrap()
}

fn names(report: &testroom_core::SyncReport) -> Vec<&str> {
    report.copied.iter().map(|p| p.as_str()).collect()
}

#[test]
fn test_select_origin_names_mirror_after_origin() {
    let ws = TestWorkspace::new();
    let workspace = Workspace::open(ws.root()).unwrap();

    let (state, _) = workspace.select_origin(ws.origin()).unwrap();

    assert_eq!(state.mirror_path, workspace.root().join("e2e"));
    assert_eq!(state.mirror_path.parent().as_ref(), Some(workspace.root()));
    assert_eq!(
        state.origin_path,
        NormalizedPath::canonicalize(ws.origin()).unwrap()
    );
}

#[test]
fn test_select_origin_overwrites_newer_mirror_files() {
    let ws = TestWorkspace::new();
    ws.write_origin_file("a.spec.ts", "origin", 100);
    ws.write_mirror_file("a.spec.ts", "edited in mirror", 500);
    let workspace = Workspace::open(ws.root()).unwrap();

    let (_, report) = workspace.select_origin(ws.origin()).unwrap();

    assert_eq!(names(&report), vec!["a.spec.ts"]);
    assert_eq!(ws.read_mirror_file("a.spec.ts"), "origin");
    assert_eq!(ws.mirror_mtime("a.spec.ts"), epoch(100));
}

#[test]
fn test_select_origin_rejects_missing_directory() {
    let ws = TestWorkspace::new();
    let workspace = Workspace::open(ws.root()).unwrap();

    let result = workspace.select_origin(ws.root().join("no-such-dir"));

    assert!(matches!(result, Err(Error::InvalidOrigin { .. })));
    assert_eq!(workspace.mirror_state().unwrap(), None);
}

#[test]
fn test_sync_end_to_end_staleness() {
    let ws = TestWorkspace::new();
    ws.write_origin_file("a.spec.ts", "a v1", 100);
    ws.write_origin_file("b.check.ts", "b v1", 50);
    let root = NormalizedPath::canonicalize(ws.root()).unwrap();
    let engine = MirrorSync::new(root.clone());
    let state = engine.plan(ws.origin()).unwrap();

    let first = engine.sync(&state).unwrap();
    assert_eq!(names(&first), vec!["a.spec.ts", "b.check.ts"]);
    assert_eq!(ws.mirror_mtime("a.spec.ts"), epoch(100));
    assert_eq!(ws.mirror_mtime("b.check.ts"), epoch(50));

    let second = engine.sync(&state).unwrap();
    assert!(second.copied.is_empty());
    assert_eq!(second.up_to_date, 2);

    ws.write_origin_file("a.spec.ts", "a v2", 200);
    let third = engine.sync(&state).unwrap();
    assert_eq!(names(&third), vec!["a.spec.ts"]);
    assert_eq!(third.up_to_date, 1);
    assert_eq!(ws.read_mirror_file("a.spec.ts"), "a v2");
    assert_eq!(ws.mirror_mtime("a.spec.ts"), epoch(200));
}

#[test]
fn test_sync_never_copies_when_mirror_is_as_new_or_newer() {
    let ws = TestWorkspace::new();
    ws.write_origin_file("same.spec.ts", "origin", 100);
    ws.write_origin_file("older.spec.ts", "origin", 100);
    ws.write_mirror_file("same.spec.ts", "mirror", 100);
    ws.write_mirror_file("older.spec.ts", "mirror", 300);
    let workspace = Workspace::open(ws.root()).unwrap();
    let state = plan_only(&workspace, &ws);

    let report = workspace.sync(&state).unwrap();

    assert!(report.copied.is_empty());
    assert_eq!(ws.read_mirror_file("same.spec.ts"), "mirror");
    assert_eq!(ws.read_mirror_file("older.spec.ts"), "mirror");
}

#[test]
fn test_sync_is_additive() {
    let ws = TestWorkspace::new();
    ws.write_origin_file("kept.spec.ts", "k", 100);
    ws.write_origin_file("deleted.spec.ts", "d", 100);
    let workspace = Workspace::open(ws.root()).unwrap();
    let (state, _) = workspace.select_origin(ws.origin()).unwrap();

    ws.write_mirror_file("mirror-only.spec.ts", "m", 10);
    fs::remove_file(ws.origin().join("deleted.spec.ts")).unwrap();
    workspace.sync(&state).unwrap();

    ws.assert_exists("e2e/mirror-only.spec.ts");
    ws.assert_exists("e2e/deleted.spec.ts");
    ws.assert_exists("e2e/kept.spec.ts");
}

#[test]
fn test_sync_recreates_directory_tree() {
    let ws = TestWorkspace::new();
    ws.write_origin_file("checkout/cart/add.spec.ts", "x", 100);
    fs::create_dir_all(ws.origin().join("empty/dir")).unwrap();
    let workspace = Workspace::open(ws.root()).unwrap();
    let state = plan_only(&workspace, &ws);

    let report = workspace.sync(&state).unwrap();

    assert_eq!(names(&report), vec!["checkout/cart/add.spec.ts"]);
    assert!(ws.mirror().join("empty/dir").is_dir());
}

#[test]
fn test_sync_stored_without_selection_is_not_configured() {
    let ws = TestWorkspace::new();
    let workspace = Workspace::open(ws.root()).unwrap();

    assert!(matches!(workspace.sync_stored(), Err(Error::NotConfigured)));
    ws.assert_missing(".testroom");
}

#[test]
fn test_sync_with_vanished_origin_fails() {
    let ws = TestWorkspace::new();
    let workspace = Workspace::open(ws.root()).unwrap();
    workspace.select_origin(ws.origin()).unwrap();
    fs::remove_dir_all(ws.origin()).unwrap();

    assert!(matches!(
        workspace.sync_stored(),
        Err(Error::InvalidOrigin { .. })
    ));
}

#[test]
fn test_selecting_root_does_not_recurse_into_mirror() {
    let ws = TestWorkspace::new();
    ws.write_root_file("tests/home.spec.ts", "home");
    let root = NormalizedPath::canonicalize(ws.root()).unwrap();
    let engine = MirrorSync::new(root.clone());
    // Mirror of the root lives inside the root itself.
    let state = MirrorState {
        origin_path: root.clone(),
        mirror_path: root.join("project"),
    };

    let first = engine.bootstrap(&state).unwrap();
    let second = engine.sync(&state).unwrap();

    assert!(names(&first).contains(&"tests/home.spec.ts"));
    assert!(second.copied.is_empty());
    assert!(!ws.root().join("project/project").exists());
}

#[test]
fn test_origin_equal_to_mirror_copies_nothing() {
    let ws = TestWorkspace::new();
    ws.write_mirror_file("x.spec.ts", "x", 100);
    let root = NormalizedPath::canonicalize(ws.root()).unwrap();
    let engine = MirrorSync::new(root.clone());

    let (state, report) = engine.select_origin(ws.mirror()).unwrap();

    assert_eq!(state.origin_path, state.mirror_path);
    assert!(report.copied.is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_not_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let ws = TestWorkspace::new();
    ws.write_origin_file("a.spec.ts", "a", 100);
    ws.write_origin_file("locked.spec.ts", "secret", 100);
    ws.write_origin_file("z.spec.ts", "z", 100);
    let locked = ws.origin().join("locked.spec.ts");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(&locked).is_ok() {
        // Running with privileges that ignore permission bits.
        return;
    }
    let workspace = Workspace::open(ws.root()).unwrap();
    let state = plan_only(&workspace, &ws);

    let report = workspace.sync(&state).unwrap();

    assert_eq!(names(&report), vec!["a.spec.ts", "z.spec.ts"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path.as_str(), "locked.spec.ts");
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_mirrored_as_its_target() {
    use std::os::unix::fs::symlink;
    use testroom_test_utils::workspace::write_stamped;

    let ws = TestWorkspace::new();
    ws.write_origin_file("real.spec.ts", "real", 100);
    let shared = ws.origin().parent().unwrap().join("shared.spec.ts");
    write_stamped(&shared, "shared", 150);
    symlink("../shared.spec.ts", ws.origin().join("linked.spec.ts")).unwrap();
    let workspace = Workspace::open(ws.root()).unwrap();
    let state = plan_only(&workspace, &ws);

    let report = workspace.sync(&state).unwrap();

    assert_eq!(names(&report), vec!["linked.spec.ts", "real.spec.ts"]);
    assert!(report.is_clean());
    assert_eq!(ws.read_mirror_file("linked.spec.ts"), "shared");
    assert_eq!(ws.mirror_mtime("linked.spec.ts"), epoch(150));
    assert!(!ws.mirror().join("linked.spec.ts").is_symlink());

    let report = workspace.sync(&state).unwrap();
    assert!(report.copied.is_empty());
    assert_eq!(report.up_to_date, 2);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_walked() {
    use std::os::unix::fs::symlink;
    use testroom_test_utils::workspace::write_stamped;

    let ws = TestWorkspace::new();
    let shared = ws.origin().parent().unwrap().join("shared");
    write_stamped(&shared.join("api.check.ts"), "api", 100);
    symlink(&shared, ws.origin().join("shared")).unwrap();
    let workspace = Workspace::open(ws.root()).unwrap();
    let state = plan_only(&workspace, &ws);

    let report = workspace.sync(&state).unwrap();

    assert_eq!(names(&report), vec!["shared/api.check.ts"]);
    assert_eq!(ws.read_mirror_file("shared/api.check.ts"), "api");
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_reported() {
    use std::os::unix::fs::symlink;

    let ws = TestWorkspace::new();
    ws.write_origin_file("a.spec.ts", "a", 100);
    symlink("../missing.spec.ts", ws.origin().join("broken.spec.ts")).unwrap();
    let workspace = Workspace::open(ws.root()).unwrap();
    let state = plan_only(&workspace, &ws);

    let report = workspace.sync(&state).unwrap();

    assert_eq!(names(&report), vec!["a.spec.ts"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path.as_str(), "broken.spec.ts");
    ws.assert_missing("e2e/broken.spec.ts");
}
