//! [`TestWorkspace`] builder for testroom test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use crate::fixtures;

/// A temporary sandbox holding a workspace root (`project/`) and a sibling
/// origin directory (`suites/e2e/`).
///
/// # Example
///
/// ```rust,no_run
/// use testroom_test_utils::workspace::TestWorkspace;
///
/// let ws = TestWorkspace::new().with_config_documents();
/// ws.write_origin_file("login.spec.ts", "test('login')", 100);
/// ws.assert_missing("e2e/login.spec.ts");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create the sandbox with empty `project/` and `suites/e2e/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("project")).unwrap();
        fs::create_dir_all(temp_dir.path().join("suites/e2e")).unwrap();
        Self { temp_dir }
    }

    /// Write the default Checkly and Playwright configs into the root.
    pub fn with_config_documents(self) -> Self {
        self.write_root_file("checkly.config.ts", fixtures::CHECKLY_CONFIG);
        self.write_root_file("playwright.config.ts", fixtures::PLAYWRIGHT_CONFIG);
        self
    }

    /// The workspace root.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// The origin directory.
    pub fn origin(&self) -> PathBuf {
        self.temp_dir.path().join("suites/e2e")
    }

    /// Where the origin is mirrored to.
    pub fn mirror(&self) -> PathBuf {
        self.root().join("e2e")
    }

    pub fn write_root_file(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read_root_file(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).unwrap()
    }

    /// Write a file under the origin and stamp it with `mtime` seconds past
    /// the epoch.
    pub fn write_origin_file(&self, relative: &str, content: &str, mtime: u64) {
        write_stamped(&self.origin().join(relative), content, mtime);
    }

    /// Write a file under the mirror and stamp it with `mtime`.
    pub fn write_mirror_file(&self, relative: &str, content: &str, mtime: u64) {
        write_stamped(&self.mirror().join(relative), content, mtime);
    }

    pub fn mirror_mtime(&self, relative: &str) -> SystemTime {
        fs::metadata(self.mirror().join(relative))
            .and_then(|m| m.modified())
            .unwrap()
    }

    pub fn read_mirror_file(&self, relative: &str) -> String {
        fs::read_to_string(self.mirror().join(relative)).unwrap()
    }

    /// Assert a path relative to the workspace root exists.
    pub fn assert_exists(&self, relative: &str) {
        let path = self.root().join(relative);
        assert!(path.exists(), "expected {} to exist", path.display());
    }

    /// Assert a path relative to the workspace root does not exist.
    pub fn assert_missing(&self, relative: &str) {
        let path = self.root().join(relative);
        assert!(!path.exists(), "expected {} to be absent", path.display());
    }
}

/// `mtime` seconds past the epoch.
pub fn epoch(mtime: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(mtime)
}

/// Write `content` to `path`, creating parents, then set its mtime.
pub fn write_stamped(path: &Path, content: &str, mtime: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(epoch(mtime)).unwrap();
}
