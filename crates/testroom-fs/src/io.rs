//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Sibling temp path in the same directory, so the final rename never
/// crosses a filesystem boundary.
fn temp_sibling(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers only ever observe the old or the
/// new content. An advisory lock is held on the temp file while writing.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    ensure_parent(&native_path)?;

    let temp_path = temp_sibling(&native_path);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Last-modified time of a file, or `None` when it does not exist.
pub fn modified_time(path: &Path) -> Result<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(meta) => meta
            .modified()
            .map(Some)
            .map_err(|e| Error::io(path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Set the last-modified time of an existing file.
///
/// Read-only files are stamped through a read handle; the owner may still
/// change their timestamps on unix.
pub fn set_modified_time(path: &Path, mtime: SystemTime) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .or_else(|_| File::open(path))
        .map_err(|e| Error::io(path, e))?;
    file.set_modified(mtime).map_err(|e| Error::io(path, e))
}

/// Copy `src` over `dst`, carrying the source modification time along.
///
/// The bytes land in a sibling temp file first and are renamed into place
/// once complete, so an interrupted copy never leaves a truncated destination
/// carrying a fresh timestamp.
pub fn copy_with_mtime(src: &Path, dst: &Path) -> Result<()> {
    let mtime = File::open(src)
        .and_then(|f| f.metadata())
        .and_then(|m| m.modified())
        .map_err(|e| Error::io(src, e))?;

    ensure_parent(dst)?;
    let temp_path = temp_sibling(dst);

    let staged = fs::copy(src, &temp_path)
        .map_err(|e| Error::io(src, e))
        .and_then(|_| set_modified_time(&temp_path, mtime))
        .and_then(|_| fs::rename(&temp_path, dst).map_err(|e| Error::io(dst, e)));

    if staged.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    staged
}

/// Remove a file, treating a missing file as success.
pub fn remove_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_file(&native_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}
