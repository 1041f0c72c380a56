//! Append-only writes under `fs2` advisory locks.
//!
//! Two hook processes may fire for the same edit. Locks are cooperative, so
//! they only help when every writer goes through these functions.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Append `line` plus a newline with one write under an exclusive lock.
///
/// The file and its parent directory are created when missing.
pub fn locked_append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open file for appending: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;

    file.write_all(format!("{line}\n").as_bytes())
        .with_context(|| format!("Failed to append to file: {}", path.display()))?;
    file.flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))
}

/// Read the current content and append whatever `build` derives from it.
///
/// The file is created if missing, then locked before it is read, so two
/// writers cannot both append the same missing text. When `build` returns
/// `None` nothing is written, and a file created by this call is removed
/// again. Returns what was appended.
pub fn locked_merge_append<F>(path: &Path, build: F) -> Result<Option<String>>
where
    F: FnOnce(&str) -> Option<String>,
{
    let existed = path.exists();
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;

    let mut current = String::new();
    file.read_to_string(&mut current)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let Some(addition) = build(&current) else {
        if !existed && current.is_empty() {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove empty file: {}", path.display()))?;
        }
        return Ok(None);
    };

    file.seek(SeekFrom::End(0))
        .with_context(|| format!("Failed to seek file: {}", path.display()))?;
    file.write_all(addition.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    file.flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(Some(addition))
}
