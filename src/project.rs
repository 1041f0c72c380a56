//! Project root discovery.

use std::env;
use std::path::{Path, PathBuf};

/// Assistant configuration directory at the project root
pub const CLAUDE_DIR: &str = ".claude";

/// Dependency manifest at the root of a Flutter project
pub const MANIFEST_FILE: &str = "pubspec.yaml";

/// Walk upward from `start` until a directory containing `marker` is found.
pub fn find_upward(start: &Path, marker: &str) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(marker).exists() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// Resolve the project root.
///
/// An explicit directory (flag or `$CLAUDE_PROJECT_DIR`) wins; otherwise the
/// nearest ancestor of the current directory containing `marker`; otherwise
/// the current directory itself.
pub fn resolve_root(explicit: Option<&Path>, marker: &str) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_upward(&cwd, marker).unwrap_or(cwd)
}
