//! Records that a session ended in a per-day marker file.
//!
//! One line is appended per stop event. The hook always lets the session
//! stop, even when the marker cannot be written.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

use crate::fs::locked_append_line;
use crate::protocol::{HookInput, HookOutcome, HookResponse, Verdict};
use crate::rules::truncate_chars;

const ERROR_EXCERPT: usize = 50;

/// Reason recorded when the payload carries none
pub const UNKNOWN_REASON: &str = "unknown";

pub fn run(input: &HookInput, sessions_dir: &Path) -> HookOutcome {
    let reason = input.stop_reason.as_deref().unwrap_or(UNKNOWN_REASON);
    let feedback = match record_session(sessions_dir, reason, Local::now().naive_local()) {
        Ok(path) => {
            tracing::debug!(path = %path.display(), reason, "session recorded");
            "Session recorded".to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to record session");
            let message = e.to_string();
            format!(
                "Could not record session: {}",
                truncate_chars(&message, ERROR_EXCERPT)
            )
        }
    };

    HookOutcome::new(
        Verdict::Allow,
        HookResponse::feedback(feedback).with_continue(true),
    )
}

/// Marker file for the day of `now`.
pub fn marker_path(sessions_dir: &Path, now: NaiveDateTime) -> PathBuf {
    sessions_dir.join(format!(".session-{}.marker", now.format("%Y-%m-%d")))
}

/// `2026-03-01T17:04:05.123456 - Session ended: end_turn`
pub fn marker_line(reason: &str, now: NaiveDateTime) -> String {
    format!(
        "{} - Session ended: {reason}",
        now.format("%Y-%m-%dT%H:%M:%S%.6f")
    )
}

/// Append one marker line, creating the directory as needed.
pub fn record_session(sessions_dir: &Path, reason: &str, now: NaiveDateTime) -> Result<PathBuf> {
    let path = marker_path(sessions_dir, now);
    locked_append_line(&path, &marker_line(reason, now))?;
    Ok(path)
}
