//! Runs the project formatter on Dart files after they are written.
//!
//! Formatting problems never block: a missing formatter is informational,
//! everything else is a warning.

use std::ffi::OsStr;
use std::path::Path;

use crate::config::FormatConfig;
use crate::protocol::{HookInput, HookOutcome};
use crate::rules::truncate_chars;
use crate::runner::{run_with_timeout, CommandOutcome, RunError};

pub const FORMATTED_EXTENSION: &str = ".dart";

const STDERR_EXCERPT: usize = 200;
const ERROR_EXCERPT: usize = 100;

/// What happened when the formatter ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Formatted,
    /// Formatter exited non-zero
    Failed { stderr: String },
    NotFound,
    TimedOut,
    /// Formatter could not be started or waited on
    Error(String),
}

pub fn run(input: &HookInput, config: &FormatConfig) -> HookOutcome {
    let file_path = input.tool_input.file_path();
    if !file_path.ends_with(FORMATTED_EXTENSION) {
        return HookOutcome::allow();
    }

    let path = Path::new(file_path);
    if !path.exists() {
        tracing::debug!(file_path, "skipping format of missing file");
        return HookOutcome::allow();
    }

    outcome_for(path, &format_file(path, config), config)
}

/// Run the configured formatter on `path`.
pub fn format_file(path: &Path, config: &FormatConfig) -> FormatOutcome {
    let args = config
        .args
        .iter()
        .map(OsStr::new)
        .chain(std::iter::once(path.as_os_str()));

    match run_with_timeout(&config.program, args, config.timeout()) {
        Ok(CommandOutcome::Completed { success: true, .. }) => FormatOutcome::Formatted,
        Ok(CommandOutcome::Completed { stderr, .. }) => FormatOutcome::Failed { stderr },
        Ok(CommandOutcome::TimedOut) => FormatOutcome::TimedOut,
        Err(RunError::NotFound { .. }) => FormatOutcome::NotFound,
        Err(e) => FormatOutcome::Error(e.to_string()),
    }
}

pub fn outcome_for(path: &Path, outcome: &FormatOutcome, config: &FormatConfig) -> HookOutcome {
    match outcome {
        FormatOutcome::Formatted => {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            HookOutcome::allow_with(format!("Auto-formatted: {file_name}"))
        }
        FormatOutcome::Failed { stderr } => HookOutcome::warn(format!(
            "Format warning: {}",
            truncate_chars(stderr, STDERR_EXCERPT)
        )),
        FormatOutcome::NotFound => HookOutcome::allow_with(format!(
            "Note: {} not available in PATH",
            config.display_command()
        )),
        FormatOutcome::TimedOut => {
            HookOutcome::warn("Format timeout - file may be too large")
        }
        FormatOutcome::Error(message) => HookOutcome::warn(format!(
            "Format error: {}",
            truncate_chars(message, ERROR_EXCERPT)
        )),
    }
}
