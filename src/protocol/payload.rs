//! Event payload read from stdin.

use serde::Deserialize;
use std::io::Read;
use thiserror::Error;

/// Why a payload could not be used.
///
/// Hooks never fail on a bad payload; callers fall back to
/// [`HookInput::default`]. The typed error keeps the degraded path testable.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("failed to read hook payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("hook payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hook payload is empty")]
    Empty,
}

/// One hook event as sent by the assistant.
///
/// Only the fields rampart reads are modelled; `tool_name`, `session_id`,
/// `hook_event_name` and friends are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HookInput {
    /// Arguments of the tool call the event is about
    pub tool_input: ToolInput,
    /// Why the session stopped (Stop events only)
    pub stop_reason: Option<String>,
}

/// Tool arguments relevant to rampart's checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolInput {
    pub file_path: Option<String>,
    pub command: Option<String>,
    pub new_string: Option<String>,
    pub content: Option<String>,
}

impl ToolInput {
    /// Target file path, or `""` when absent.
    pub fn file_path(&self) -> &str {
        self.file_path.as_deref().unwrap_or_default()
    }

    /// Shell command, or `""` when absent.
    pub fn command(&self) -> &str {
        self.command.as_deref().unwrap_or_default()
    }

    /// Text being written: `new_string` for edits, otherwise `content` for whole-file writes.
    pub fn new_content(&self) -> &str {
        match self.new_string.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => self.content.as_deref().unwrap_or_default(),
        }
    }
}

impl HookInput {
    /// Read a payload, degrading to an empty one when it is unusable.
    pub fn from_reader_or_default<R: Read>(reader: R) -> Self {
        read_payload(reader).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "using empty hook payload");
            Self::default()
        })
    }
}

/// Read and parse a payload from `reader`.
pub fn read_payload<R: Read>(mut reader: R) -> Result<HookInput, PayloadError> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    parse_payload(&raw)
}

/// Parse a payload from its raw JSON text.
pub fn parse_payload(raw: &str) -> Result<HookInput, PayloadError> {
    if raw.trim().is_empty() {
        return Err(PayloadError::Empty);
    }
    Ok(serde_json::from_str(raw)?)
}
