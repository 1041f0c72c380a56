//! Response document written to stdout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::verdict::Verdict;

/// The JSON object a hook prints.
///
/// ```json
/// {"feedback": "BLOCKED: ...", "block": true}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookResponse {
    /// Message shown to the assistant or user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Whether the tool call is refused
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<bool>,
    /// Whether the session may continue (Stop events)
    #[serde(rename = "continue", skip_serializing_if = "Option::is_none")]
    pub proceed: Option<bool>,
}

impl HookResponse {
    pub fn feedback(message: impl Into<String>) -> Self {
        Self {
            feedback: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_block(mut self, block: bool) -> Self {
        self.block = Some(block);
        self
    }

    pub fn with_continue(mut self, proceed: bool) -> Self {
        self.proceed = Some(proceed);
        self
    }
}

/// Verdict plus the optional response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    pub verdict: Verdict,
    pub response: Option<HookResponse>,
}

impl HookOutcome {
    /// Silent allow: no output, exit 0.
    pub fn allow() -> Self {
        Self {
            verdict: Verdict::Allow,
            response: None,
        }
    }

    /// Allow with an informational message.
    pub fn allow_with(feedback: impl Into<String>) -> Self {
        Self::new(Verdict::Allow, HookResponse::feedback(feedback))
    }

    /// Non-blocking warning.
    pub fn warn(feedback: impl Into<String>) -> Self {
        Self::new(Verdict::Warning, HookResponse::feedback(feedback))
    }

    /// Blocking failure; the response carries `"block": true`.
    pub fn block(feedback: impl Into<String>) -> Self {
        Self::new(
            Verdict::Block,
            HookResponse::feedback(feedback).with_block(true),
        )
    }

    pub fn new(verdict: Verdict, response: HookResponse) -> Self {
        Self {
            verdict,
            response: Some(response),
        }
    }

    pub fn feedback(&self) -> Option<&str> {
        self.response.as_ref().and_then(|r| r.feedback.as_deref())
    }

    pub fn exit_code(&self) -> u8 {
        self.verdict.exit_code()
    }

    /// Write the response document (if any) as a single JSON line.
    pub fn emit<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(response) = &self.response else {
            return Ok(());
        };
        let line = serde_json::to_string(response).context("Failed to serialize hook response")?;
        writeln!(out, "{line}").context("Failed to write hook response")?;
        out.flush().context("Failed to flush hook response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_serializes_block_flag() {
        let outcome = HookOutcome::block("no");
        let mut out = Vec::new();
        outcome.emit(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"feedback\":\"no\",\"block\":true}\n"
        );
        assert_eq!(outcome.exit_code(), 2);
    }

    #[test]
    fn test_silent_allow_emits_nothing() {
        let mut out = Vec::new();
        HookOutcome::allow().emit(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_continue_key_is_renamed() {
        let response = HookResponse::feedback("Session recorded").with_continue(true);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["continue"], true);
        assert!(json.get("block").is_none());
    }

    #[test]
    fn test_warning_has_no_block_key() {
        let outcome = HookOutcome::warn("careful");
        assert_eq!(outcome.feedback(), Some("careful"));
        let json = serde_json::to_value(outcome.response.as_ref().unwrap()).unwrap();
        assert!(json.get("block").is_none());
    }
}
