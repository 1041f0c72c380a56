//! Wiring the hooks into `.claude/settings.json`.
//!
//! Rules are merged into the assistant's nested hook format:
//!
//! ```json
//! {"hooks": {"PreToolUse": [
//!     {"matcher": "Bash", "hooks": [{"type": "command", "command": "rampart hook dangerous-command"}]}
//! ]}}
//! ```
//!
//! Commands already present anywhere under the event are left alone, and
//! every other setting is preserved.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::hooks::HookKind;
use crate::project::CLAUDE_DIR;
use crate::validate::settings::SETTINGS_FILE;

/// Default executable name used in installed commands
pub const DEFAULT_BINARY: &str = "rampart";

/// What an install run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    /// Commands added, in install order
    pub added: Vec<String>,
    /// Commands that were already configured
    pub already_present: Vec<String>,
}

/// Command line the assistant runs for `kind`.
pub fn hook_command(binary: &str, kind: HookKind) -> String {
    format!("{binary} hook {}", kind.name())
}

/// Merge every hook into `settings`, which must be a JSON object.
pub fn merge_hooks(settings: &mut Value, binary: &str) -> Result<InstallSummary> {
    let obj = settings
        .as_object_mut()
        .ok_or_else(|| anyhow!("settings must be a JSON object"))?;
    let hooks = obj
        .entry("hooks")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| anyhow!("hooks must be a JSON object"))?;

    let mut summary = InstallSummary::default();
    for kind in HookKind::all() {
        let command = hook_command(binary, *kind);
        let event = kind.event().to_string();
        let groups = hooks
            .entry(event.as_str())
            .or_insert_with(|| json!([]))
            .as_array_mut()
            .ok_or_else(|| anyhow!("hooks.{event} must be a JSON array"))?;

        if groups.iter().any(|group| group_has_command(group, &command)) {
            summary.already_present.push(command);
            continue;
        }

        let group = matcher_group(groups, kind.matcher())
            .with_context(|| format!("Invalid hooks.{event} entry"))?;
        group.push(json!({"type": "command", "command": command}));
        summary.added.push(command);
    }

    Ok(summary)
}

fn group_has_command(group: &Value, command: &str) -> bool {
    group["hooks"]
        .as_array()
        .into_iter()
        .flatten()
        .any(|hook| hook["command"].as_str() == Some(command))
}

/// The `hooks` list of the group for `matcher`, created when missing.
fn matcher_group<'a>(groups: &'a mut Vec<Value>, matcher: &str) -> Result<&'a mut Vec<Value>> {
    let existing = groups
        .iter()
        .position(|group| group["matcher"].as_str() == Some(matcher));
    let index = match existing {
        Some(index) => index,
        None => {
            groups.push(json!({"matcher": matcher, "hooks": []}));
            groups.len() - 1
        }
    };

    let group: &mut Map<String, Value> = groups[index]
        .as_object_mut()
        .ok_or_else(|| anyhow!("hook group for {matcher} must be a JSON object"))?;
    group
        .entry("hooks")
        .or_insert_with(|| json!([]))
        .as_array_mut()
        .ok_or_else(|| anyhow!("hooks of group {matcher} must be a JSON array"))
}

pub fn settings_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CLAUDE_DIR).join(SETTINGS_FILE)
}

/// Read, merge and write back the project's settings file.
pub fn install_hooks(project_dir: &Path, binary: &str) -> Result<InstallSummary> {
    if binary.trim().is_empty() {
        bail!("Binary name cannot be empty");
    }

    let path = settings_path(project_dir);
    let claude_dir = project_dir.join(CLAUDE_DIR);
    fs::create_dir_all(&claude_dir)
        .with_context(|| format!("Failed to create directory: {}", claude_dir.display()))?;

    let mut settings = if path.exists() {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        if content.trim().is_empty() {
            json!({})
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Refusing to overwrite invalid JSON: {}", path.display()))?
        }
    } else {
        json!({})
    };

    let summary = merge_hooks(&mut settings, binary)?;
    if summary.added.is_empty() {
        return Ok(summary);
    }

    let content =
        serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;
    fs::write(&path, format!("{content}\n"))
        .with_context(|| format!("Failed to write settings: {}", path.display()))?;
    Ok(summary)
}
