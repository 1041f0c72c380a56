//! Reference checks for `.claude/settings.json`.
//!
//! Hook commands come in two shapes. The legacy shape lists argv directly:
//!
//! ```json
//! {"hooks": {"PreToolUse": [{"command": ["python3", ".claude/hooks/block.py"]}]}}
//! ```
//!
//! The nested shape groups string commands under a matcher:
//!
//! ```json
//! {"hooks": {"PreToolUse": [{"matcher": "Bash", "hooks": [
//!     {"type": "command", "command": "python3 $CLAUDE_PROJECT_DIR/.claude/hooks/block.py"}
//! ]}]}}
//! ```

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::project::CLAUDE_DIR;

pub const SETTINGS_FILE: &str = "settings.json";

/// Events whose hook scripts are checked
pub const CHECKED_EVENTS: &[&str] = &["PreToolUse", "PostToolUse", "Stop"];

const PROJECT_DIR_PREFIXES: &[&str] = &["$CLAUDE_PROJECT_DIR/", "${CLAUDE_PROJECT_DIR}/"];

/// Issues found in the settings file of `project_root`.
pub fn check_settings(project_root: &Path) -> Vec<String> {
    let path = project_root.join(CLAUDE_DIR).join(SETTINGS_FILE);
    if !path.exists() {
        return vec![format!("{SETTINGS_FILE} not found")];
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return vec![format!("{SETTINGS_FILE} could not be read: {e}")],
    };
    let settings: Value = match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => return vec![format!("{SETTINGS_FILE} is invalid JSON: {e}")],
    };

    let mut issues = check_context(&settings, project_root);
    issues.extend(check_hook_scripts(&settings, project_root));
    issues
}

/// `context.autoLoad` files and `context.onFileMatch` skills must exist.
fn check_context(settings: &Value, project_root: &Path) -> Vec<String> {
    let mut issues = Vec::new();
    let context = &settings["context"];

    for file in string_items(&context["autoLoad"]) {
        if !project_root.join(file).exists() {
            issues.push(format!("autoLoad file missing: {file}"));
        }
    }

    if let Some(matches) = context["onFileMatch"].as_object() {
        for (pattern, skills) in matches {
            for skill in string_items(skills) {
                if !project_root.join(skill).exists() {
                    issues.push(format!(
                        "onFileMatch skill missing: {skill} (pattern: {pattern})"
                    ));
                }
            }
        }
    }

    issues
}

fn check_hook_scripts(settings: &Value, project_root: &Path) -> Vec<String> {
    let mut issues = Vec::new();

    for event in CHECKED_EVENTS {
        let Some(entries) = settings["hooks"][*event].as_array() else {
            continue;
        };
        for entry in entries {
            for script in referenced_scripts(entry) {
                if !project_root.join(&script).exists() {
                    issues.push(format!("{event} hook file missing: {script}"));
                }
            }
        }
    }

    issues
}

/// Script paths referenced by one hook entry, in either shape.
pub fn referenced_scripts(entry: &Value) -> Vec<String> {
    let mut scripts = Vec::new();

    match &entry["command"] {
        Value::Array(argv) => {
            if let Some(script) = argv.get(1).and_then(Value::as_str) {
                scripts.push(script.to_string());
            }
        }
        Value::String(command) => scripts.extend(scripts_in_command(command)),
        _ => {}
    }

    if let Some(nested) = entry["hooks"].as_array() {
        for hook in nested {
            scripts.extend(referenced_scripts(hook));
        }
    }

    scripts
}

/// Tokens of a shell command line that point into `.claude/`.
fn scripts_in_command(command: &str) -> Vec<String> {
    command
        .split_whitespace()
        .map(|token| token.trim_matches(|c| c == '"' || c == '\''))
        .map(|token| {
            PROJECT_DIR_PREFIXES
                .iter()
                .find_map(|prefix| token.strip_prefix(prefix))
                .unwrap_or(token)
        })
        .filter(|token| token.starts_with(".claude/"))
        .map(str::to_string)
        .collect()
}

fn string_items(value: &Value) -> impl Iterator<Item = &str> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}
