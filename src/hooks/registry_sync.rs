//! Reminds the assistant to register new `.claude/` config files.

use std::path::Path;

use crate::protocol::{HookInput, HookOutcome};

/// A `.claude/` subdirectory mirrored in `registry.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedDir {
    /// Path fragment, e.g. `.claude/agents/`
    pub fragment: &'static str,
    /// Item name used in the reminder
    pub item: &'static str,
    pub extension: &'static str,
}

pub const TRACKED_DIRS: &[TrackedDir] = &[
    TrackedDir {
        fragment: ".claude/agents/",
        item: "agent",
        extension: ".md",
    },
    TrackedDir {
        fragment: ".claude/skills/",
        item: "skill",
        extension: ".md",
    },
    TrackedDir {
        fragment: ".claude/commands/",
        item: "command",
        extension: ".md",
    },
    TrackedDir {
        fragment: ".claude/templates/",
        item: "template",
        extension: ".template",
    },
    TrackedDir {
        fragment: ".claude/hooks/",
        item: "hook",
        extension: ".py",
    },
];

pub fn run(input: &HookInput) -> HookOutcome {
    let file_path = input.tool_input.file_path();
    if file_path.is_empty() {
        return HookOutcome::allow();
    }
    check_path(file_path, TRACKED_DIRS)
}

/// The first tracked directory contained in the path decides.
pub fn check_path(file_path: &str, tracked: &[TrackedDir]) -> HookOutcome {
    let normalized = file_path.replace('\\', "/");
    let Some(dir) = tracked.iter().find(|dir| normalized.contains(dir.fragment)) else {
        return HookOutcome::allow();
    };

    let file_name = Path::new(&normalized)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if file_name.eq_ignore_ascii_case("readme.md") || !file_name.ends_with(dir.extension) {
        return HookOutcome::allow();
    }

    HookOutcome::warn(format!(
        "New {} created: {file_name}. Remember to update registry.md and run /project:validate",
        dir.item
    ))
}
