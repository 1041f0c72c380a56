//! Audits edits to `pubspec.yaml`.

use crate::manifest::{audit_manifest, ManifestAudit};
use crate::project::MANIFEST_FILE;
use crate::protocol::{HookInput, HookOutcome};
use crate::rules::summarize;

/// Messages included in the feedback line
const MAX_REPORTED: usize = 2;

pub fn run(input: &HookInput) -> HookOutcome {
    let tool_input = &input.tool_input;
    if !tool_input.file_path().ends_with(MANIFEST_FILE) {
        return HookOutcome::allow();
    }

    let content = tool_input.new_content();
    if content.is_empty() {
        return HookOutcome::allow();
    }

    outcome_for(&audit_manifest(content))
}

/// Errors block; warnings alone only warn.
pub fn outcome_for(audit: &ManifestAudit) -> HookOutcome {
    if !audit.errors.is_empty() {
        return HookOutcome::block(format!(
            "pubspec.yaml errors: {}",
            summarize(&audit.errors, MAX_REPORTED)
        ));
    }

    if !audit.warnings.is_empty() {
        return HookOutcome::warn(format!(
            "pubspec.yaml warnings: {}",
            summarize(&audit.warnings, MAX_REPORTED)
        ));
    }

    HookOutcome::allow()
}
