//! Blocks edits to files that look like they hold secrets.

use crate::protocol::{HookInput, HookOutcome};

/// Basename fragments of secret-like files (matched lower-case).
pub const SECRET_FRAGMENTS: &[&str] = &[
    ".env",
    ".env.local",
    ".env.development",
    ".env.staging",
    ".env.production",
    "secrets.",
    "credentials.",
    ".secret",
    "api_key",
    "private_key",
];

pub fn run(input: &HookInput) -> HookOutcome {
    check_path(input.tool_input.file_path(), SECRET_FRAGMENTS)
}

/// Block `file_path` if its lower-cased basename starts with or contains a fragment.
pub fn check_path(file_path: &str, fragments: &[&str]) -> HookOutcome {
    match matching_fragment(file_path, fragments) {
        Some(fragment) => {
            tracing::debug!(fragment, "secret file");
            HookOutcome::block(format!(
                "BLOCKED: Cannot edit '{file_path}' - this file may contain secrets. \
                 Secret files must be edited manually by the user for security reasons."
            ))
        }
        None => HookOutcome::allow(),
    }
}

fn matching_fragment<'a>(file_path: &str, fragments: &[&'a str]) -> Option<&'a str> {
    // text after the last `/`, empty for a trailing slash
    let file_name = file_path
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    if file_name.is_empty() {
        return None;
    }

    fragments
        .iter()
        .find(|fragment| file_name.starts_with(**fragment) || file_name.contains(**fragment))
        .copied()
}
