//! Keeps the project `.gitignore` in step with `pubspec.yaml`.
//!
//! A baseline set of Flutter ignores is always ensured; packages that produce
//! generated or local-only files contribute their own group. Only missing
//! lines are appended, existing content is never rewritten.

use anyhow::Result;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use crate::fs::locked_merge_append;
use crate::manifest::extract_packages;
use crate::project::MANIFEST_FILE;
use crate::protocol::{HookInput, HookOutcome};
use crate::rules::truncate_chars;

pub const GITIGNORE_FILE: &str = ".gitignore";

const ERROR_EXCERPT: usize = 50;

/// A commented block of ignore patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoreGroup {
    pub header: &'static str,
    pub patterns: &'static [&'static str],
}

const fn group(header: &'static str, patterns: &'static [&'static str]) -> IgnoreGroup {
    IgnoreGroup { header, patterns }
}

/// Ignores every Flutter project needs.
pub const BASE_GROUPS: &[IgnoreGroup] = &[
    group("# Dependencies", &[".packages", ".pub/", "pubspec.lock"]),
    group("# Generated", &["*.g.dart", "*.freezed.dart", "*.mocks.dart"]),
    group("# IDE", &[".idea/", "*.iml", ".vscode/"]),
    group("# Build", &["build/", ".dart_tool/"]),
    group("# Environment", &[".env", ".env.*", "!.env.example"]),
    group("# OS", &[".DS_Store", "Thumbs.db"]),
];

/// Extra ignores per declared package.
pub const PACKAGE_GROUPS: &[(&str, IgnoreGroup)] = &[
    (
        "firebase_core",
        group(
            "# Firebase",
            &[
                "firebase_options.dart",
                "google-services.json",
                "GoogleService-Info.plist",
            ],
        ),
    ),
    (
        "firebase_crashlytics",
        group("# Crashlytics", &["**/firebase_crashlytics/"]),
    ),
    ("hive", group("# Hive database", &["*.hive", "*.lock", ".hive/"])),
    ("sqflite", group("# SQLite", &["*.db", "*.sqlite"])),
    ("drift", group("# Drift database", &["*.sqlite", "*.g.dart"])),
    ("freezed", group("# Freezed generated", &["*.freezed.dart"])),
    ("json_serializable", group("# JSON serializable", &["*.g.dart"])),
    ("build_runner", group("# Build runner", &[".dart_tool/build/"])),
    (
        "flutter_native_splash",
        group(
            "# Native splash generated",
            &["android/app/src/main/res/drawable/background.png"],
        ),
    ),
    ("flutter_launcher_icons", group("# Launcher icons generated", &[])),
    (
        "envied",
        group("# Envied generated", &["*.g.dart", ".env", ".env.*"]),
    ),
    (
        "dotenv",
        group("# Environment files", &[".env", ".env.*", "!.env.example"]),
    ),
    ("sentry_flutter", group("# Sentry", &["sentry.properties"])),
];

/// Groups that apply to a project declaring `packages`: the baseline first,
/// then package groups in table order.
pub fn applicable_groups(packages: &BTreeSet<String>) -> Vec<IgnoreGroup> {
    BASE_GROUPS
        .iter()
        .copied()
        .chain(
            PACKAGE_GROUPS
                .iter()
                .filter(|(package, _)| packages.contains(*package))
                .map(|(_, group)| *group),
        )
        .collect()
}

/// Lines to append so that `existing` covers every pattern in `groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePlan {
    lines: Vec<String>,
    added_patterns: usize,
}

impl IgnorePlan {
    pub fn build(existing: &str, groups: &[IgnoreGroup]) -> Self {
        let mut present: HashSet<&str> = existing.lines().map(str::trim).collect();
        let mut plan = Self::default();

        for group in groups {
            let missing: Vec<&str> = group
                .patterns
                .iter()
                .copied()
                .filter(|pattern| present.insert(*pattern))
                .collect();
            if missing.is_empty() {
                continue;
            }

            plan.lines.push(String::new());
            if present.insert(group.header) {
                plan.lines.push(group.header.to_string());
            }
            plan.added_patterns += missing.len();
            plan.lines.extend(missing.into_iter().map(str::to_string));
        }

        plan
    }

    pub fn is_empty(&self) -> bool {
        self.added_patterns == 0
    }

    /// Non-comment lines the plan appends.
    pub fn added_patterns(&self) -> usize {
        self.added_patterns
    }

    /// Text to append after `existing`.
    pub fn render(&self, existing: &str) -> String {
        let mut out = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            out.push('\n');
        }

        let lines = if existing.trim().is_empty() {
            // no separator before the first group of a fresh file
            self.lines.get(1..).unwrap_or_default()
        } else {
            &self.lines[..]
        };
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Result of synchronizing the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Unchanged,
    /// Number of patterns appended
    Appended(usize),
}

/// Append whatever `groups` require to the `.gitignore` at `path`.
pub fn sync_gitignore(path: &Path, groups: &[IgnoreGroup]) -> Result<WriteOutcome> {
    let mut added = 0;
    let appended = locked_merge_append(path, |existing| {
        let plan = IgnorePlan::build(existing, groups);
        added = plan.added_patterns();
        (!plan.is_empty()).then(|| plan.render(existing))
    })?;

    Ok(match appended {
        Some(_) => WriteOutcome::Appended(added),
        None => WriteOutcome::Unchanged,
    })
}

pub fn run(input: &HookInput, project_dir: &Path) -> HookOutcome {
    let tool_input = &input.tool_input;
    if !tool_input.file_path().ends_with(MANIFEST_FILE) {
        return HookOutcome::allow();
    }

    let content = tool_input.new_content();
    if content.is_empty() {
        return HookOutcome::allow();
    }

    let groups = applicable_groups(&extract_packages(content));
    let path = project_dir.join(GITIGNORE_FILE);

    match sync_gitignore(&path, &groups) {
        Ok(WriteOutcome::Unchanged) => HookOutcome::allow(),
        Ok(WriteOutcome::Appended(count)) => {
            tracing::debug!(count, path = %path.display(), "updated gitignore");
            HookOutcome::allow_with(format!(
                "Auto-updated .gitignore with {count} new entries"
            ))
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to update gitignore");
            let message = e.to_string();
            HookOutcome::warn(format!(
                "Could not update .gitignore: {}",
                truncate_chars(&message, ERROR_EXCERPT)
            ))
        }
    }
}
