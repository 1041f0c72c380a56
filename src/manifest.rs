//! `pubspec.yaml` inspection shared by the manifest auditor and the
//! gitignore synchronizer.
//!
//! The manifest is scanned line by line rather than parsed as YAML: the hooks
//! see partial edits (`new_string`) that are rarely valid documents on their own.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Minimum major version for `sdk:` / `flutter:` constraints
pub const MIN_SDK_MAJOR: u32 = 3;

pub const VERSION_FORMAT_ERROR: &str = "Version should follow format: X.Y.Z or X.Y.Z+build";

/// Package pairs that should not be used together.
pub const CONFLICTING_PACKAGES: &[(&[&str], &str)] = &[
    (
        &["provider", "riverpod"],
        "Both provider and riverpod detected - choose one state management",
    ),
    (
        &["get", "riverpod"],
        "Both GetX and Riverpod detected - may conflict",
    ),
    (
        &["get", "provider"],
        "Both GetX and Provider detected - may conflict",
    ),
    (
        &["bloc", "mobx"],
        "Both BLoC and MobX detected - choose one state management",
    ),
    (
        &["hive", "shared_preferences"],
        "Consider using only Hive if storing complex data",
    ),
    (
        &["dio", "http"],
        "Both dio and http packages - consider standardizing on one",
    ),
    (
        &["freezed", "built_value"],
        "Both freezed and built_value - choose one code generation",
    ),
];

/// Deprecated packages and what to use instead.
pub const DEPRECATED_PACKAGES: &[(&str, &str)] = &[
    ("flutter_webview_plugin", "Use webview_flutter instead"),
    ("url_launcher_web", "Included in url_launcher 6.0+"),
    ("shared_preferences_web", "Included in shared_preferences 2.0+"),
    ("path_provider_linux", "Included in path_provider 2.0+"),
    ("sqflite_ffi", "Use sqflite_common_ffi instead"),
    ("pedantic", "Use flutter_lints or very_good_analysis"),
    ("effective_dart", "Use flutter_lints or lints package"),
];

static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(dependencies|dev_dependencies):").expect("block header pattern is valid")
});

static PACKAGE_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+(\w+):").expect("package entry pattern is valid"));

static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^version:\s*(\d+\.\d+\.\d+)(\+\d+)?$").expect("version pattern is valid")
});

static SDK_CONSTRAINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"sdk:\s*["']>=?(\d+)\.(\d+)"#).expect("sdk constraint pattern is valid")
});

static FLUTTER_CONSTRAINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"flutter:\s*["']>=?(\d+)\.(\d+)"#).expect("flutter constraint pattern is valid")
});

/// Where the scanner is relative to a dependency block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    OutsideBlock,
    InsideBlock,
}

impl BlockState {
    /// State after reading a column-zero line.
    fn at_column_zero(line: &str) -> Self {
        if BLOCK_HEADER.is_match(line) {
            BlockState::InsideBlock
        } else {
            BlockState::OutsideBlock
        }
    }
}

fn starts_at_column_zero(line: &str) -> bool {
    line.chars().next().is_some_and(|c| !c.is_whitespace())
}

/// Package names declared under `dependencies:` and `dev_dependencies:`.
///
/// Any indented `name:` line inside a block counts, so nested keys such as
/// `sdk:` under `flutter:` are reported as well.
pub fn extract_packages(content: &str) -> BTreeSet<String> {
    let mut packages = BTreeSet::new();
    let mut state = BlockState::OutsideBlock;

    for line in content.lines() {
        if starts_at_column_zero(line) {
            state = BlockState::at_column_zero(line);
            continue;
        }

        if state == BlockState::InsideBlock {
            if let Some(caps) = PACKAGE_ENTRY.captures(line) {
                packages.insert(caps[1].to_string());
            }
        }
    }

    packages
}

/// Check the first `version:` line; `None` when it is well-formed or absent.
pub fn check_version_format(content: &str) -> Option<&'static str> {
    let line = content.lines().find(|line| line.starts_with("version:"))?;
    if VERSION_LINE.is_match(line.trim()) {
        None
    } else {
        Some(VERSION_FORMAT_ERROR)
    }
}

/// Warnings for every known-incompatible pair fully present in `packages`.
pub fn check_conflicts(packages: &BTreeSet<String>) -> Vec<String> {
    CONFLICTING_PACKAGES
        .iter()
        .filter(|(set, _)| set.iter().filter(|p| packages.contains(**p)).count() > 1)
        .map(|(_, message)| message.to_string())
        .collect()
}

/// Warnings for deprecated packages, in table order.
pub fn check_deprecated(packages: &BTreeSet<String>) -> Vec<String> {
    DEPRECATED_PACKAGES
        .iter()
        .filter(|(package, _)| packages.contains(*package))
        .map(|(package, replacement)| format!("{package} is deprecated: {replacement}"))
        .collect()
}

/// Warnings for `sdk:` / `flutter:` minimum versions below [`MIN_SDK_MAJOR`].
pub fn check_sdk_constraints(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    for (pattern, name) in [(&*SDK_CONSTRAINT, "SDK"), (&*FLUTTER_CONSTRAINT, "Flutter")] {
        let Some(caps) = pattern.captures(content) else {
            continue;
        };
        let Ok(major) = caps[1].parse::<u32>() else {
            continue;
        };
        if major < MIN_SDK_MAJOR {
            warnings.push(format!(
                "{name} constraint {}.{} is outdated - consider updating to {MIN_SDK_MAJOR}.0+",
                &caps[1], &caps[2]
            ));
        }
    }

    warnings
}

/// Findings for one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestAudit {
    /// Blocking problems
    pub errors: Vec<String>,
    /// Advisory problems
    pub warnings: Vec<String>,
}

impl ManifestAudit {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub fn audit_manifest(content: &str) -> ManifestAudit {
    let packages = extract_packages(content);

    let errors = check_version_format(content)
        .map(|e| vec![e.to_string()])
        .unwrap_or_default();

    let mut warnings = check_conflicts(&packages);
    warnings.extend(check_deprecated(&packages));
    warnings.extend(check_sdk_constraints(content));

    ManifestAudit { errors, warnings }
}
