//! The file tree of a generated project.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::config::ScaffoldConfig;
use super::pubspec::render_pubspec;

const GITIGNORE_TEMPLATE: &str = include_str!("../../resources/scaffold/gitignore.tmpl");
const ENV_EXAMPLE_TEMPLATE: &str = include_str!("../../resources/scaffold/env.example.tmpl");
const README_TEMPLATE: &str = include_str!("../../resources/scaffold/README.md.tmpl");

/// Clean Architecture directories created empty.
const EMPTY_DIRS: &[&str] = &[
    "lib/core/constants",
    "lib/core/errors",
    "lib/core/extensions",
    "lib/core/services",
    "lib/core/utils",
    "lib/features",
    "lib/shared/data",
    "lib/shared/domain/entities",
    "lib/shared/presentation/widgets",
    "lib/shared/presentation/theme",
    "test/helpers",
    "test/fixtures",
];

/// Asset folders kept in git with an empty `.gitkeep`.
const ASSET_DIRS: &[&str] = &["assets/images", "assets/icons", "assets/fonts"];

const PLACEHOLDER_SOURCES: &[(&str, &str)] = &[
    ("lib/app/app.dart", "// App widget\n"),
    ("lib/app/router/app_router.dart", "// Router configuration\n"),
    ("lib/main.dart", "// Entry point\n"),
    ("lib/injection.dart", "// Dependency injection\n"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Dir,
    File(String),
}

/// One path of the tree, relative to the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub entry: Entry,
}

impl TreeEntry {
    fn dir(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
            entry: Entry::Dir,
        }
    }

    fn file(path: &str, content: impl Into<String>) -> Self {
        Self {
            path: PathBuf::from(path),
            entry: Entry::File(content.into()),
        }
    }
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Replace each `{key}` in `template` with its value in one pass.
///
/// Substituted values are not rescanned and unknown keys are left as written.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            values
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

fn context_doc(config: &ScaffoldConfig, created: NaiveDateTime) -> String {
    format!(
        "# {} Context\n\nCreated: {}\nPlatforms: {}\n",
        config.project_name,
        created.format("%Y-%m-%dT%H:%M:%S%.6f"),
        config.platforms.join(", ")
    )
}

/// Every directory and file of the project, parents before children.
pub fn project_tree(config: &ScaffoldConfig, created: NaiveDateTime) -> Vec<TreeEntry> {
    let mut entries: Vec<TreeEntry> = EMPTY_DIRS.iter().map(|dir| TreeEntry::dir(dir)).collect();

    entries.extend(
        PLACEHOLDER_SOURCES
            .iter()
            .map(|(path, content)| TreeEntry::file(path, *content)),
    );
    entries.extend(
        ASSET_DIRS
            .iter()
            .map(|dir| TreeEntry::file(&format!("{dir}/.gitkeep"), "")),
    );

    let name = config.project_name.as_str();
    let db_name = config.db_name();
    entries.push(TreeEntry::file(
        ".claude/context.md",
        context_doc(config, created),
    ));
    entries.push(TreeEntry::file("pubspec.yaml", render_pubspec(config)));
    entries.push(TreeEntry::file(".gitignore", GITIGNORE_TEMPLATE));
    entries.push(TreeEntry::file(
        ".env.example",
        render_template(
            ENV_EXAMPLE_TEMPLATE,
            &[("app_name", name), ("db_name", &db_name)],
        ),
    ));
    entries.push(TreeEntry::file(
        "README.md",
        render_template(
            README_TEMPLATE,
            &[
                ("app_name", name),
                ("description", &config.description),
                ("flutter_version", "3.16"),
                ("dart_version", "3.0"),
                ("additional_prerequisites", ""),
                ("repo_url", &config.repo_url),
                ("project_name", name),
                ("license", "MIT"),
            ],
        ),
    ));

    entries
}

/// Create `entries` under `base`, overwriting files that already exist.
pub fn write_tree(base: &Path, entries: &[TreeEntry]) -> Result<()> {
    for TreeEntry { path, entry } in entries {
        let target = base.join(path);
        match entry {
            Entry::Dir => fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?,
            Entry::File(content) => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
                fs::write(&target, content)
                    .with_context(|| format!("Failed to write file: {}", target.display()))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn created() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn file<'a>(entries: &'a [TreeEntry], path: &str) -> &'a str {
        entries
            .iter()
            .find_map(|e| match &e.entry {
                Entry::File(content) if e.path == Path::new(path) => Some(content.as_str()),
                _ => None,
            })
            .unwrap_or_else(|| panic!("{path} not in tree"))
    }

    #[test]
    fn test_render_template() {
        assert_eq!(
            render_template("{a}-{b}-{a}", &[("a", "x"), ("b", "y")]),
            "x-y-x"
        );
        assert_eq!(render_template("{missing}", &[]), "{missing}");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        assert_eq!(
            render_template(
                "# {app_name}\n{description}\n",
                &[("app_name", "demo"), ("description", "Shows {app_name} literally")],
            ),
            "# demo\nShows {app_name} literally\n"
        );
    }

    #[test]
    fn test_env_example_uses_db_name() {
        let config = ScaffoldConfig::from_json_or_default(r#"{"project_name": "shop-app"}"#);
        let entries = project_tree(&config, created());
        let env = file(&entries, ".env.example");
        assert!(env.contains("APP_NAME=shop-app\n"));
        assert!(env.contains("localhost:5432/shop_app\n"));
    }

    #[test]
    fn test_readme_placeholders_are_filled() {
        let entries = project_tree(&ScaffoldConfig::default(), created());
        let readme = file(&entries, "README.md");
        assert!(readme.starts_with("# my_app\n\nA new Flutter application\n"));
        assert!(readme.contains("git clone https://github.com/user/repo\ncd my_app\n"));
        assert!(readme.contains("- Flutter SDK 3.16+\n- Dart SDK 3.0+\n"));
        assert!(!readme.contains('{'));
    }

    #[test]
    fn test_context_doc() {
        let entries = project_tree(&ScaffoldConfig::default(), created());
        assert_eq!(
            file(&entries, ".claude/context.md"),
            "# my_app Context\n\nCreated: 2026-01-15T10:30:00.000000\nPlatforms: android, ios, web\n"
        );
    }

    #[test]
    fn test_write_tree() {
        let temp = tempfile::tempdir().unwrap();
        let entries = project_tree(&ScaffoldConfig::default(), created());
        write_tree(temp.path(), &entries).unwrap();

        assert!(temp.path().join("lib/core/utils").is_dir());
        assert!(temp.path().join("assets/fonts/.gitkeep").is_file());
        assert_eq!(
            fs::read_to_string(temp.path().join("lib/main.dart")).unwrap(),
            "// Entry point\n"
        );
        assert!(fs::read_to_string(temp.path().join(".gitignore"))
            .unwrap()
            .starts_with("# Dependencies\n"));
    }
}
