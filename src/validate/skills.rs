//! Frontmatter checks for skill files.

use anyhow::Result;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

use super::counts::{list_files, Category};
use crate::parser::{extract_frontmatter_block, has_frontmatter_delimiter, parse_yaml_block};

/// Warnings for one skill file's content.
///
/// Frontmatter that is not strict YAML (`globs: **/*.dart` reads as an alias)
/// is still accepted; its keys are then looked up line by line.
pub fn check_skill(name: &str, content: &str) -> Vec<String> {
    if !has_frontmatter_delimiter(content) {
        return vec![format!("Skill missing frontmatter: {name}")];
    }

    let block = match extract_frontmatter_block(content) {
        Ok(block) => block,
        Err(e) => {
            tracing::debug!(skill = name, error = %e, "unreadable skill frontmatter");
            return vec![format!("Skill has invalid frontmatter: {name}")];
        }
    };
    let keys = FrontmatterKeys::read(&block);

    let mut warnings = Vec::new();
    if !keys.contains("description") {
        warnings.push(format!("Skill missing description: {name}"));
    }
    if !keys.contains("globs") && !keys.contains("alwaysApply") {
        warnings.push(format!("Skill needs globs or alwaysApply: {name}"));
    }
    warnings
}

/// Top-level keys of a frontmatter block.
enum FrontmatterKeys<'a> {
    Yaml(Value),
    /// Block that did not parse as YAML
    Raw(&'a str),
}

impl<'a> FrontmatterKeys<'a> {
    fn read(block: &'a str) -> Self {
        match parse_yaml_block(block) {
            Ok(value) => Self::Yaml(value),
            Err(e) => {
                tracing::debug!(error = %e, "frontmatter is not strict YAML, scanning lines");
                Self::Raw(block)
            }
        }
    }

    fn contains(&self, key: &str) -> bool {
        match self {
            Self::Yaml(value) => value
                .as_mapping()
                .is_some_and(|mapping| mapping.contains_key(key)),
            Self::Raw(block) => block.lines().any(|line| {
                line.strip_prefix(key)
                    .is_some_and(|rest| rest.trim_start().starts_with(':'))
            }),
        }
    }
}

/// Warnings for every skill under `claude_dir/skills`.
pub fn check_skills(claude_dir: &Path) -> Result<Vec<String>> {
    let mut warnings = Vec::new();
    for path in list_files(claude_dir, Category::Skills)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match fs::read_to_string(&path) {
            Ok(content) => warnings.extend(check_skill(&name, &content)),
            Err(e) => warnings.push(format!("Skill could not be read: {name} ({e})")),
        }
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_skill() {
        let content = "---\ndescription: Widget rules\nglobs: [\"lib/**/*.dart\"]\n---\n# Widgets\n";
        assert!(check_skill("widgets.md", content).is_empty());
    }

    #[test]
    fn test_always_apply_satisfies_scope() {
        let content = "---\ndescription: Always on\nalwaysApply: true\n---\n";
        assert!(check_skill("core.md", content).is_empty());
    }

    #[test]
    fn test_missing_frontmatter() {
        assert_eq!(
            check_skill("plain.md", "# No frontmatter\n"),
            vec!["Skill missing frontmatter: plain.md"]
        );
    }

    #[test]
    fn test_unclosed_frontmatter_is_invalid() {
        assert_eq!(
            check_skill("broken.md", "---\ndescription: x\n"),
            vec!["Skill has invalid frontmatter: broken.md"]
        );
    }

    #[test]
    fn test_unquoted_glob_is_accepted() {
        let content = "---\ndescription: Dart rules\nglobs: **/*.dart\n---\n# Dart\n";
        assert!(check_skill("dart.md", content).is_empty());
    }

    #[test]
    fn test_non_yaml_frontmatter_still_checks_keys() {
        let content = "---\ndescription: Use when: x\nname: *odd\n---\n";
        assert_eq!(
            check_skill("odd.md", content),
            vec!["Skill needs globs or alwaysApply: odd.md"]
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            check_skill("bare.md", "---\nname: bare\n---\n"),
            vec![
                "Skill missing description: bare.md",
                "Skill needs globs or alwaysApply: bare.md",
            ]
        );
    }

    #[test]
    fn test_check_skills_skips_readme() {
        let temp = TempDir::new().unwrap();
        let skills = temp.path().join("skills");
        fs::create_dir_all(&skills).unwrap();
        fs::write(skills.join("README.md"), "# Skills index\n").unwrap();
        fs::write(skills.join("state.md"), "# no frontmatter\n").unwrap();

        assert_eq!(
            check_skills(temp.path()).unwrap(),
            vec!["Skill missing frontmatter: state.md"]
        );
    }
}
