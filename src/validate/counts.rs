//! Tracked-directory file counts and the counts documented in `registry.md`.

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Registry file inside `.claude/`
pub const REGISTRY_FILE: &str = "registry.md";

/// A kind of configuration file mirrored in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Agents,
    Skills,
    Commands,
    Templates,
    Hooks,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Agents,
        Category::Skills,
        Category::Commands,
        Category::Templates,
        Category::Hooks,
    ];

    /// Directory name under `.claude/`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Agents => "agents",
            Category::Skills => "skills",
            Category::Commands => "commands",
            Category::Templates => "templates",
            Category::Hooks => "hooks",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Category::Templates => ".template",
            Category::Hooks => ".py",
            _ => ".md",
        }
    }

    /// Hook scripts are counted even when named `readme`.
    pub fn excludes_readme(&self) -> bool {
        !matches!(self, Category::Hooks)
    }

    /// Row label in the registry summary table.
    fn registry_row(&self) -> &'static str {
        match self {
            Category::Agents => r"Total\s+Agents",
            Category::Skills => r"Total\s+Skills",
            Category::Commands => "Commands",
            Category::Templates => "Templates",
            Category::Hooks => "Hooks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Agents => "Agents",
            Category::Skills => "Skills",
            Category::Commands => "Commands",
            Category::Templates => "Templates",
            Category::Hooks => "Hooks",
        };
        write!(f, "{label}")
    }
}

/// `| Total Agents | 34 |` style rows, one per category.
static REGISTRY_ROWS: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    Category::ALL
        .iter()
        .map(|category| {
            let pattern = format!(r"\|\s*{}\s*\|\s*(\d+)\s*\|", category.registry_row());
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .expect("registry row pattern is valid");
            (*category, regex)
        })
        .collect()
});

/// Files of `category` directly inside `claude_dir/<dir>`, sorted.
pub fn list_files(claude_dir: &Path, category: Category) -> Result<Vec<PathBuf>> {
    let dir = claude_dir.join(category.dir_name());
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/*{}",
        Pattern::escape(&dir.to_string_lossy()),
        category.extension()
    );
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, options)
        .with_context(|| format!("Invalid glob pattern: {pattern}"))?
    {
        let path = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if !path.is_file() {
            continue;
        }
        if category.excludes_readme() && is_readme(&path) {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

fn is_readme(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().eq_ignore_ascii_case("readme.md"))
}

/// Counts documented in the registry text; absent rows are omitted.
pub fn parse_registry_counts(content: &str) -> BTreeMap<Category, usize> {
    REGISTRY_ROWS
        .iter()
        .filter_map(|(category, regex)| {
            let count = regex.captures(content)?[1].parse().ok()?;
            Some((*category, count))
        })
        .collect()
}

/// Registry counts for a `.claude` directory; a missing registry documents nothing.
pub fn read_registry_counts(claude_dir: &Path) -> Result<BTreeMap<Category, usize>> {
    let path = claude_dir.join(REGISTRY_FILE);
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_registry_counts(&content))
}
