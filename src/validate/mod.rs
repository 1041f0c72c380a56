//! Project consistency validation.
//!
//! Compares the files under `.claude/` with the counts documented in
//! `registry.md`, checks that `settings.json` only references files that
//! exist, and lints skill frontmatter. Count and settings problems are
//! issues; skill and configuration problems are warnings.

pub mod counts;
pub mod report;
pub mod settings;
pub mod skills;

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{RampartConfig, CONFIG_FILE};
use crate::project::CLAUDE_DIR;

pub use counts::Category;
pub use report::{CategoryCount, ValidationReport};

/// Run every check against the project rooted at `project_root`.
pub fn validate_project(project_root: &Path) -> Result<ValidationReport> {
    let claude_dir = project_root.join(CLAUDE_DIR);

    let mut actual = BTreeMap::new();
    for category in Category::ALL {
        actual.insert(category, counts::list_files(&claude_dir, category)?.len());
    }
    let documented = counts::read_registry_counts(&claude_dir)?;
    tracing::debug!(?actual, ?documented, "validation counts");

    let mut report = ValidationReport::from_counts(&actual, &documented);
    report.issues.extend(settings::check_settings(project_root));
    report.warnings.extend(skills::check_skills(&claude_dir)?);

    if let Err(e) = RampartConfig::load(project_root) {
        report.warnings.push(format!("{CONFIG_FILE} is invalid: {e}"));
    }

    Ok(report)
}
