//! Flutter project scaffolding.
//!
//! Generates a Clean Architecture project skeleton: a `pubspec.yaml` whose
//! dependencies follow the chosen state management, routing and Firebase
//! options, plus ignore files, README, placeholder sources and asset
//! folders. Output is deterministic for a given configuration and time.

pub mod config;
pub mod pubspec;
pub mod tree;

use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::PathBuf;

use crate::validation::validate_project_name;

pub use config::{Routing, ScaffoldConfig, StateManagement};
pub use pubspec::render_pubspec;
pub use tree::{project_tree, write_tree, Entry, TreeEntry};

/// Generate the project described by `config`; returns its directory.
pub fn generate_project(config: &ScaffoldConfig, created: NaiveDateTime) -> Result<PathBuf> {
    validate_project_name(&config.project_name)?;

    let base = config.project_dir();
    let entries = project_tree(config, created);
    tracing::debug!(base = %base.display(), entries = entries.len(), "writing project");
    write_tree(&base, &entries)?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::fs;

    #[test]
    fn test_bloc_demo_project() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = ScaffoldConfig::from_json_or_default(
            r#"{"project_name": "demo", "state_management": "bloc"}"#,
        );
        config.output_path = temp.path().to_path_buf();

        let base = generate_project(&config, Local::now().naive_local()).unwrap();
        assert_eq!(base, temp.path().join("demo"));
        assert!(base.join("lib/main.dart").is_file());

        let pubspec = fs::read_to_string(base.join("pubspec.yaml")).unwrap();
        assert!(pubspec.contains("flutter_bloc"));
        assert!(pubspec.contains("bloc_test"));
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = ScaffoldConfig::from_json_or_default(r#"{"project_name": "../evil"}"#);
        config.output_path = temp.path().join("out");

        assert!(generate_project(&config, Local::now().naive_local()).is_err());
        assert!(!temp.path().join("out").exists());
    }
}
