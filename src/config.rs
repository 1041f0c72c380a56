//! Optional per-project configuration in `.claude/rampart.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Hooks never fail because of configuration: see [`RampartConfig::load_or_default`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::project::CLAUDE_DIR;

/// Config file name inside `.claude/`
pub const CONFIG_FILE: &str = "rampart.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampartConfig {
    pub format: FormatConfig,
    pub quality: QualityConfig,
    pub session: SessionConfig,
}

/// External formatter invoked by the `format` hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Formatter binary, resolved on `PATH`
    pub program: String,
    /// Arguments placed before the file path
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            program: "dart".to_string(),
            args: vec!["format".to_string()],
            timeout_secs: 30,
        }
    }
}

impl FormatConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Human-readable command, e.g. `dart format`.
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Quality findings block instead of warn
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for session marker files, relative to the project root
    pub sessions_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from(CLAUDE_DIR).join("memory").join("sessions"),
        }
    }
}

impl RampartConfig {
    /// Path of the config file for a project root.
    pub fn path_for(project_dir: &Path) -> PathBuf {
        project_dir.join(CLAUDE_DIR).join(CONFIG_FILE)
    }

    /// Load the project's config; a missing file yields defaults.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_for(project_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Load the project's config, logging and ignoring any error.
    pub fn load_or_default(project_dir: &Path) -> Self {
        Self::load(project_dir).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Absolute sessions directory for a project root.
    pub fn sessions_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.session.sessions_dir)
    }
}
