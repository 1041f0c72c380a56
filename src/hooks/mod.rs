//! The hook family.
//!
//! Every hook is a pure-ish function from [`HookInput`] (plus a
//! [`HookContext`] for the few that touch the filesystem) to a
//! [`HookOutcome`]. The `hook` subcommand wires stdin/stdout around them.
//!
//! ## Hooks
//!
//! - `dangerous-command`: blocks destructive shell commands
//! - `secret-file`: blocks edits to secret-looking files
//! - `manifest-audit`: checks `pubspec.yaml` version, conflicts and deprecations
//! - `format`: runs the formatter on edited `.dart` files
//! - `quality-scan`: warns on TODOs, dead code and debug leftovers
//! - `security-scan`: blocks hardcoded credentials, warns on risky code
//! - `gitignore-sync`: appends package-specific `.gitignore` entries
//! - `registry-sync`: reminds to update `registry.md` for new config files
//! - `session-end`: appends a per-day session marker line

pub mod dangerous_command;
pub mod format;
pub mod gitignore_sync;
pub mod manifest_audit;
pub mod quality_scan;
pub mod registry_sync;
pub mod secret_file;
pub mod security_scan;
pub mod session_end;

use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::RampartConfig;
use crate::project::{self, CLAUDE_DIR, MANIFEST_FILE};
use crate::protocol::{HookInput, HookOutcome};

/// Assistant lifecycle events a hook is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookEvent {
    /// Before a tool runs; exit 2 refuses the call
    PreToolUse,
    /// After a tool ran
    PostToolUse,
    /// When the session stops
    Stop,
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookEvent::PreToolUse => write!(f, "PreToolUse"),
            HookEvent::PostToolUse => write!(f, "PostToolUse"),
            HookEvent::Stop => write!(f, "Stop"),
        }
    }
}

/// Tool matcher for shell commands
pub const MATCH_BASH: &str = "Bash";
/// Tool matcher for file-writing tools
pub const MATCH_FILE_WRITES: &str = "Edit|Write|MultiEdit";
/// Tool matcher for every event
pub const MATCH_ALL: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum HookKind {
    DangerousCommand,
    SecretFile,
    ManifestAudit,
    QualityScan,
    SecurityScan,
    Format,
    GitignoreSync,
    RegistrySync,
    SessionEnd,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl HookKind {
    /// All hooks, in the order they are installed.
    pub fn all() -> &'static [HookKind] {
        &[
            HookKind::DangerousCommand,
            HookKind::SecretFile,
            HookKind::ManifestAudit,
            HookKind::QualityScan,
            HookKind::SecurityScan,
            HookKind::Format,
            HookKind::GitignoreSync,
            HookKind::RegistrySync,
            HookKind::SessionEnd,
        ]
    }

    /// Subcommand name, e.g. `dangerous-command`.
    pub fn name(&self) -> &'static str {
        match self {
            HookKind::DangerousCommand => "dangerous-command",
            HookKind::SecretFile => "secret-file",
            HookKind::ManifestAudit => "manifest-audit",
            HookKind::QualityScan => "quality-scan",
            HookKind::SecurityScan => "security-scan",
            HookKind::Format => "format",
            HookKind::GitignoreSync => "gitignore-sync",
            HookKind::RegistrySync => "registry-sync",
            HookKind::SessionEnd => "session-end",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HookKind::DangerousCommand => "Blocks destructive shell commands",
            HookKind::SecretFile => "Blocks edits to secret-looking files",
            HookKind::ManifestAudit => "Checks pubspec.yaml version format and dependencies",
            HookKind::QualityScan => "Warns on TODOs, dead code and debug leftovers",
            HookKind::SecurityScan => "Blocks hardcoded credentials in Dart sources",
            HookKind::Format => "Formats edited Dart files",
            HookKind::GitignoreSync => "Adds .gitignore entries for new packages",
            HookKind::RegistrySync => "Reminds to update registry.md for new config files",
            HookKind::SessionEnd => "Records a per-day session marker",
        }
    }

    pub fn event(&self) -> HookEvent {
        match self {
            HookKind::DangerousCommand
            | HookKind::SecretFile
            | HookKind::ManifestAudit
            | HookKind::QualityScan
            | HookKind::SecurityScan => HookEvent::PreToolUse,
            HookKind::Format | HookKind::GitignoreSync | HookKind::RegistrySync => {
                HookEvent::PostToolUse
            }
            HookKind::SessionEnd => HookEvent::Stop,
        }
    }

    pub fn matcher(&self) -> &'static str {
        match self {
            HookKind::DangerousCommand => MATCH_BASH,
            HookKind::SessionEnd => MATCH_ALL,
            _ => MATCH_FILE_WRITES,
        }
    }

    /// Marker used to discover the project root when none is given.
    pub fn root_marker(&self) -> &'static str {
        match self {
            HookKind::GitignoreSync => MANIFEST_FILE,
            _ => CLAUDE_DIR,
        }
    }

    pub fn run(&self, input: &HookInput, ctx: &HookContext) -> HookOutcome {
        match self {
            HookKind::DangerousCommand => dangerous_command::run(input),
            HookKind::SecretFile => secret_file::run(input),
            HookKind::ManifestAudit => manifest_audit::run(input),
            HookKind::QualityScan => quality_scan::run(input, ctx.config.quality.strict),
            HookKind::SecurityScan => security_scan::run(input),
            HookKind::Format => format::run(input, &ctx.config.format),
            HookKind::GitignoreSync => gitignore_sync::run(input, &ctx.project_dir),
            HookKind::RegistrySync => registry_sync::run(input),
            HookKind::SessionEnd => {
                session_end::run(input, &ctx.config.sessions_dir(&ctx.project_dir))
            }
        }
    }
}

/// Where a hook runs and how it is configured.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub project_dir: PathBuf,
    pub config: RampartConfig,
}

impl HookContext {
    pub fn new(project_dir: PathBuf, config: RampartConfig) -> Self {
        Self {
            project_dir,
            config,
        }
    }

    /// Resolve the project root for `kind` and load its configuration.
    pub fn resolve(explicit: Option<&Path>, kind: HookKind) -> Self {
        let project_dir = project::resolve_root(explicit, kind.root_marker());
        let config = RampartConfig::load_or_default(&project_dir);
        Self::new(project_dir, config)
    }
}
