//! `rampart install`: register every hook in `.claude/settings.json`.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::hooks::HookKind;
use crate::install::{hook_command, install_hooks, settings_path, InstallSummary};
use crate::project::{self, CLAUDE_DIR};

pub fn execute(project_dir: Option<&Path>, binary: &str) -> Result<()> {
    let root = project::resolve_root(project_dir, CLAUDE_DIR);
    let summary = install_hooks(&root, binary)?;
    let path = settings_path(&root);

    if summary.added.is_empty() {
        println!("Hooks already configured in {}", path.display());
        return Ok(());
    }

    println!(
        "{} Added {} hook(s) to {}",
        "✓".green().bold(),
        summary.added.len(),
        path.display()
    );
    for kind in added_kinds(&summary, binary) {
        println!(
            "  {:<12} {:<22} {:<18} {}",
            kind.event().to_string(),
            kind.matcher(),
            kind.name(),
            kind.description().dimmed()
        );
    }
    Ok(())
}

/// Hooks whose command this run added, in install order.
fn added_kinds(summary: &InstallSummary, binary: &str) -> Vec<HookKind> {
    HookKind::all()
        .iter()
        .copied()
        .filter(|kind| summary.added.contains(&hook_command(binary, *kind)))
        .collect()
}
