//! `rampart scaffold`: generate a Flutter project skeleton.

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::scaffold::{generate_project, ScaffoldConfig};

/// Configuration from `--config`, else piped stdin, else defaults.
fn load_config(config_file: Option<&Path>) -> Result<ScaffoldConfig> {
    if let Some(path) = config_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        return Ok(ScaffoldConfig::from_json_or_default(&raw));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(ScaffoldConfig::default());
    }
    let mut raw = String::new();
    stdin
        .lock()
        .read_to_string(&mut raw)
        .context("Failed to read config from stdin")?;
    Ok(ScaffoldConfig::from_json_or_default(&raw))
}

pub fn execute(config_file: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(config_file.as_deref())?;
    if let Some(output) = output {
        config.output_path = output;
    }

    println!("{}", "Project Generator".bold());
    println!("{}", "=".repeat(50));
    println!("Generating project: {}", config.project_name);

    let base = generate_project(&config, Local::now().naive_local())?;

    println!("{} Project created at: {}", "✓".green(), base.display());
    println!("\nNext steps:");
    println!("  cd {}", config.project_name);
    println!("  flutter pub get");
    println!("  flutter pub run build_runner build");
    println!("  flutter run");
    Ok(())
}
