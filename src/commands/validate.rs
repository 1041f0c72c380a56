//! `rampart validate`: project consistency report.

use anyhow::Result;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use crate::project::{self, CLAUDE_DIR};
use crate::validate::validate_project;

pub fn execute(project_dir: Option<&Path>) -> Result<ExitCode> {
    let root = project::resolve_root(project_dir, CLAUDE_DIR);
    let report = validate_project(&root)?;

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    for line in report.render().lines() {
        println!("{}", highlight(line));
    }

    Ok(ExitCode::from(report.exit_code()))
}

fn highlight(line: &str) -> String {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];
    for marker in ["[OK]", "[X]", "[!]"] {
        let Some(rest) = trimmed.strip_prefix(marker) else {
            continue;
        };
        let painted = match marker {
            "[OK]" => marker.green(),
            "[X]" => marker.red(),
            _ => marker.yellow(),
        };
        return format!("{indent}{painted}{rest}");
    }
    line.to_string()
}
