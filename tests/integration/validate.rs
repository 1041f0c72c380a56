//! `rampart validate` against temporary `.claude/` trees

use std::fs;
use std::path::Path;
use std::process::Output;

use super::helpers::{claude_project, exit_code, rampart};

fn write_agents(root: &Path, count: usize) {
    let agents = root.join(".claude/agents");
    fs::create_dir_all(&agents).unwrap();
    for i in 0..count {
        fs::write(agents.join(format!("agent{i}.md")), "# agent\n").unwrap();
    }
}

fn validate(root: &Path) -> Output {
    let mut cmd = rampart(root);
    cmd.arg("validate");
    cmd.output().expect("run rampart validate")
}

#[test]
fn agent_count_mismatch_fails() {
    let project = claude_project();
    write_agents(project.path(), 4);
    fs::write(
        project.path().join(".claude/registry.md"),
        "| Metric | Count |\n|---|---|\n| Total Agents | 5 |\n",
    )
    .unwrap();
    fs::write(project.path().join(".claude/settings.json"), "{}").unwrap();

    let output = validate(project.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(exit_code(&output), 2);
    assert!(stdout.contains("  [X] Agents count mismatch: actual=4, registry=5\n"));
    assert!(stdout.contains("Total: 1 errors, 0 warnings"));
    // colors are disabled when stdout is a pipe
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn consistent_project_passes() {
    let project = claude_project();
    write_agents(project.path(), 2);
    fs::write(
        project.path().join(".claude/registry.md"),
        "| Total Agents | 2 |\n| Total Skills | 0 |\n| Commands | 0 |\n| Templates | 0 |\n",
    )
    .unwrap();
    fs::write(project.path().join(".claude/settings.json"), "{}").unwrap();

    let output = validate(project.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(exit_code(&output), 0, "{stdout}");
    assert!(stdout.starts_with("=== Project Validation Report ===\n"));
    assert!(stdout.contains("[OK] Agents: 2 (registry: 2)"));
    assert!(stdout.trim_end().ends_with("=== Validation Complete ==="));
}

#[test]
fn missing_hook_script_is_an_issue() {
    let project = claude_project();
    fs::write(
        project.path().join(".claude/settings.json"),
        r#"{"hooks": {"PreToolUse": [{"matcher": "Bash", "hooks": [
            {"type": "command", "command": "python3 .claude/hooks/gone.py"}
        ]}]}}"#,
    )
    .unwrap();

    let output = validate(project.path());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(exit_code(&output), 2);
    assert!(stdout.contains("PreToolUse hook file missing: .claude/hooks/gone.py"));
}
