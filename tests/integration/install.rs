//! `rampart install` followed by validation of the result

use serde_json::Value;
use std::fs;

use super::helpers::{claude_project, exit_code, rampart};

fn install(root: &std::path::Path) -> std::process::Output {
    let mut cmd = rampart(root);
    cmd.args(["install", "--binary", "/opt/bin/rampart"]);
    cmd.output().expect("run rampart install")
}

#[test]
fn install_registers_every_event_once() {
    let project = claude_project();
    let settings_path = project.path().join(".claude/settings.json");
    fs::write(&settings_path, r#"{"permissions": {"allow": ["Bash(ls)"]}}"#).unwrap();

    assert_eq!(exit_code(&install(project.path())), 0);
    let first = fs::read_to_string(&settings_path).unwrap();
    let settings: Value = serde_json::from_str(&first).unwrap();

    assert_eq!(settings["permissions"]["allow"][0], "Bash(ls)");
    for event in ["PreToolUse", "PostToolUse", "Stop"] {
        assert!(settings["hooks"][event].is_array(), "{event} missing");
    }
    assert!(first.contains("/opt/bin/rampart hook dangerous-command"));

    assert_eq!(exit_code(&install(project.path())), 0);
    assert_eq!(fs::read_to_string(&settings_path).unwrap(), first);
}

#[test]
fn installed_settings_validate() {
    let project = claude_project();
    assert_eq!(exit_code(&install(project.path())), 0);

    let mut cmd = rampart(project.path());
    cmd.arg("validate");
    let output = cmd.output().expect("run rampart validate");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("hook file missing"), "{stdout}");
    assert!(!stdout.contains("settings.json not found"), "{stdout}");
}

#[test]
fn invalid_settings_are_not_overwritten() {
    let project = claude_project();
    let settings_path = project.path().join(".claude/settings.json");
    fs::write(&settings_path, "{broken").unwrap();

    assert_ne!(exit_code(&install(project.path())), 0);
    assert_eq!(fs::read_to_string(&settings_path).unwrap(), "{broken");
}
