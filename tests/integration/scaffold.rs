//! `rampart scaffold` end to end

use std::fs;
use tempfile::TempDir;

use super::helpers::{exit_code, rampart, run_with_stdin};

#[test]
fn generates_bloc_project_from_stdin() {
    let out = TempDir::new().unwrap();
    let mut cmd = rampart(out.path());
    cmd.arg("scaffold").arg("--output").arg(out.path());
    let output = run_with_stdin(
        cmd,
        r#"{"project_name": "demo", "state_management": "bloc", "platforms": ["android"]}"#,
    );

    assert_eq!(exit_code(&output), 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generating project: demo"));
    assert!(stdout.contains("  cd demo"));

    let base = out.path().join("demo");
    let pubspec = fs::read_to_string(base.join("pubspec.yaml")).unwrap();
    assert!(pubspec.starts_with("name: demo\n"));
    assert!(pubspec.contains("flutter_bloc"));
    assert!(base.join("lib/main.dart").is_file());
    assert!(base.join(".gitignore").is_file());

    let context = fs::read_to_string(base.join(".claude/context.md")).unwrap();
    assert!(context.starts_with("# demo Context\n"));
    assert!(context.contains("Platforms: android\n"));
}

#[test]
fn rejects_invalid_project_name() {
    let out = TempDir::new().unwrap();
    let config = out.path().join("config.json");
    fs::write(&config, r#"{"project_name": "../escape"}"#).unwrap();

    let mut cmd = rampart(out.path());
    cmd.arg("scaffold")
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(out.path());
    let output = cmd.output().expect("run rampart scaffold");

    assert_ne!(exit_code(&output), 0);
    assert!(!out.path().join("escape").exists());
}
