//! Shared helpers for spawning the rampart binary

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Command for the built binary, isolated from the caller's environment
pub fn rampart(project_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rampart"));
    cmd.env_remove("CLAUDE_PROJECT_DIR")
        .env_remove("RAMPART_LOG")
        .arg("--project-dir")
        .arg(project_dir);
    cmd
}

/// Run `cmd` with `stdin` piped in and collect its output
pub fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn rampart");

    if let Some(mut pipe) = child.stdin.take() {
        pipe.write_all(stdin.as_bytes()).ok();
    }

    child.wait_with_output().expect("wait for rampart")
}

/// Run one hook against `project_dir` with a JSON payload
pub fn run_hook(project_dir: &Path, kind: &str, payload: &Value) -> Output {
    let mut cmd = rampart(project_dir);
    cmd.args(["hook", kind]);
    run_with_stdin(cmd, &payload.to_string())
}

pub fn exit_code(output: &Output) -> i32 {
    output.status.code().unwrap_or(-1)
}

/// Parse the response document, `None` when the hook printed nothing
pub fn response(output: &Output) -> Option<Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line).expect("hook stdout is one JSON document"))
}

pub fn feedback(output: &Output) -> String {
    response(output)
        .and_then(|r| r["feedback"].as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Temporary project with an empty `.claude/` directory
pub fn claude_project() -> TempDir {
    let temp = TempDir::new().expect("create temp dir");
    fs::create_dir_all(temp.path().join(".claude")).expect("create .claude");
    temp
}
