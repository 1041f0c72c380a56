//! `rampart hook <kind>`: one hook invocation over stdin/stdout.

use anyhow::Result;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use crate::hooks::{HookContext, HookKind};
use crate::protocol::HookInput;

pub fn execute(kind: HookKind, project_dir: Option<&Path>) -> Result<ExitCode> {
    let input = HookInput::from_reader_or_default(io::stdin().lock());
    let tool_input = &input.tool_input;
    tracing::debug!(
        hook = %kind,
        file_path = tool_input.file_path.is_some(),
        command = tool_input.command.is_some(),
        new_string = tool_input.new_string.is_some(),
        content = tool_input.content.is_some(),
        stop_reason = input.stop_reason.is_some(),
        "hook payload"
    );

    let ctx = HookContext::resolve(project_dir, kind);
    let outcome = kind.run(&input, &ctx);
    tracing::debug!(hook = %kind, verdict = %outcome.verdict, "hook finished");

    outcome.emit(&mut io::stdout().lock())?;
    Ok(ExitCode::from(outcome.exit_code()))
}
