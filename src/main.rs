use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use rampart::commands::{hook, install, scaffold, validate};
use rampart::completions::{generate_completions, Shell};
use rampart::hooks::HookKind;
use rampart::install::DEFAULT_BINARY;
use rampart::logging::init_logging;
use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rampart")]
#[command(about = "Guard-rail hooks, project validation and scaffolding for Flutter projects", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root (defaults to $CLAUDE_PROJECT_DIR, then an upward search)
    #[arg(long, global = true, env = "CLAUDE_PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one hook: reads the event payload on stdin, prints at most one JSON response
    ///
    /// Exit status: 0 allow, 1 non-blocking warning, 2 block.
    Hook {
        #[arg(value_enum)]
        kind: HookKind,
    },

    /// Check .claude/ against registry.md and settings.json
    Validate,

    /// Generate a Flutter project (configuration as JSON on stdin or --config)
    Scaffold {
        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Parent directory for the project (overrides output_path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Register every hook in .claude/settings.json
    Install {
        /// Executable name or path written into the hook commands
        #[arg(long, default_value = DEFAULT_BINARY)]
        binary: String,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum, ignore_case = true)]
        shell: Shell,
    },
}

/// Exit status for a `hook` invocation clap rejects; 2 would read as a block.
const HOOK_USAGE_ERROR: u8 = 1;

/// Whether the first positional argument is the `hook` subcommand.
fn is_hook_invocation<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        if arg == "--project-dir" {
            args.next();
            continue;
        }
        if arg.to_string_lossy().starts_with('-') {
            continue;
        }
        return arg == "hook";
    }
    false
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() && is_hook_invocation(env::args_os()) => {
            let _ = e.print();
            return Ok(ExitCode::from(HOOK_USAGE_ERROR));
        }
        Err(e) => e.exit(),
    };
    let project_dir = cli.project_dir.as_deref();

    match cli.command {
        Commands::Hook { kind } => hook::execute(kind, project_dir),
        Commands::Validate => validate::execute(project_dir),
        Commands::Scaffold { config, output } => {
            scaffold::execute(config, output).map(|()| ExitCode::SUCCESS)
        }
        Commands::Install { binary } => {
            install::execute(project_dir, &binary).map(|()| ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell, &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}
