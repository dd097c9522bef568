//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// stepfs - Run filesystem steps in strict order and report every outcome.
#[derive(Debug, Parser)]
#[command(name = "stepfs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory relative step paths resolve against (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show step outputs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the steps of a plan file
    Run(RunArgs),

    /// Run steps given on the command line (e.g. write:hello.txt=Hello)
    Exec(ExecArgs),

    /// Create a file with the given content
    Write(WriteArgs),

    /// Run the built-in demonstration sequence
    Demo(DemoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Plan file (overrides stepfs.yml / .stepfs/plan.yml discovery)
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `exec` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExecArgs {
    /// Steps in `action:target` notation, run in the order given
    #[arg(required = true, value_name = "STEP")]
    pub steps: Vec<String>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `write` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct WriteArgs {
    /// File to create
    pub file: PathBuf,

    /// Content to write
    pub content: String,
}

/// Arguments for the `demo` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DemoArgs {
    /// Directory to run the demo in (defaults to ./stepfs-demo)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_exec_steps_in_order() {
        let cli = Cli::parse_from(["stepfs", "exec", "write:a.txt=x", "read:a.txt", "--json"]);
        match cli.command {
            Commands::Exec(args) => {
                assert_eq!(args.steps, vec!["write:a.txt=x", "read:a.txt"]);
                assert!(args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn exec_requires_a_step() {
        assert!(Cli::try_parse_from(["stepfs", "exec"]).is_err());
    }

    #[test]
    fn parses_write_positionals() {
        let cli = Cli::parse_from(["stepfs", "write", "note.txt", "hi there"]);
        match cli.command {
            Commands::Write(args) => {
                assert_eq!(args.file, PathBuf::from("note.txt"));
                assert_eq!(args.content, "hi there");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["stepfs", "run", "--plan", "p.yml", "--quiet"]);
        assert!(cli.quiet);
        match cli.command {
            Commands::Run(args) => assert_eq!(args.plan, Some(PathBuf::from("p.yml"))),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
