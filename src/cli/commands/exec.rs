//! Exec command implementation.
//!
//! The `stepfs exec` command runs steps written in compact notation on the
//! command line, e.g. `stepfs exec write:hello.txt=Hello read:hello.txt`.

use std::path::{Path, PathBuf};

use crate::cli::args::ExecArgs;
use crate::config::{build_runner_from_steps, parse_step_specs};
use crate::error::Result;
use crate::fs::ActionContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{command_result, release_watches, run_with_display};

/// The exec command implementation.
pub struct ExecCommand {
    project_root: PathBuf,
    args: ExecArgs,
}

impl ExecCommand {
    /// Create a new exec command.
    pub fn new(project_root: &Path, args: ExecArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for ExecCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let steps = parse_step_specs(&self.args.steps)?;
        let ctx = ActionContext::local(&self.project_root);
        let runner = build_runner_from_steps(&steps, &ctx)?;

        let report = run_with_display(&runner, ui, self.args.json)?;
        release_watches(&ctx, ui, self.args.json);

        Ok(command_result(&report))
    }
}
