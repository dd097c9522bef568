//! Write command implementation.
//!
//! `stepfs write <FILE> <CONTENT>` creates a file with the given content.

use std::path::{Path, PathBuf};

use crate::cli::args::WriteArgs;
use crate::error::Result;
use crate::fs::{ActionContext, FsAction};
use crate::runner::StepRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::command_result;

/// The write command implementation.
pub struct WriteCommand {
    project_root: PathBuf,
    args: WriteArgs,
}

impl WriteCommand {
    /// Create a new write command.
    pub fn new(project_root: &Path, args: WriteArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for WriteCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = ActionContext::local(&self.project_root);
        let action = FsAction::Write {
            path: self.args.file.clone(),
            content: self.args.content.clone(),
        };

        let mut runner = StepRunner::new();
        runner.register(action.into_step("write", &ctx))?;
        let report = runner.run()?;

        match report.last().and_then(|r| r.error.as_ref()) {
            Some(error) => ui.error(&format!(
                "Could not create {}: {}",
                self.args.file.display(),
                error
            )),
            None => ui.success(&format!(
                "File {} created with content: {}",
                self.args.file.display(),
                self.args.content
            )),
        }

        Ok(command_result(&report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn creates_file() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = WriteArgs {
            file: "note.txt".into(),
            content: "remember".into(),
        };

        let result = WriteCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(
            fs::read_to_string(temp.path().join("note.txt")).unwrap(),
            "remember"
        );
        assert!(ui.successes()[0].contains("note.txt"));
    }

    #[test]
    fn reports_failure_without_erroring() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = WriteArgs {
            file: "no/such/dir/note.txt".into(),
            content: "x".into(),
        };

        let result = WriteCommand::new(temp.path(), args).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.errors()[0].contains("not found"));
    }
}
