//! Run command implementation.
//!
//! The `stepfs run` command executes the steps of a plan file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::RunArgs;
use crate::config::{build_runner, load_plan, validate};
use crate::error::Result;
use crate::fs::ActionContext;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{command_result, release_watches, run_with_display};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let plan = load_plan(&self.project_root, self.args.plan.as_deref())?;
        validate(&plan)?;
        debug!("Loaded plan with {} steps", plan.steps.len());

        let ctx = ActionContext::local(&self.project_root);
        let runner = build_runner(&plan, &ctx)?;

        if !self.args.json {
            ui.show_header(&format!("stepfs · {} steps", runner.len()));
        }
        let report = run_with_display(&runner, ui, self.args.json)?;
        release_watches(&ctx, ui, self.args.json);

        Ok(command_result(&report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepfsError;
    use crate::steps::StepStatus;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const PLAN: &str = r#"
steps:
  - { name: write, action: write, path: hello.txt, content: Hello }
  - { name: read, action: read, path: hello.txt }
  - { name: read-missing, action: read, path: missing.txt }
  - { name: cleanup, action: delete, path: hello.txt, depends_on_previous: false }
"#;

    #[test]
    fn runs_discovered_plan() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("stepfs.yml"), PLAN).unwrap();

        let mut ui = MockUI::new();
        let result = RunCommand::new(temp.path(), RunArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        let statuses: Vec<_> = ui.results().iter().map(|(_, s)| *s).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Completed,
                StepStatus::Completed,
                StepStatus::Failed,
                StepStatus::Completed
            ]
        );
        assert!(!temp.path().join("hello.txt").exists());
    }

    #[test]
    fn missing_plan_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let err = RunCommand::new(temp.path(), RunArgs::default())
            .execute(&mut ui)
            .err()
            .unwrap();
        assert!(matches!(err, StepfsError::PlanNotFound { .. }));
    }

    #[test]
    fn invalid_plan_is_rejected_before_running() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("stepfs.yml"),
            "steps:\n  - { name: a, action: write, path: a.txt, content: x }\n  - { name: a, action: delete, path: a.txt }\n",
        )
        .unwrap();

        let mut ui = MockUI::new();
        let err = RunCommand::new(temp.path(), RunArgs::default())
            .execute(&mut ui)
            .err()
            .unwrap();
        assert!(matches!(err, StepfsError::PlanValidationError { .. }));
        assert!(!temp.path().join("a.txt").exists());
    }
}
