//! Plan loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - One-line step notation in [`notation`]
//!
//! # Example
//!
//! ```
//! use stepfs::config::{build_runner, parse_plan, validate};
//! use stepfs::fs::ActionContext;
//! use stepfs::steps::StepStatus;
//! use std::path::Path;
//! use tempfile::TempDir;
//!
//! let plan = parse_plan(
//!     "steps:\n  - { name: hello, action: write, path: hello.txt, content: Hello }\n",
//!     Path::new("stepfs.yml"),
//! )
//! .unwrap();
//! validate(&plan).unwrap();
//!
//! let temp = TempDir::new().unwrap();
//! let runner = build_runner(&plan, &ActionContext::local(temp.path())).unwrap();
//! let report = runner.run().unwrap();
//! assert_eq!(report.statuses(), vec![StepStatus::Completed]);
//! ```
//!
//! # Plan File Locations
//!
//! 1. `--plan <file>` when given
//! 2. `stepfs.yml` in the project root
//! 3. `.stepfs/plan.yml` in the project root

pub mod loader;
pub mod notation;
pub mod schema;
pub mod validator;

pub use loader::{load_plan, load_plan_file, parse_plan, PlanPaths, PLAN_FILE};
pub use notation::{parse_step_spec, parse_step_specs};
pub use schema::{PlanConfig, Settings, StepConfig};
pub use validator::validate;

use crate::error::Result;
use crate::fs::ActionContext;
use crate::runner::StepRunner;
use crate::steps::Step;

impl StepConfig {
    /// Build the runnable step.
    pub fn to_step(&self, ctx: &ActionContext) -> Step {
        let step = self
            .action
            .clone()
            .into_step(self.name.clone(), ctx)
            .depends_on_previous(self.depends_on_previous);
        match &self.description {
            Some(description) => step.with_description(description.clone()),
            None => step,
        }
    }
}

impl Settings {
    /// Apply these settings to an action context.
    pub fn apply(&self, ctx: ActionContext) -> ActionContext {
        ctx.with_encoding(self.encoding)
            .with_watch_interval(self.watch_interval())
    }
}

/// Register steps into a new runner, in order.
pub fn build_runner_from_steps(steps: &[StepConfig], ctx: &ActionContext) -> Result<StepRunner> {
    let mut runner = StepRunner::new();
    for step in steps {
        runner.register(step.to_step(ctx))?;
    }
    Ok(runner)
}

/// Build a runner for a plan, applying its settings to `ctx`.
pub fn build_runner(plan: &PlanConfig, ctx: &ActionContext) -> Result<StepRunner> {
    let ctx = plan.settings.apply(ctx.clone());
    build_runner_from_steps(&plan.steps, &ctx)
}
