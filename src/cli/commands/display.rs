//! Shared run rendering for commands that execute steps.

use tracing::debug;

use crate::error::Result;
use crate::fs::ActionContext;
use crate::runner::{RunProgress, StepRunner};
use crate::steps::{RunReport, StepResult};
use crate::ui::{SpinnerHandle, UserInterface};

use super::dispatcher::CommandResult;

/// Run `runner`, rendering each step as it resolves.
///
/// With `json`, nothing is rendered while running and the finished report
/// is printed to stdout as JSON.
pub fn run_with_display(
    runner: &StepRunner,
    ui: &mut dyn UserInterface,
    json: bool,
) -> Result<RunReport> {
    if json {
        let report = runner.run()?;
        let rendered = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
        println!("{}", rendered);
        return Ok(report);
    }

    let mut spinner: Option<Box<dyn SpinnerHandle>> = None;
    let report = runner.run_with_progress(|event| match event {
        RunProgress::StepStarting {
            name,
            description,
            index,
            total,
        } => {
            spinner = Some(ui.start_spinner(&spinner_message(name, description, index, total)));
        }
        RunProgress::StepFinished { result, .. } => {
            if let Some(mut s) = spinner.take() {
                s.clear();
            }
            ui.show_result(result);
        }
        RunProgress::StepSkipped { name } => ui.show_result(&StepResult::skipped(name)),
    })?;

    ui.show_summary(&report);
    Ok(report)
}

fn spinner_message(name: &str, description: Option<&str>, index: usize, total: usize) -> String {
    match description {
        Some(description) if description != name => {
            format!("[{}/{}] {} · {}", index + 1, total, name, description)
        }
        _ => format!("[{}/{}] {}", index + 1, total, name),
    }
}

/// Stop any watches the run registered.
///
/// With `json`, stdout carries only the report, so the notice goes to the log.
pub fn release_watches(ctx: &ActionContext, ui: &mut dyn UserInterface, json: bool) {
    let count = ctx.watches().len();
    if count == 0 {
        return;
    }
    if json {
        debug!("Stopping {} watch(es)", count);
    } else {
        ui.message(&format!("Stopping {} watch(es)", count));
    }
    ctx.watches().stop_all();
}

/// Exit status for a finished run.
pub fn command_result(report: &RunReport) -> CommandResult {
    if report.success() {
        CommandResult::success()
    } else {
        CommandResult::failure(1)
    }
}
